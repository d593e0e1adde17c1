//! Generates tonic client and server stubs for the Vocal Tracker services.
//!
//! Messages are declared with prost derives in `src/`, so the service
//! definitions are assembled here with the manual builder and no `protoc`
//! is needed at build time.

use tonic_build::manual::{Builder, Method, Service};

const CODEC: &str = "tonic::codec::ProstCodec";

fn method(name: &str, route: &str, input: &str, output: &str) -> Method {
    Method::builder()
        .name(name)
        .route_name(route)
        .input_type(input)
        .output_type(output)
        .codec_path(CODEC)
        .build()
}

fn main() {
    let identity = Service::builder()
        .name("IdentityService")
        .package("vocaltracker.identity")
        .method(method(
            "register",
            "Register",
            "crate::identity::RegisterRequest",
            "crate::identity::AuthResponse",
        ))
        .method(method(
            "issue_credential",
            "IssueCredential",
            "crate::identity::IssueCredentialRequest",
            "crate::identity::AuthResponse",
        ))
        .method(method(
            "verify_credential",
            "VerifyCredential",
            "crate::identity::VerifyCredentialRequest",
            "crate::identity::VerifyCredentialResponse",
        ))
        .method(method(
            "get_profile",
            "GetProfile",
            "crate::identity::GetProfileRequest",
            "crate::identity::GetProfileResponse",
        ))
        .build();

    let vocabulary = Service::builder()
        .name("VocabularyService")
        .package("vocaltracker.vocabulary")
        .method(method(
            "list_vocabularies",
            "ListVocabularies",
            "crate::vocabulary::ListVocabulariesRequest",
            "crate::vocabulary::ListVocabulariesResponse",
        ))
        .method(method(
            "get_vocabulary",
            "GetVocabulary",
            "crate::vocabulary::GetVocabularyRequest",
            "crate::vocabulary::VocabularyResponse",
        ))
        .method(method(
            "create_vocabulary",
            "CreateVocabulary",
            "crate::vocabulary::CreateVocabularyRequest",
            "crate::vocabulary::VocabularyResponse",
        ))
        .method(method(
            "update_vocabulary",
            "UpdateVocabulary",
            "crate::vocabulary::UpdateVocabularyRequest",
            "crate::vocabulary::VocabularyResponse",
        ))
        .method(method(
            "delete_vocabulary",
            "DeleteVocabulary",
            "crate::vocabulary::DeleteVocabularyRequest",
            "crate::vocabulary::DeleteVocabularyResponse",
        ))
        .method(method(
            "get_vocabulary_stats",
            "GetVocabularyStats",
            "crate::vocabulary::GetVocabularyStatsRequest",
            "crate::vocabulary::GetVocabularyStatsResponse",
        ))
        .build();

    Builder::new().compile(&[identity, vocabulary]);

    println!("cargo:rerun-if-changed=build.rs");
}
