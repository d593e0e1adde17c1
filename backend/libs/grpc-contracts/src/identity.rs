//! `vocaltracker.identity` messages and the generated `IdentityService` stubs.

pub use crate::common::ResultCode;

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Principal {
    #[prost(uint32, tag = "1")]
    pub id: u32,
    #[prost(string, tag = "2")]
    pub email: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RegisterRequest {
    #[prost(string, tag = "1")]
    pub email: String,
    #[prost(string, tag = "2")]
    pub password: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct IssueCredentialRequest {
    #[prost(string, tag = "1")]
    pub email: String,
    #[prost(string, tag = "2")]
    pub password: String,
}

/// Result of `Register` and `IssueCredential`
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AuthResponse {
    #[prost(bool, tag = "1")]
    pub success: bool,
    #[prost(string, tag = "2")]
    pub message: String,
    /// Signed credential, empty on failure
    #[prost(string, tag = "3")]
    pub credential: String,
    #[prost(message, optional, tag = "4")]
    pub principal: Option<Principal>,
    #[prost(enumeration = "ResultCode", tag = "5")]
    pub code: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct VerifyCredentialRequest {
    #[prost(string, tag = "1")]
    pub credential: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct VerifyCredentialResponse {
    #[prost(bool, tag = "1")]
    pub valid: bool,
    #[prost(string, tag = "2")]
    pub message: String,
    #[prost(message, optional, tag = "3")]
    pub principal: Option<Principal>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetProfileRequest {
    #[prost(uint32, tag = "1")]
    pub target_user_id: u32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UserProfile {
    #[prost(uint32, tag = "1")]
    pub id: u32,
    #[prost(string, tag = "2")]
    pub email: String,
    /// RFC 3339
    #[prost(string, tag = "3")]
    pub created_at: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetProfileResponse {
    #[prost(bool, tag = "1")]
    pub success: bool,
    #[prost(string, tag = "2")]
    pub message: String,
    #[prost(enumeration = "ResultCode", tag = "3")]
    pub code: i32,
    #[prost(message, optional, tag = "4")]
    pub user: Option<UserProfile>,
}

include!(concat!(
    env!("OUT_DIR"),
    "/vocaltracker.identity.IdentityService.rs"
));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_accessor_falls_back_on_unknown_value() {
        let response = AuthResponse {
            code: 99,
            ..Default::default()
        };
        assert_eq!(response.code(), ResultCode::Unspecified);

        let mut response = GetProfileResponse::default();
        response.set_code(ResultCode::Forbidden);
        assert_eq!(response.code, ResultCode::Forbidden as i32);
    }
}
