//! Credential Propagation for gRPC Services
//!
//! Carries the caller's credential from the gateway to the resource services
//! and turns it back into a verified principal on the other side.
//!
//! ## Core Components
//!
//! - **CredentialForwarder**: copies the inbound bearer header into outgoing metadata, unverified
//! - **AuthInterceptor**: verifies the credential on every call and stores the `Principal`
//! - **AuthLayer**: same check as a tower layer, with a deny-by-default allowlist of public methods
//! - **PrincipalExt**: handler-side access to the principal and the ownership rule
//!
//! ## Call lifecycle
//!
//! ```text
//! Unauthenticated --verify ok--> Authenticated --owner check--> Authorized | Forbidden
//! ```
//!
//! Authentication failures end the call with `Status::unauthenticated` and the
//! same message whatever went wrong. Ownership refusals are returned by the
//! handler as ordinary failed results.
//!
//! ## Usage Example
//!
//! ```rust
//! use crypto_core::{CredentialIssuer, CredentialVerifier, Principal, SigningSecret};
//! use grpc_jwt_propagation::{AuthInterceptor, CredentialForwarder, PrincipalExt};
//! use tonic::service::Interceptor;
//! use tonic::Request;
//!
//! let secret = SigningSecret::new("0123456789abcdef0123456789abcdef-docs").unwrap();
//! let credential = CredentialIssuer::new(secret.clone())
//!     .issue(&Principal::new(5, "a@b.com"))
//!     .unwrap();
//!
//! // Gateway side
//! let mut forwarder = CredentialForwarder::from_authorization(&format!("Bearer {credential}")).unwrap();
//! let request = forwarder.call(Request::new(())).unwrap();
//!
//! // Resource service side
//! let mut interceptor = AuthInterceptor::new(CredentialVerifier::new(secret));
//! let request = interceptor.call(request).unwrap();
//!
//! assert!(request.require_ownership(5).is_ok());
//! assert!(request.require_ownership(999).is_err());
//! ```

mod bearer;
mod client;
mod extensions;
mod server;

pub use bearer::{bearer_token, AUTHORIZATION, BEARER_PREFIX};
pub use client::CredentialForwarder;
pub use extensions::{OwnershipError, PrincipalExt};
pub use server::{authenticate, authenticate_metadata, AuthInterceptor, AuthLayer, AuthService};

pub use crypto_core::Principal;

// Re-export tonic Status for convenience
pub use tonic::Status;
