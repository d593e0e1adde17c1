//! Shared credential primitives for Vocal Tracker services
//!
//! Every service in the trust domain links this crate. The identity service
//! uses it to issue credentials; every other service uses it to verify them
//! locally, with no network round-trip.
//!
//! ## Credential format
//!
//! ```text
//! base64url(payload-json) "." base64url(hmac-sha256(payload-segment))
//! ```
//!
//! The payload carries `user_id`, `email`, `issued_at` and `expires_at`
//! (epoch seconds). The signature covers the ASCII text of the first segment.
//!
//! ## Usage
//!
//! ```rust
//! use crypto_core::{CredentialIssuer, CredentialVerifier, Principal, SigningSecret};
//!
//! let secret = SigningSecret::new("0123456789abcdef0123456789abcdef-test")?;
//! let issuer = CredentialIssuer::new(secret.clone());
//! let verifier = CredentialVerifier::new(secret);
//!
//! let principal = Principal::new(5, "a@b.com");
//! let credential = issuer.issue(&principal)?;
//! assert_eq!(verifier.verify(&credential)?, principal);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod credential;
pub mod principal;
pub mod secret;

pub use credential::{
    Claims, CredentialError, CredentialIssuer, CredentialVerifier, DEFAULT_CREDENTIAL_TTL,
};
pub use principal::Principal;
pub use secret::{SigningError, SigningSecret, MIN_SECRET_LENGTH};
