//! Credential issuing and verification (HMAC-SHA256 signed claims)
//!
//! This module is the single implementation of the trust protocol. The
//! identity service issues credentials; every other service verifies them
//! locally with the same shared secret.
//!
//! ## Verification order
//!
//! 1. Structure: a payload segment and a signature segment split at the
//!    first `.`, else `Malformed`
//! 2. Signature: HMAC over the raw payload text, constant-time compare, else
//!    `BadSignature` (an undecodable signature segment is also `BadSignature`)
//! 3. Payload decodes into claims, else `Malformed`
//! 4. Expiry: `now >= expires_at` is `Expired`
//!
//! Callers outside this crate must collapse all three failure kinds into a
//! single `Unauthenticated` answer; the kind is for logs only.
use crate::principal::Principal;
use crate::secret::{SigningError, SigningSecret};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Utc;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::time::Duration;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

// ============================================================================
// Constants
// ============================================================================

/// Credentials are valid for 24 hours after issuance
pub const DEFAULT_CREDENTIAL_TTL: Duration = Duration::from_secs(24 * 60 * 60);

const SEGMENT_SEPARATOR: char = '.';

// ============================================================================
// Data Structures
// ============================================================================

/// Signed payload carried inside every credential
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: u32,
    pub email: String,
    /// Issued at (Unix timestamp)
    pub issued_at: i64,
    /// Expiration time (Unix timestamp)
    pub expires_at: i64,
}

impl Claims {
    fn into_principal(self) -> Result<Principal, CredentialError> {
        if self.user_id == 0 || self.email.is_empty() {
            return Err(CredentialError::Malformed);
        }
        Ok(Principal::new(self.user_id, self.email))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CredentialError {
    #[error("credential is malformed")]
    Malformed,

    #[error("credential signature does not match")]
    BadSignature,

    #[error("credential has expired")]
    Expired,
}

// ============================================================================
// Signing
// ============================================================================

fn mac_for(secret: &SigningSecret) -> HmacSha256 {
    // HMAC is defined for keys of any length; this cannot fail.
    <HmacSha256 as Mac>::new_from_slice(secret.as_bytes())
        .expect("HMAC-SHA256 accepts keys of any length")
}

fn sign(secret: &SigningSecret, payload_segment: &str) -> Vec<u8> {
    let mut mac = mac_for(secret);
    mac.update(payload_segment.as_bytes());
    mac.finalize().into_bytes().to_vec()
}

// Everything after the first separator is the signature segment, so a stray
// separator or foreign byte in either segment fails the HMAC check instead.
fn split_segments(credential: &str) -> Result<(&str, &str), CredentialError> {
    credential
        .split_once(SEGMENT_SEPARATOR)
        .ok_or(CredentialError::Malformed)
}

// ============================================================================
// Issuer
// ============================================================================

/// Issues credentials for authenticated principals.
///
/// Only the identity service holds an issuer.
#[derive(Clone, Debug)]
pub struct CredentialIssuer {
    secret: SigningSecret,
    ttl: Duration,
}

impl CredentialIssuer {
    pub fn new(secret: SigningSecret) -> Self {
        Self {
            secret,
            ttl: DEFAULT_CREDENTIAL_TTL,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Issue a credential valid from now for the configured TTL.
    pub fn issue(&self, principal: &Principal) -> Result<String, SigningError> {
        self.issue_at(principal, Utc::now().timestamp())
    }

    /// Issue a credential with an explicit issuance time (Unix seconds).
    pub fn issue_at(&self, principal: &Principal, issued_at: i64) -> Result<String, SigningError> {
        if principal.id == 0 {
            return Err(SigningError::InvalidPrincipal("user id must be positive"));
        }
        if principal.email.trim().is_empty() {
            return Err(SigningError::InvalidPrincipal("email must not be empty"));
        }

        let ttl_secs = i64::try_from(self.ttl.as_secs()).unwrap_or(i64::MAX);
        let claims = Claims {
            user_id: principal.id,
            email: principal.email.clone(),
            issued_at,
            expires_at: issued_at.saturating_add(ttl_secs),
        };

        let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims)?);
        let signature = URL_SAFE_NO_PAD.encode(sign(&self.secret, &payload));

        Ok(format!("{payload}{SEGMENT_SEPARATOR}{signature}"))
    }
}

// ============================================================================
// Verifier
// ============================================================================

/// Verifies credentials locally.
///
/// Holds only the immutable shared secret, so a single instance can be
/// shared across any number of concurrent calls without locking.
#[derive(Clone, Debug)]
pub struct CredentialVerifier {
    secret: SigningSecret,
}

impl CredentialVerifier {
    pub fn new(secret: SigningSecret) -> Self {
        Self { secret }
    }

    /// Verify a credential against the current time.
    pub fn verify(&self, credential: &str) -> Result<Principal, CredentialError> {
        self.verify_at(credential, Utc::now().timestamp())
    }

    /// Verify a credential against an explicit time (Unix seconds).
    pub fn verify_at(&self, credential: &str, now: i64) -> Result<Principal, CredentialError> {
        self.verify_claims_at(credential, now)?.into_principal()
    }

    /// Verify and return the full claims, including timestamps.
    pub fn verify_claims_at(&self, credential: &str, now: i64) -> Result<Claims, CredentialError> {
        let (payload, signature) = split_segments(credential)?;

        // Not canonical base64url, so it cannot be our signature.
        let signature = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|_| CredentialError::BadSignature)?;

        let mut mac = mac_for(&self.secret);
        mac.update(payload.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| CredentialError::BadSignature)?;

        let claims: Claims = URL_SAFE_NO_PAD
            .decode(payload)
            .ok()
            .and_then(|json| serde_json::from_slice(&json).ok())
            .ok_or(CredentialError::Malformed)?;

        if now >= claims.expires_at {
            return Err(CredentialError::Expired);
        }

        Ok(claims)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "unit-test-secret-0123456789abcdef0123";

    fn keys() -> (CredentialIssuer, CredentialVerifier) {
        let secret = SigningSecret::new(TEST_SECRET).expect("valid test secret");
        (
            CredentialIssuer::new(secret.clone()),
            CredentialVerifier::new(secret),
        )
    }

    #[test]
    fn test_issue_produces_two_segments() {
        let (issuer, _) = keys();
        let credential = issuer.issue(&Principal::new(5, "a@b.com")).unwrap();
        assert_eq!(credential.matches('.').count(), 1);
    }

    #[test]
    fn test_claims_expire_after_ttl() {
        let (issuer, verifier) = keys();
        let credential = issuer
            .issue_at(&Principal::new(5, "a@b.com"), 1_700_000_000)
            .unwrap();

        let claims = verifier
            .verify_claims_at(&credential, 1_700_000_001)
            .unwrap();
        assert_eq!(claims.issued_at, 1_700_000_000);
        assert_eq!(claims.expires_at, 1_700_000_000 + 24 * 3600);
    }

    #[test]
    fn test_issue_rejects_zero_id() {
        let (issuer, _) = keys();
        let result = issuer.issue(&Principal::new(0, "a@b.com"));
        assert!(matches!(result, Err(SigningError::InvalidPrincipal(_))));
    }

    #[test]
    fn test_issue_rejects_empty_email() {
        let (issuer, _) = keys();
        let result = issuer.issue(&Principal::new(1, "  "));
        assert!(matches!(result, Err(SigningError::InvalidPrincipal(_))));
    }

    #[test]
    fn test_missing_separator_is_malformed() {
        let (_, verifier) = keys();
        for credential in ["", "abc", "eyJ1c2VyX2lkIjo1fQ"] {
            assert_eq!(
                verifier.verify(credential),
                Err(CredentialError::Malformed),
                "credential {:?}",
                credential
            );
        }
    }

    #[test]
    fn test_unsigned_structures_are_bad_signature() {
        let (_, verifier) = keys();
        for credential in [".", "abc.", ".abc", "a.b.c", "ab$.cd", "ab.c d", "ab+/.cd=="] {
            assert_eq!(
                verifier.verify(credential),
                Err(CredentialError::BadSignature),
                "credential {:?}",
                credential
            );
        }
    }

    #[test]
    fn test_split_keeps_extra_separators_in_signature() {
        assert_eq!(split_segments("a.b.c"), Ok(("a", "b.c")));
        assert_eq!(split_segments("abc"), Err(CredentialError::Malformed));
    }

    #[test]
    fn test_wrong_secret_is_bad_signature() {
        let (issuer, _) = keys();
        let other = CredentialVerifier::new(
            SigningSecret::new("another-secret-entirely-0123456789abcdef").unwrap(),
        );
        let credential = issuer.issue(&Principal::new(5, "a@b.com")).unwrap();
        assert_eq!(other.verify(&credential), Err(CredentialError::BadSignature));
    }

    #[test]
    fn test_signed_garbage_payload_is_malformed() {
        let (_, verifier) = keys();
        let secret = SigningSecret::new(TEST_SECRET).unwrap();
        let payload = URL_SAFE_NO_PAD.encode(b"not json");
        let signature = URL_SAFE_NO_PAD.encode(sign(&secret, &payload));
        let credential = format!("{payload}.{signature}");
        assert_eq!(verifier.verify(&credential), Err(CredentialError::Malformed));
    }

    #[test]
    fn test_signed_zero_user_id_is_malformed() {
        let (_, verifier) = keys();
        let secret = SigningSecret::new(TEST_SECRET).unwrap();
        let claims = Claims {
            user_id: 0,
            email: "a@b.com".to_string(),
            issued_at: 0,
            expires_at: i64::MAX,
        };
        let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims).unwrap());
        let signature = URL_SAFE_NO_PAD.encode(sign(&secret, &payload));
        let credential = format!("{payload}.{signature}");
        assert_eq!(verifier.verify(&credential), Err(CredentialError::Malformed));
    }
}
