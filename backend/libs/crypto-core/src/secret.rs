//! Shared signing secret
//!
//! The secret is loaded once at startup and shared read-only for the process
//! lifetime. It must be byte-identical in every service of the trust domain.

use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use zeroize::Zeroizing;

/// 256 bits minimum for HMAC-SHA256 keys
pub const MIN_SECRET_LENGTH: usize = 32;

/// Errors raised while preparing or using the signing key.
///
/// Secret problems are fatal startup conditions; services refuse to start
/// rather than run with no or a weak key.
#[derive(Debug, Error)]
pub enum SigningError {
    #[error("signing secret is not configured (set {0})")]
    MissingSecret(String),

    #[error("signing secret is too short: {len} bytes, need at least {min}")]
    WeakSecret { len: usize, min: usize },

    #[error("cannot issue credential: {0}")]
    InvalidPrincipal(&'static str),

    #[error("failed to serialize credential claims: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Symmetric key used both to sign and to verify credentials.
///
/// Cloning is cheap (shared `Arc`). The key bytes are zeroed on drop and
/// never printed by `Debug`.
#[derive(Clone)]
pub struct SigningSecret {
    key: Arc<Zeroizing<Vec<u8>>>,
}

impl SigningSecret {
    pub fn new(secret: impl AsRef<[u8]>) -> Result<Self, SigningError> {
        let bytes = secret.as_ref();
        if bytes.len() < MIN_SECRET_LENGTH {
            return Err(SigningError::WeakSecret {
                len: bytes.len(),
                min: MIN_SECRET_LENGTH,
            });
        }

        Ok(Self {
            key: Arc::new(Zeroizing::new(bytes.to_vec())),
        })
    }

    /// Load the secret from an environment variable.
    pub fn from_env(var: &str) -> Result<Self, SigningError> {
        match std::env::var(var) {
            Ok(value) if !value.is_empty() => Self::new(value),
            _ => Err(SigningError::MissingSecret(var.to_string())),
        }
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.key.as_slice()
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningSecret")
            .field("len", &self.key.len())
            .finish_non_exhaustive()
    }
}
