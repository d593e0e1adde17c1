use serde::{Deserialize, Serialize};

/// Authenticated identity recovered from a verified credential.
///
/// Services must only obtain a `Principal` from [`crate::CredentialVerifier`];
/// never build one from request fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Principal {
    pub id: u32,
    pub email: String,
}

impl Principal {
    pub fn new(id: u32, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
        }
    }

    /// Ownership check used by every resource handler.
    pub fn owns(&self, owner_id: u32) -> bool {
        self.id == owner_id
    }
}
