use chrono::{DateTime, Utc};
use crypto_core::Principal;
use grpc_contracts::identity::{Principal as PrincipalMessage, UserProfile};

/// User model - core identity entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: u32,
    /// Normalized (trimmed, lowercase)
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn principal(&self) -> Principal {
        Principal::new(self.id, self.email.clone())
    }

    pub fn to_profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            email: self.email.clone(),
            created_at: self.created_at.to_rfc3339(),
        }
    }
}

/// Wire form of a verified principal
pub fn principal_message(principal: &Principal) -> PrincipalMessage {
    PrincipalMessage {
        id: principal.id,
        email: principal.email.clone(),
    }
}
