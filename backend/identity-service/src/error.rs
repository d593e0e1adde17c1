use crypto_core::SigningError;
use thiserror::Error;
use tonic::{Code, Status};

pub type Result<T> = std::result::Result<T, IdentityError>;

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("User already exists")]
    EmailAlreadyExists,

    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    #[error("Password too weak: {0}")]
    WeakPassword(String),

    #[error("Credential error: {0}")]
    Signing(#[from] SigningError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IdentityError {
    /// Convert to gRPC Status for wire protocol
    pub fn to_status(&self) -> Status {
        match self {
            IdentityError::InvalidCredentials => {
                Status::new(Code::Unauthenticated, "Invalid credentials")
            }
            IdentityError::UserNotFound => Status::new(Code::NotFound, "User not found"),
            IdentityError::EmailAlreadyExists => {
                Status::new(Code::AlreadyExists, "User already exists")
            }
            IdentityError::InvalidEmail(msg) => {
                Status::new(Code::InvalidArgument, format!("Invalid email: {}", msg))
            }
            IdentityError::WeakPassword(msg) => {
                Status::new(Code::InvalidArgument, format!("Password too weak: {}", msg))
            }
            IdentityError::Signing(_) | IdentityError::Internal(_) => {
                // Don't leak internal details
                Status::new(Code::Internal, "Internal server error")
            }
        }
    }
}

impl From<tokio::task::JoinError> for IdentityError {
    fn from(err: tokio::task::JoinError) -> Self {
        tracing::error!("Blocking task failed: {}", err);
        IdentityError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_details_not_leaked() {
        let status = IdentityError::Internal("argon2 params rejected".into()).to_status();
        assert_eq!(status.code(), Code::Internal);
        assert_eq!(status.message(), "Internal server error");
    }

    #[test]
    fn test_validation_maps_to_invalid_argument() {
        let status = IdentityError::WeakPassword("too short".into()).to_status();
        assert_eq!(status.code(), Code::InvalidArgument);
        assert!(status.message().contains("too short"));
    }
}
