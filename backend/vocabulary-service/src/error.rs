use grpc_contracts::ResultCode;
use grpc_jwt_propagation::OwnershipError;
use thiserror::Error;
use tonic::{Code, Status};

pub type Result<T> = std::result::Result<T, VocabularyError>;

#[derive(Debug, Error)]
pub enum VocabularyError {
    #[error("Vocabulary not found")]
    NotFound,

    #[error("{0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Ownership(#[from] OwnershipError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl VocabularyError {
    /// Outcomes reported as failed payloads rather than transport errors.
    ///
    /// The caller's credential was fine; only the target was refused.
    pub fn result_code(&self) -> Option<ResultCode> {
        match self {
            VocabularyError::Ownership(OwnershipError::Forbidden { .. }) => {
                Some(ResultCode::Forbidden)
            }
            VocabularyError::NotFound => Some(ResultCode::NotFound),
            _ => None,
        }
    }

    /// Message safe to return to the caller
    pub fn public_message(&self) -> String {
        match self {
            VocabularyError::Ownership(OwnershipError::Forbidden { .. }) => {
                "Access denied: can only access your own vocabularies".to_string()
            }
            VocabularyError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }

    /// Convert to gRPC Status for wire protocol
    pub fn to_status(&self) -> Status {
        match self {
            VocabularyError::NotFound => Status::new(Code::NotFound, self.public_message()),
            VocabularyError::InvalidArgument(msg) => Status::new(Code::InvalidArgument, msg.clone()),
            VocabularyError::Ownership(err) => err.clone().into(),
            VocabularyError::Internal(_) => Status::new(Code::Internal, self.public_message()),
        }
    }
}
