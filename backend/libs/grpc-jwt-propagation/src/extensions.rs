//! Request Extension Trait for Principal Access
//!
//! The authenticated [`Principal`] travels with the request as an explicit
//! extension value, never as task-local or global state. Handlers read it
//! here and apply the ownership rule as their first action.

use crypto_core::Principal;
use thiserror::Error;
use tonic::{Request, Status};
use tracing::warn;

/// Refusal from the ownership check
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OwnershipError {
    /// No verified principal on the request; the auth stage did not run
    #[error("request is not authenticated")]
    Unauthenticated,

    #[error("user {principal_id} may not act on resources of user {target_user_id}")]
    Forbidden {
        principal_id: u32,
        target_user_id: u32,
    },
}

impl From<OwnershipError> for Status {
    fn from(err: OwnershipError) -> Self {
        match err {
            OwnershipError::Unauthenticated => Status::unauthenticated("Unauthenticated"),
            OwnershipError::Forbidden { .. } => {
                Status::permission_denied("You do not have permission to access this resource")
            }
        }
    }
}

/// Extension trait for reading the verified principal from gRPC requests
///
/// ## Usage
///
/// ```rust,no_run
/// use grpc_jwt_propagation::{OwnershipError, PrincipalExt};
/// use tonic::Request;
///
/// fn delete_entry(request: Request<u32>) -> Result<(), OwnershipError> {
///     let target_user_id = *request.get_ref();
///     let principal = request.require_ownership(target_user_id)?;
///     // principal.id == target_user_id from here on
///     Ok(())
/// }
/// ```
pub trait PrincipalExt {
    /// Principal stored by the authentication stage.
    fn principal(&self) -> Result<&Principal, OwnershipError>;

    /// Require that the caller is `target_user_id`.
    ///
    /// Re-evaluated on every call; nothing is cached between requests.
    fn require_ownership(&self, target_user_id: u32) -> Result<&Principal, OwnershipError>;
}

impl<T> PrincipalExt for Request<T> {
    fn principal(&self) -> Result<&Principal, OwnershipError> {
        self.extensions()
            .get::<Principal>()
            .ok_or(OwnershipError::Unauthenticated)
    }

    fn require_ownership(&self, target_user_id: u32) -> Result<&Principal, OwnershipError> {
        let principal = self.principal()?;

        if !principal.owns(target_user_id) {
            warn!(
                principal_id = principal.id,
                target_user_id = target_user_id,
                "Ownership check refused"
            );
            return Err(OwnershipError::Forbidden {
                principal_id: principal.id,
                target_user_id,
            });
        }

        Ok(principal)
    }
}
