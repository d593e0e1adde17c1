//! Gateway errors and their HTTP mapping
//!
//! Downstream gRPC statuses and failed-result payloads both end up here.
//! Transport failures are reported with a generic body; details go to logs.

use crate::rest_api::models::ErrorResponse;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use grpc_contracts::ResultCode;
use thiserror::Error;
use tonic::{Code, Status};
use tracing::error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Unauthenticated")]
    Unauthenticated,

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("downstream call failed: {0}")]
    Upstream(Status),
}

impl GatewayError {
    /// Map a failed-result payload. Only called when `success` is false.
    pub fn from_payload(code: ResultCode, message: String) -> Self {
        match code {
            ResultCode::Forbidden => GatewayError::Forbidden(message),
            ResultCode::NotFound => GatewayError::NotFound(message),
            ResultCode::Rejected => GatewayError::Conflict(message),
            ResultCode::Ok | ResultCode::Unspecified => GatewayError::BadRequest(message),
        }
    }

    fn label(&self) -> &'static str {
        match self {
            GatewayError::Unauthenticated => "Unauthorized",
            GatewayError::Forbidden(_) => "Forbidden",
            GatewayError::BadRequest(_) => "Invalid request",
            GatewayError::NotFound(_) => "Not found",
            GatewayError::Conflict(_) => "Conflict",
            GatewayError::Upstream(_) => "Internal server error",
        }
    }
}

impl From<Status> for GatewayError {
    fn from(status: Status) -> Self {
        match status.code() {
            Code::Unauthenticated => GatewayError::Unauthenticated,
            Code::PermissionDenied => GatewayError::Forbidden(status.message().to_string()),
            Code::InvalidArgument => GatewayError::BadRequest(status.message().to_string()),
            Code::NotFound => GatewayError::NotFound(status.message().to_string()),
            _ => GatewayError::Upstream(status),
        }
    }
}

impl ResponseError for GatewayError {
    fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::Unauthenticated => StatusCode::UNAUTHORIZED,
            GatewayError::Forbidden(_) => StatusCode::FORBIDDEN,
            GatewayError::BadRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::NotFound(_) => StatusCode::NOT_FOUND,
            GatewayError::Conflict(_) => StatusCode::CONFLICT,
            GatewayError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            GatewayError::Unauthenticated => ErrorResponse::new(self.label()),
            GatewayError::Upstream(status) => {
                error!(code = ?status.code(), error = %status.message(), "Downstream call failed");
                ErrorResponse::new(self.label())
            }
            other => ErrorResponse::with_message(other.label(), other.to_string()),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (Status::unauthenticated("Unauthenticated"), StatusCode::UNAUTHORIZED),
            (Status::permission_denied("no"), StatusCode::FORBIDDEN),
            (Status::invalid_argument("bad date"), StatusCode::BAD_REQUEST),
            (Status::not_found("gone"), StatusCode::NOT_FOUND),
            (Status::unavailable("connection refused"), StatusCode::INTERNAL_SERVER_ERROR),
            (Status::deadline_exceeded("timeout"), StatusCode::INTERNAL_SERVER_ERROR),
            (Status::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (status, expected) in cases {
            assert_eq!(GatewayError::from(status).status_code(), expected);
        }
    }

    #[test]
    fn test_payload_mapping() {
        let forbidden = GatewayError::from_payload(ResultCode::Forbidden, "Access denied".into());
        assert_eq!(forbidden.status_code(), StatusCode::FORBIDDEN);

        let missing = GatewayError::from_payload(ResultCode::NotFound, "Vocabulary not found".into());
        assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);

        let rejected = GatewayError::from_payload(ResultCode::Rejected, "User already exists".into());
        assert_eq!(rejected.status_code(), StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn test_transport_failure_body_is_generic() {
        let err = GatewayError::from(Status::unavailable("dns error: identity.internal:50051"));
        let response = err.error_response();
        let body = actix_web::body::to_bytes(response.into_body()).await.unwrap();
        let text = std::str::from_utf8(&body).unwrap();

        assert!(text.contains("Internal server error"));
        assert!(!text.contains("identity.internal"));
    }
}
