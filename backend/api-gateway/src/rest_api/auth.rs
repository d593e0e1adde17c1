/// Authentication API endpoints
///
/// POST /api/v1/auth/register - Register new user
/// POST /api/v1/auth/login - Login user
/// GET /api/v1/auth/verify - Check the presented credential
use actix_web::{http::header, web, HttpRequest, HttpResponse};
use grpc_contracts::identity::{
    IssueCredentialRequest, RegisterRequest as GrpcRegisterRequest, VerifyCredentialRequest,
};
use grpc_contracts::ResultCode;
use grpc_jwt_propagation::bearer_token;
use tracing::{info, warn};

use super::models::{AuthResponse, LoginRequest, RegisterRequest, VerifyResponse};
use crate::clients::ServiceClients;
use crate::error::GatewayError;

fn auth_response(response: grpc_contracts::identity::AuthResponse) -> AuthResponse {
    AuthResponse {
        success: response.success,
        message: response.message,
        token: response.credential,
        user: response.principal.map(Into::into),
    }
}

/// POST /api/v1/auth/register
pub async fn register(
    req: web::Json<RegisterRequest>,
    clients: web::Data<ServiceClients>,
) -> Result<HttpResponse, GatewayError> {
    info!("POST /api/v1/auth/register");

    let req = req.into_inner();
    let response = clients
        .identity_client()
        .register(GrpcRegisterRequest {
            email: req.email,
            password: req.password,
        })
        .await?
        .into_inner();

    if !response.success {
        return Err(GatewayError::from_payload(response.code(), response.message));
    }

    info!(
        user_id = response.principal.as_ref().map(|p| p.id),
        "User registered successfully"
    );
    Ok(HttpResponse::Created().json(auth_response(response)))
}

/// POST /api/v1/auth/login
pub async fn login(
    req: web::Json<LoginRequest>,
    clients: web::Data<ServiceClients>,
) -> Result<HttpResponse, GatewayError> {
    info!("POST /api/v1/auth/login");

    let req = req.into_inner();
    let response = clients
        .identity_client()
        .issue_credential(IssueCredentialRequest {
            email: req.email,
            password: req.password,
        })
        .await?
        .into_inner();

    if !response.success {
        warn!("Login failed");
        return Err(match response.code() {
            ResultCode::Rejected => GatewayError::Unauthenticated,
            code => GatewayError::from_payload(code, response.message),
        });
    }

    Ok(HttpResponse::Ok().json(auth_response(response)))
}

/// GET /api/v1/auth/verify
///
/// Behind the bearer presence check; the identity service does the actual
/// verification.
pub async fn verify(
    req: HttpRequest,
    clients: web::Data<ServiceClients>,
) -> Result<HttpResponse, GatewayError> {
    let credential = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(bearer_token)
        .ok_or(GatewayError::Unauthenticated)?
        .to_string();

    let response = clients
        .identity_client()
        .verify_credential(VerifyCredentialRequest { credential })
        .await?
        .into_inner();

    if !response.valid {
        return Err(GatewayError::Unauthenticated);
    }

    Ok(HttpResponse::Ok().json(VerifyResponse {
        valid: true,
        message: response.message,
        user: response.principal.map(Into::into),
    }))
}
