/// User profile endpoint
///
/// GET /api/v1/users/{user_id}/profile
use actix_web::{web, HttpResponse};
use grpc_contracts::identity::GetProfileRequest;
use grpc_jwt_propagation::CredentialForwarder;

use super::models::ProfileResponse;
use crate::clients::ServiceClients;
use crate::error::GatewayError;

pub async fn get_profile(
    path: web::Path<u32>,
    forwarder: web::ReqData<CredentialForwarder>,
    clients: web::Data<ServiceClients>,
) -> Result<HttpResponse, GatewayError> {
    let target_user_id = path.into_inner();

    let response = clients
        .identity_client_as(forwarder.into_inner())
        .get_profile(GetProfileRequest { target_user_id })
        .await?
        .into_inner();

    if !response.success {
        return Err(GatewayError::from_payload(response.code(), response.message));
    }

    Ok(HttpResponse::Ok().json(ProfileResponse {
        success: true,
        message: response.message,
        user: response.user.map(Into::into),
    }))
}
