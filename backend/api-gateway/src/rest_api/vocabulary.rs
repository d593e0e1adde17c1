/// Vocabulary API endpoints
///
/// GET    /api/v1/users/{user_id}/vocabularies
/// POST   /api/v1/users/{user_id}/vocabularies
/// GET    /api/v1/users/{user_id}/vocabularies/stats
/// GET    /api/v1/users/{user_id}/vocabularies/{vocabulary_id}
/// PUT    /api/v1/users/{user_id}/vocabularies/{vocabulary_id}
/// DELETE /api/v1/users/{user_id}/vocabularies/{vocabulary_id}
///
/// The path user id becomes `target_user_id`; the vocabulary service decides
/// whether the forwarded credential may act on it.
use actix_web::{web, HttpResponse};
use grpc_contracts::vocabulary as pb;
use grpc_contracts::ResultCode;
use grpc_jwt_propagation::CredentialForwarder;
use tracing::info;

use super::models::{
    CreateVocabularyRequest, DeleteResponse, StatsResponse, UpdateVocabularyRequest,
    VocabularyListQuery, VocabularyListResponse, VocabularyResponse,
};
use crate::clients::ServiceClients;
use crate::error::GatewayError;

fn ensure_success(success: bool, code: ResultCode, message: &str) -> Result<(), GatewayError> {
    if success {
        Ok(())
    } else {
        Err(GatewayError::from_payload(code, message.to_string()))
    }
}

fn entry_response(response: pb::VocabularyResponse) -> Result<VocabularyResponse, GatewayError> {
    ensure_success(response.success, response.code(), &response.message)?;
    Ok(VocabularyResponse {
        success: true,
        message: response.message,
        vocabulary: response.vocabulary.map(Into::into),
    })
}

pub async fn list(
    path: web::Path<u32>,
    query: web::Query<VocabularyListQuery>,
    forwarder: web::ReqData<CredentialForwarder>,
    clients: web::Data<ServiceClients>,
) -> Result<HttpResponse, GatewayError> {
    let request = query.into_inner().into_request(path.into_inner());

    let response = clients
        .vocabulary_client_as(forwarder.into_inner())
        .list_vocabularies(request)
        .await?
        .into_inner();
    ensure_success(response.success, response.code(), &response.message)?;

    Ok(HttpResponse::Ok().json(VocabularyListResponse {
        success: true,
        message: response.message,
        count: response.count,
        total: response.total,
        vocabularies: response.vocabularies.into_iter().map(Into::into).collect(),
    }))
}

pub async fn create(
    path: web::Path<u32>,
    body: web::Json<CreateVocabularyRequest>,
    forwarder: web::ReqData<CredentialForwarder>,
    clients: web::Data<ServiceClients>,
) -> Result<HttpResponse, GatewayError> {
    let target_user_id = path.into_inner();
    let body = body.into_inner();

    let response = clients
        .vocabulary_client_as(forwarder.into_inner())
        .create_vocabulary(pb::CreateVocabularyRequest {
            target_user_id,
            word: body.word,
            meaning: body.meaning,
            example: body.example,
            date: body.date,
            status: body.status,
        })
        .await?
        .into_inner();

    let response = entry_response(response)?;
    info!(user_id = target_user_id, "Vocabulary created");
    Ok(HttpResponse::Created().json(response))
}

pub async fn get(
    path: web::Path<(u32, u64)>,
    forwarder: web::ReqData<CredentialForwarder>,
    clients: web::Data<ServiceClients>,
) -> Result<HttpResponse, GatewayError> {
    let (target_user_id, vocabulary_id) = path.into_inner();

    let response = clients
        .vocabulary_client_as(forwarder.into_inner())
        .get_vocabulary(pb::GetVocabularyRequest {
            target_user_id,
            vocabulary_id,
        })
        .await?
        .into_inner();

    Ok(HttpResponse::Ok().json(entry_response(response)?))
}

pub async fn update(
    path: web::Path<(u32, u64)>,
    body: web::Json<UpdateVocabularyRequest>,
    forwarder: web::ReqData<CredentialForwarder>,
    clients: web::Data<ServiceClients>,
) -> Result<HttpResponse, GatewayError> {
    let (target_user_id, vocabulary_id) = path.into_inner();
    let body = body.into_inner();

    let response = clients
        .vocabulary_client_as(forwarder.into_inner())
        .update_vocabulary(pb::UpdateVocabularyRequest {
            target_user_id,
            vocabulary_id,
            word: body.word,
            meaning: body.meaning,
            example: body.example,
            status: body.status,
        })
        .await?
        .into_inner();

    Ok(HttpResponse::Ok().json(entry_response(response)?))
}

pub async fn delete(
    path: web::Path<(u32, u64)>,
    forwarder: web::ReqData<CredentialForwarder>,
    clients: web::Data<ServiceClients>,
) -> Result<HttpResponse, GatewayError> {
    let (target_user_id, vocabulary_id) = path.into_inner();

    let response = clients
        .vocabulary_client_as(forwarder.into_inner())
        .delete_vocabulary(pb::DeleteVocabularyRequest {
            target_user_id,
            vocabulary_id,
        })
        .await?
        .into_inner();
    ensure_success(response.success, response.code(), &response.message)?;

    Ok(HttpResponse::Ok().json(DeleteResponse {
        success: true,
        message: response.message,
    }))
}

pub async fn stats(
    path: web::Path<u32>,
    forwarder: web::ReqData<CredentialForwarder>,
    clients: web::Data<ServiceClients>,
) -> Result<HttpResponse, GatewayError> {
    let target_user_id = path.into_inner();

    let response = clients
        .vocabulary_client_as(forwarder.into_inner())
        .get_vocabulary_stats(pb::GetVocabularyStatsRequest { target_user_id })
        .await?
        .into_inner();
    ensure_success(response.success, response.code(), &response.message)?;

    Ok(HttpResponse::Ok().json(StatsResponse {
        success: true,
        message: response.message,
        stats: response.stats.map(Into::into),
    }))
}
