/// gRPC server implementation for vocabulary-service
///
/// Every method is authenticated by [`AuthInterceptor`] and starts with an
/// ownership check against `target_user_id`. Nothing is read or written
/// until that check passes.
use crate::db::VocabularyStore;
use crate::error::VocabularyError;
use crate::models::{ListFilter, NewVocabulary, VocabularyChanges};
use crypto_core::CredentialVerifier;
use grpc_contracts::vocabulary::vocabulary_service_server::{
    VocabularyService, VocabularyServiceServer,
};
use grpc_contracts::vocabulary::*;
use grpc_jwt_propagation::{AuthInterceptor, PrincipalExt};
use tonic::codegen::InterceptedService;
use tonic::{Request, Response, Status};
use tracing::{error, info};

/// Vocabulary server with authentication in front of every method
pub fn vocabulary_server(
    service: VocabularyGrpcService,
    verifier: CredentialVerifier,
) -> InterceptedService<VocabularyServiceServer<VocabularyGrpcService>, AuthInterceptor> {
    VocabularyServiceServer::with_interceptor(service, AuthInterceptor::new(verifier))
}

/// Responses that can carry a refused outcome in the payload
trait FailedReply: Default {
    fn failed(code: ResultCode, message: String) -> Self;
}

macro_rules! impl_failed_reply {
    ($($response:ty),* $(,)?) => {
        $(
            impl FailedReply for $response {
                fn failed(code: ResultCode, message: String) -> Self {
                    Self {
                        success: false,
                        message,
                        code: code as i32,
                        ..Default::default()
                    }
                }
            }
        )*
    };
}

impl_failed_reply!(
    ListVocabulariesResponse,
    VocabularyResponse,
    DeleteVocabularyResponse,
    GetVocabularyStatsResponse,
);

/// Forbidden and not-found become failed payloads; the rest are statuses.
fn reply<R: FailedReply>(result: Result<R, VocabularyError>) -> Result<Response<R>, Status> {
    match result {
        Ok(response) => Ok(Response::new(response)),
        Err(e) => match e.result_code() {
            Some(code) => Ok(Response::new(R::failed(code, e.public_message()))),
            None => {
                if let VocabularyError::Internal(detail) = &e {
                    error!(error = %detail, "Vocabulary request failed");
                }
                Err(e.to_status())
            }
        },
    }
}

fn entry_response(entry: &crate::models::Vocabulary, message: &str) -> VocabularyResponse {
    VocabularyResponse {
        success: true,
        message: message.to_string(),
        code: ResultCode::Ok as i32,
        vocabulary: Some(entry.to_message()),
    }
}

/// Vocabulary service gRPC server
#[derive(Clone, Default)]
pub struct VocabularyGrpcService {
    store: VocabularyStore,
}

impl VocabularyGrpcService {
    pub fn new(store: VocabularyStore) -> Self {
        Self { store }
    }

    async fn list(
        &self,
        request: Request<ListVocabulariesRequest>,
    ) -> Result<ListVocabulariesResponse, VocabularyError> {
        let owner = request.require_ownership(request.get_ref().target_user_id)?.id;
        let filter = ListFilter::from_request(request.get_ref())?;

        let page = self.store.list(owner, &filter).await;
        Ok(ListVocabulariesResponse {
            success: true,
            message: "Vocabularies retrieved successfully".to_string(),
            code: ResultCode::Ok as i32,
            count: page.items.len() as u32,
            total: page.total as u32,
            vocabularies: page.items.iter().map(|v| v.to_message()).collect(),
        })
    }

    async fn get(
        &self,
        request: Request<GetVocabularyRequest>,
    ) -> Result<VocabularyResponse, VocabularyError> {
        let owner = request.require_ownership(request.get_ref().target_user_id)?.id;
        let entry = self
            .store
            .get(owner, request.get_ref().vocabulary_id)
            .await
            .ok_or(VocabularyError::NotFound)?;

        Ok(entry_response(&entry, "Vocabulary retrieved successfully"))
    }

    async fn create(
        &self,
        request: Request<CreateVocabularyRequest>,
    ) -> Result<VocabularyResponse, VocabularyError> {
        let owner = request.require_ownership(request.get_ref().target_user_id)?.id;
        let new = NewVocabulary::from_request(request.into_inner())?;

        let entry = self.store.create(owner, new).await?;
        info!(user_id = owner, vocabulary_id = entry.id, "Vocabulary created");
        Ok(entry_response(&entry, "Vocabulary created successfully"))
    }

    async fn update(
        &self,
        request: Request<UpdateVocabularyRequest>,
    ) -> Result<VocabularyResponse, VocabularyError> {
        let owner = request.require_ownership(request.get_ref().target_user_id)?.id;
        let req = request.into_inner();
        let id = req.vocabulary_id;

        let entry = self
            .store
            .update(owner, id, VocabularyChanges::from_request(req))
            .await?;
        info!(user_id = owner, vocabulary_id = id, "Vocabulary updated");
        Ok(entry_response(&entry, "Vocabulary updated successfully"))
    }

    async fn delete(
        &self,
        request: Request<DeleteVocabularyRequest>,
    ) -> Result<DeleteVocabularyResponse, VocabularyError> {
        let owner = request.require_ownership(request.get_ref().target_user_id)?.id;
        let id = request.get_ref().vocabulary_id;

        self.store.delete(owner, id).await?;
        info!(user_id = owner, vocabulary_id = id, "Vocabulary deleted");
        Ok(DeleteVocabularyResponse {
            success: true,
            message: "Vocabulary deleted successfully".to_string(),
            code: ResultCode::Ok as i32,
        })
    }

    async fn stats(
        &self,
        request: Request<GetVocabularyStatsRequest>,
    ) -> Result<GetVocabularyStatsResponse, VocabularyError> {
        let owner = request.require_ownership(request.get_ref().target_user_id)?.id;

        let stats = self.store.stats(owner).await;
        Ok(GetVocabularyStatsResponse {
            success: true,
            message: "Statistics retrieved successfully".to_string(),
            code: ResultCode::Ok as i32,
            stats: Some(stats.to_message()),
        })
    }
}

#[tonic::async_trait]
impl VocabularyService for VocabularyGrpcService {
    async fn list_vocabularies(
        &self,
        request: Request<ListVocabulariesRequest>,
    ) -> Result<Response<ListVocabulariesResponse>, Status> {
        reply(self.list(request).await)
    }

    async fn get_vocabulary(
        &self,
        request: Request<GetVocabularyRequest>,
    ) -> Result<Response<VocabularyResponse>, Status> {
        reply(self.get(request).await)
    }

    async fn create_vocabulary(
        &self,
        request: Request<CreateVocabularyRequest>,
    ) -> Result<Response<VocabularyResponse>, Status> {
        reply(self.create(request).await)
    }

    async fn update_vocabulary(
        &self,
        request: Request<UpdateVocabularyRequest>,
    ) -> Result<Response<VocabularyResponse>, Status> {
        reply(self.update(request).await)
    }

    async fn delete_vocabulary(
        &self,
        request: Request<DeleteVocabularyRequest>,
    ) -> Result<Response<DeleteVocabularyResponse>, Status> {
        reply(self.delete(request).await)
    }

    async fn get_vocabulary_stats(
        &self,
        request: Request<GetVocabularyStatsRequest>,
    ) -> Result<Response<GetVocabularyStatsResponse>, Status> {
        reply(self.stats(request).await)
    }
}
