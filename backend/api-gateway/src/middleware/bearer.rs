//! Bearer presence check for protected routes
//!
//! The gateway does not verify credentials. It only refuses requests that
//! cannot possibly carry one and hands the raw header to the handlers as a
//! [`CredentialForwarder`] request extension.

use crate::error::GatewayError;
use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    Error, HttpMessage, ResponseError,
};
use futures_util::future::LocalBoxFuture;
use grpc_jwt_propagation::{bearer_token, CredentialForwarder};
use std::future::{ready, Ready};
use tracing::debug;

/// Middleware requiring `Authorization: Bearer <non-empty>`
#[derive(Clone, Copy, Debug, Default)]
pub struct RequireBearer;

impl<S, B> Transform<S, ServiceRequest> for RequireBearer
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireBearerService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireBearerService { service }))
    }
}

pub struct RequireBearerService<S> {
    service: S,
}

fn forwarder_for(req: &ServiceRequest) -> Option<CredentialForwarder> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    bearer_token(value)?;
    CredentialForwarder::from_authorization(value).ok()
}

impl<S, B> Service<ServiceRequest> for RequireBearerService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let Some(forwarder) = forwarder_for(&req) else {
            debug!(path = %req.path(), "Rejected request without bearer credential");
            let response = GatewayError::Unauthenticated.error_response();
            return Box::pin(async move { Ok(req.into_response(response).map_into_right_body()) });
        };

        req.extensions_mut().insert(forwarder);

        let fut = self.service.call(req);
        Box::pin(async move { Ok(fut.await?.map_into_left_body()) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, web, App, HttpResponse};
    use grpc_jwt_propagation::AUTHORIZATION;

    async fn echo_forwarded(forwarder: web::ReqData<CredentialForwarder>) -> HttpResponse {
        let metadata = forwarder.forward();
        let header = metadata
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        HttpResponse::Ok().body(header)
    }

    #[actix_web::test]
    async fn test_rejects_missing_or_malformed_header() {
        let app = test::init_service(
            App::new().service(
                web::resource("/protected")
                    .wrap(RequireBearer)
                    .route(web::get().to(echo_forwarded)),
            ),
        )
        .await;

        let missing = test::TestRequest::get().uri("/protected").to_request();
        assert_eq!(test::call_service(&app, missing).await.status(), StatusCode::UNAUTHORIZED);

        for value in ["Bearer", "Bearer    ", "Basic dXNlcjpwYXNz", "abc.def"] {
            let req = test::TestRequest::get()
                .uri("/protected")
                .insert_header((header::AUTHORIZATION, value))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "header {:?}", value);
        }
    }

    #[actix_web::test]
    async fn test_forwards_header_verbatim() {
        let app = test::init_service(
            App::new().service(
                web::resource("/protected")
                    .wrap(RequireBearer)
                    .route(web::get().to(echo_forwarded)),
            ),
        )
        .await;

        // Not a valid credential; the gateway does not care.
        let req = test::TestRequest::get()
            .uri("/protected")
            .insert_header((header::AUTHORIZATION, "Bearer not.verified"))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, web::Bytes::from_static(b"Bearer not.verified"));
    }
}
