//! Server-side authentication
//!
//! Every inbound call is authenticated before its handler runs: extract the
//! bearer value, run the local [`CredentialVerifier`], and attach the
//! resulting [`Principal`] to the request extensions. Any failure ends the
//! call with `Unauthenticated` and the handler never executes.
//!
//! Two attachment points are provided:
//! - [`AuthInterceptor`] for services where every method is protected
//! - [`AuthLayer`] for servers that expose some public methods; it sees the
//!   method path and applies a deny-by-default allowlist

use crate::bearer::{bearer_token, AUTHORIZATION};
use crypto_core::{CredentialVerifier, Principal};
use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tonic::body::{empty_body, BoxBody};
use tonic::codegen::http;
use tonic::metadata::MetadataMap;
use tonic::service::Interceptor;
use tonic::{Request, Status};
use tower::{Layer, Service};
use tracing::{debug, warn};

/// Message returned for every authentication failure.
///
/// Missing header, bad signature and expiry look identical to the caller.
const UNAUTHENTICATED_MESSAGE: &str = "Unauthenticated";

/// Authenticate a raw `authorization` value.
pub fn authenticate(
    authorization: Option<&str>,
    verifier: &CredentialVerifier,
) -> Result<Principal, Status> {
    let header = authorization.ok_or_else(|| {
        warn!("Missing authorization header");
        Status::unauthenticated(UNAUTHENTICATED_MESSAGE)
    })?;

    let credential = bearer_token(header).ok_or_else(|| {
        warn!("Invalid authorization format (expected 'Bearer <credential>')");
        Status::unauthenticated(UNAUTHENTICATED_MESSAGE)
    })?;

    let principal = verifier.verify(credential).map_err(|kind| {
        warn!(reason = %kind, "Credential verification failed");
        Status::unauthenticated(UNAUTHENTICATED_MESSAGE)
    })?;

    debug!(user_id = principal.id, "Credential verified");
    Ok(principal)
}

/// Authenticate the `authorization` entry of gRPC metadata.
pub fn authenticate_metadata(
    metadata: &MetadataMap,
    verifier: &CredentialVerifier,
) -> Result<Principal, Status> {
    let value = metadata.get(AUTHORIZATION).map(|v| v.to_str());
    match value {
        Some(Err(_)) => {
            warn!("Invalid authorization header encoding");
            Err(Status::unauthenticated(UNAUTHENTICATED_MESSAGE))
        }
        Some(Ok(header)) => authenticate(Some(header), verifier),
        None => authenticate(None, verifier),
    }
}

// ============================================================================
// Interceptor
// ============================================================================

/// Interceptor that authenticates every call to the wrapped service
///
/// ## Usage
///
/// ```rust,ignore
/// let interceptor = AuthInterceptor::new(verifier);
/// let service = VocabularyServiceServer::with_interceptor(handler, interceptor);
/// ```
#[derive(Clone, Debug)]
pub struct AuthInterceptor {
    verifier: CredentialVerifier,
}

impl AuthInterceptor {
    pub fn new(verifier: CredentialVerifier) -> Self {
        Self { verifier }
    }
}

impl Interceptor for AuthInterceptor {
    fn call(&mut self, mut request: Request<()>) -> Result<Request<()>, Status> {
        let principal = authenticate_metadata(request.metadata(), &self.verifier)?;

        request.extensions_mut().insert(principal);

        Ok(request)
    }
}

// ============================================================================
// Allowlist layer
// ============================================================================

#[derive(Clone, Debug, Default)]
struct PublicMethods {
    /// Full method paths, e.g. `/pkg.Service/Method`
    methods: HashSet<String>,
    /// Fully qualified service names whose methods are all public
    services: HashSet<String>,
}

impl PublicMethods {
    fn contains(&self, path: &str) -> bool {
        if self.methods.contains(path) {
            return true;
        }
        path.strip_prefix('/')
            .and_then(|p| p.rsplit_once('/'))
            .map(|(service, _)| self.services.contains(service))
            .unwrap_or(false)
    }
}

/// Tower layer that authenticates every call not on its allowlist
///
/// Deny by default: a method is public only if it was added with
/// [`AuthLayer::allow_method`] or belongs to a service added with
/// [`AuthLayer::allow_service`].
#[derive(Clone, Debug)]
pub struct AuthLayer {
    verifier: CredentialVerifier,
    public: Arc<PublicMethods>,
}

impl AuthLayer {
    pub fn new(verifier: CredentialVerifier) -> Self {
        Self {
            verifier,
            public: Arc::new(PublicMethods::default()),
        }
    }

    /// Allow one method, given as its full path `/package.Service/Method`.
    pub fn allow_method(mut self, path: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.public).methods.insert(path.into());
        self
    }

    /// Allow every method of a service, e.g. `grpc.health.v1.Health`.
    pub fn allow_service(mut self, service: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.public).services.insert(service.into());
        self
    }

    pub fn is_public(&self, path: &str) -> bool {
        self.public.contains(path)
    }
}

impl<S> Layer<S> for AuthLayer {
    type Service = AuthService<S>;

    fn layer(&self, service: S) -> Self::Service {
        AuthService {
            inner: service,
            layer: self.clone(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AuthService<S> {
    inner: S,
    layer: AuthLayer,
}

fn unauthenticated_response() -> http::Response<BoxBody> {
    let mut response = http::Response::new(empty_body());
    let headers = response.headers_mut();
    headers.insert(
        http::header::CONTENT_TYPE,
        http::HeaderValue::from_static("application/grpc"),
    );
    headers.insert(
        "grpc-status",
        http::HeaderValue::from(tonic::Code::Unauthenticated as i32),
    );
    headers.insert(
        "grpc-message",
        http::HeaderValue::from_static(UNAUTHENTICATED_MESSAGE),
    );
    response
}

impl<S, ReqBody> Service<http::Request<ReqBody>> for AuthService<S>
where
    S: Service<http::Request<ReqBody>, Response = http::Response<BoxBody>> + Clone,
    S::Future: Send + 'static,
    S::Error: Send + 'static,
{
    type Response = http::Response<BoxBody>;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: http::Request<ReqBody>) -> Self::Future {
        // Only the instance driven by `poll_ready` may be called; a rejection
        // drops it and releases whatever it reserved.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        let path = req.uri().path();
        if self.layer.is_public(path) {
            debug!(method = %path, "Public method, skipping authentication");
            return Box::pin(inner.call(req));
        }

        let authorization = req
            .headers()
            .get(AUTHORIZATION)
            .map(|v| v.to_str().map_err(|_| ()));
        let result = match authorization {
            Some(Err(())) => {
                warn!(method = %path, "Invalid authorization header encoding");
                Err(Status::unauthenticated(UNAUTHENTICATED_MESSAGE))
            }
            Some(Ok(header)) => authenticate(Some(header), &self.layer.verifier),
            None => authenticate(None, &self.layer.verifier),
        };

        match result {
            Ok(principal) => {
                req.extensions_mut().insert(principal);
                Box::pin(inner.call(req))
            }
            Err(_) => {
                drop(inner);
                Box::pin(async { Ok(unauthenticated_response()) })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crypto_core::{CredentialIssuer, SigningSecret};
    use std::convert::Infallible;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tonic::metadata::MetadataValue;
    use tower::ServiceExt;

    const TEST_SECRET: &str = "server-test-secret-0123456789abcdefghij";
    const REGISTER: &str = "/vocaltracker.identity.IdentityService/Register";
    const GET_PROFILE: &str = "/vocaltracker.identity.IdentityService/GetProfile";

    fn keys() -> (CredentialIssuer, CredentialVerifier) {
        let secret = SigningSecret::new(TEST_SECRET).unwrap();
        (
            CredentialIssuer::new(secret.clone()),
            CredentialVerifier::new(secret),
        )
    }

    fn bearer(credential: &str) -> String {
        format!("Bearer {}", credential)
    }

    #[test]
    fn test_missing_header_is_unauthenticated() {
        let (_, verifier) = keys();
        let status = authenticate_metadata(&MetadataMap::new(), &verifier).unwrap_err();
        assert_eq!(status.code(), tonic::Code::Unauthenticated);
    }

    #[test]
    fn test_failures_are_indistinguishable() {
        let (issuer, verifier) = keys();
        let expired = issuer
            .issue_at(&Principal::new(5, "a@b.com"), 1_000_000)
            .unwrap();
        let valid = issuer.issue(&Principal::new(5, "a@b.com")).unwrap();
        let mut tampered = valid.clone().into_bytes();
        let last = tampered.len() - 1;
        tampered[last] = if tampered[last] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(tampered).unwrap();

        let messages: Vec<String> = [
            None,
            Some("InvalidFormat".to_string()),
            Some(bearer("abc")),
            Some(bearer(&expired)),
            Some(bearer(&tampered)),
        ]
        .iter()
        .map(|header| {
            let status = authenticate(header.as_deref(), &verifier).unwrap_err();
            assert_eq!(status.code(), tonic::Code::Unauthenticated);
            status.message().to_string()
        })
        .collect();

        assert!(messages.iter().all(|m| m == UNAUTHENTICATED_MESSAGE));
    }

    #[test]
    fn test_interceptor_stores_principal_in_extensions() {
        let (issuer, verifier) = keys();
        let credential = issuer.issue(&Principal::new(5, "a@b.com")).unwrap();

        let mut request = Request::new(());
        request
            .metadata_mut()
            .insert(AUTHORIZATION, bearer(&credential).parse().unwrap());

        let mut interceptor = AuthInterceptor::new(verifier);
        let request = interceptor.call(request).unwrap();

        let principal = request.extensions().get::<Principal>().unwrap();
        assert_eq!(principal, &Principal::new(5, "a@b.com"));
    }

    #[test]
    fn test_interceptor_rejects_invalid_format() {
        let (_, verifier) = keys();
        let mut request = Request::new(());
        request
            .metadata_mut()
            .insert(AUTHORIZATION, MetadataValue::from_static("InvalidFormat"));

        let status = AuthInterceptor::new(verifier).call(request).unwrap_err();
        assert_eq!(status.code(), tonic::Code::Unauthenticated);
    }

    #[test]
    fn test_allowlist_matching() {
        let (_, verifier) = keys();
        let layer = AuthLayer::new(verifier)
            .allow_method(REGISTER)
            .allow_service("grpc.health.v1.Health");

        assert!(layer.is_public(REGISTER));
        assert!(layer.is_public("/grpc.health.v1.Health/Check"));
        assert!(layer.is_public("/grpc.health.v1.Health/Watch"));
        assert!(!layer.is_public(GET_PROFILE));
        assert!(!layer.is_public("/grpc.health.v1.Healthz/Check"));
        assert!(!layer.is_public(""));
    }

    #[test]
    fn test_allowlist_clones_do_not_share_mutations() {
        let (_, verifier) = keys();
        let base = AuthLayer::new(verifier);
        let extended = base.clone().allow_method(GET_PROFILE);

        assert!(extended.is_public(GET_PROFILE));
        assert!(!base.is_public(GET_PROFILE));
    }

    /// Inner service that echoes the authenticated principal id, 0 if none
    async fn echo_principal(req: http::Request<()>) -> Result<http::Response<BoxBody>, Infallible> {
        let id = req.extensions().get::<Principal>().map(|p| p.id).unwrap_or(0);
        let mut response = http::Response::new(empty_body());
        response
            .headers_mut()
            .insert("x-principal-id", http::HeaderValue::from(id));
        Ok(response)
    }

    fn grpc_request(path: &str, authorization: Option<&str>) -> http::Request<()> {
        let mut builder = http::Request::builder().uri(format!("http://localhost{}", path));
        if let Some(value) = authorization {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(()).unwrap()
    }

    fn header<'a>(response: &'a http::Response<BoxBody>, name: &str) -> Option<&'a str> {
        response.headers().get(name).and_then(|v| v.to_str().ok())
    }

    #[tokio::test]
    async fn test_layer_passes_public_method_without_credential() {
        let (_, verifier) = keys();
        let service = AuthLayer::new(verifier)
            .allow_method(REGISTER)
            .layer(tower::service_fn(echo_principal));

        let response = service.oneshot(grpc_request(REGISTER, None)).await.unwrap();

        assert_eq!(header(&response, "grpc-status"), None);
        assert_eq!(header(&response, "x-principal-id"), Some("0"));
    }

    #[tokio::test]
    async fn test_layer_rejects_protected_method_without_reaching_handler() {
        let (_, verifier) = keys();
        let service = AuthLayer::new(verifier)
            .allow_method(REGISTER)
            .layer(tower::service_fn(echo_principal));

        let response = service.oneshot(grpc_request(GET_PROFILE, None)).await.unwrap();

        assert_eq!(header(&response, "grpc-status"), Some("16"));
        assert_eq!(header(&response, "x-principal-id"), None);
    }

    #[tokio::test]
    async fn test_layer_injects_principal_for_protected_method() {
        let (issuer, verifier) = keys();
        let credential = issuer.issue(&Principal::new(5, "a@b.com")).unwrap();
        let service = AuthLayer::new(verifier).layer(tower::service_fn(echo_principal));

        let response = service
            .oneshot(grpc_request(GET_PROFILE, Some(&bearer(&credential))))
            .await
            .unwrap();

        assert_eq!(header(&response, "grpc-status"), None);
        assert_eq!(header(&response, "x-principal-id"), Some("5"));
    }

    /// Inner service holding one slot between `poll_ready` and `call`
    struct Reserving {
        reserved: Arc<AtomicUsize>,
        holding: bool,
    }

    impl Clone for Reserving {
        fn clone(&self) -> Self {
            Self {
                reserved: self.reserved.clone(),
                holding: false,
            }
        }
    }

    impl Drop for Reserving {
        fn drop(&mut self) {
            if self.holding {
                self.reserved.fetch_sub(1, Ordering::SeqCst);
            }
        }
    }

    impl Service<http::Request<()>> for Reserving {
        type Response = http::Response<BoxBody>;
        type Error = Infallible;
        type Future = std::future::Ready<Result<Self::Response, Self::Error>>;

        fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            if !self.holding {
                self.holding = true;
                self.reserved.fetch_add(1, Ordering::SeqCst);
            }
            Poll::Ready(Ok(()))
        }

        fn call(&mut self, _req: http::Request<()>) -> Self::Future {
            assert!(self.holding, "called without poll_ready");
            self.holding = false;
            self.reserved.fetch_sub(1, Ordering::SeqCst);
            std::future::ready(Ok(http::Response::new(empty_body())))
        }
    }

    #[tokio::test]
    async fn test_rejection_releases_reserved_inner_slot() {
        let (_, verifier) = keys();
        let reserved = Arc::new(AtomicUsize::new(0));
        let mut service = AuthLayer::new(verifier)
            .allow_method(REGISTER)
            .layer(Reserving {
                reserved: reserved.clone(),
                holding: false,
            });

        service.ready().await.unwrap();
        assert_eq!(reserved.load(Ordering::SeqCst), 1);

        let response = service.call(grpc_request(GET_PROFILE, None)).await.unwrap();
        assert_eq!(header(&response, "grpc-status"), Some("16"));
        assert_eq!(reserved.load(Ordering::SeqCst), 0);

        // The replacement instance is polled again before the next call.
        service.ready().await.unwrap();
        let response = service.call(grpc_request(REGISTER, None)).await.unwrap();
        assert_eq!(header(&response, "grpc-status"), None);
        assert_eq!(reserved.load(Ordering::SeqCst), 0);
    }
}
