/// gRPC client configuration
///
/// Endpoint settings the gateway uses to reach the identity and vocabulary
/// services. Every call gets a bounded connect and request timeout; there is
/// no retry layer, so a timeout surfaces to the caller as a transport error.
use std::env;
use std::time::Duration;

use tonic::transport::{Channel, Endpoint};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrpcConfig {
    /// Identity Service endpoint
    pub identity_service_url: String,

    /// Vocabulary Service endpoint
    pub vocabulary_service_url: String,

    /// gRPC connection timeout in seconds
    pub connection_timeout_secs: u64,

    /// gRPC request timeout in seconds
    pub request_timeout_secs: u64,
}

impl GrpcConfig {
    /// Load configuration from environment variables
    /// Falls back to defaults for development
    pub fn from_env() -> Self {
        let defaults = Self::development();
        Self {
            identity_service_url: env::var("IDENTITY_SERVICE_URL")
                .unwrap_or(defaults.identity_service_url),
            vocabulary_service_url: env::var("VOCABULARY_SERVICE_URL")
                .unwrap_or(defaults.vocabulary_service_url),
            connection_timeout_secs: env::var("GRPC_CONNECTION_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.connection_timeout_secs),
            request_timeout_secs: env::var("GRPC_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.request_timeout_secs),
        }
    }

    /// Configuration for development/testing
    pub fn development() -> Self {
        Self {
            identity_service_url: "http://127.0.0.1:50051".to_string(),
            vocabulary_service_url: "http://127.0.0.1:50052".to_string(),
            connection_timeout_secs: 5,
            request_timeout_secs: 10,
        }
    }

    /// Build a tonic Endpoint from URL with connect and request timeouts
    pub fn make_endpoint(&self, url: &str) -> Result<Endpoint, tonic::transport::Error> {
        Ok(Endpoint::from_shared(url.to_string())?
            .connect_timeout(Duration::from_secs(self.connection_timeout_secs))
            .timeout(Duration::from_secs(self.request_timeout_secs))
            .tcp_nodelay(true))
    }

    /// Create a channel that connects on first use.
    ///
    /// The gateway can start before its peers; an unreachable peer shows up
    /// as a failed call, not a startup failure.
    pub fn lazy_channel(&self, url: &str) -> Result<Channel, tonic::transport::Error> {
        let channel = self.make_endpoint(url)?.connect_lazy();
        tracing::debug!(url = %url, "Configured lazy gRPC channel");
        Ok(channel)
    }
}
