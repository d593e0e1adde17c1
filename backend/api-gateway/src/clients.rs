//! gRPC service clients
//!
//! Channels are created lazily and shared: tonic multiplexes every call over
//! one HTTP/2 connection per peer. Protected calls get a fresh client wrapping
//! the caller's [`CredentialForwarder`], so credentials never leak between
//! requests.

use grpc_contracts::identity::identity_service_client::IdentityServiceClient;
use grpc_contracts::vocabulary::vocabulary_service_client::VocabularyServiceClient;
use grpc_contracts::GrpcConfig;
use grpc_jwt_propagation::CredentialForwarder;
use tonic::codegen::InterceptedService;
use tonic::transport::Channel;

pub type ForwardingChannel = InterceptedService<Channel, CredentialForwarder>;

#[derive(Clone, Debug)]
pub struct ServiceClients {
    identity_channel: Channel,
    vocabulary_channel: Channel,
}

impl ServiceClients {
    pub fn new(config: &GrpcConfig) -> Result<Self, tonic::transport::Error> {
        Ok(Self {
            identity_channel: config.lazy_channel(&config.identity_service_url)?,
            vocabulary_channel: config.lazy_channel(&config.vocabulary_service_url)?,
        })
    }

    /// Client for the public identity methods
    pub fn identity_client(&self) -> IdentityServiceClient<Channel> {
        IdentityServiceClient::new(self.identity_channel.clone())
    }

    /// Identity client that forwards the caller's credential
    pub fn identity_client_as(
        &self,
        forwarder: CredentialForwarder,
    ) -> IdentityServiceClient<ForwardingChannel> {
        IdentityServiceClient::with_interceptor(self.identity_channel.clone(), forwarder)
    }

    pub fn vocabulary_client_as(
        &self,
        forwarder: CredentialForwarder,
    ) -> VocabularyServiceClient<ForwardingChannel> {
        VocabularyServiceClient::with_interceptor(self.vocabulary_channel.clone(), forwarder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_clients_build_without_peers() {
        let clients = ServiceClients::new(&GrpcConfig::development()).unwrap();
        let forwarder = CredentialForwarder::from_authorization("Bearer abc.def").unwrap();

        let _ = clients.identity_client();
        let _ = clients.identity_client_as(forwarder.clone());
        let _ = clients.vocabulary_client_as(forwarder);
    }

    #[tokio::test]
    async fn test_invalid_url_rejected() {
        let mut config = GrpcConfig::development();
        config.vocabulary_service_url = "not a url".to_string();
        assert!(ServiceClients::new(&config).is_err());
    }
}
