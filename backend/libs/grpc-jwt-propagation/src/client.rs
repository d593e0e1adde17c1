//! Client-side credential forwarding
//!
//! The gateway never inspects the credential it forwards. Whatever bearer
//! value the caller presented is copied verbatim into the outgoing call's
//! `authorization` metadata, and the downstream service decides.

use crate::bearer::AUTHORIZATION;
use tonic::metadata::{AsciiMetadataValue, MetadataMap};
use tonic::service::Interceptor;
use tonic::{Request, Status};

/// Client-side interceptor that copies the caller's bearer header into gRPC metadata
///
/// ## Usage
///
/// ```rust,no_run
/// use grpc_jwt_propagation::CredentialForwarder;
/// use tonic::transport::Channel;
///
/// # fn example() -> Result<(), tonic::Status> {
/// // Inbound HTTP header, untouched
/// let forwarder = CredentialForwarder::from_authorization("Bearer eyJ1c2VyX2lk.c2ln")?;
///
/// let channel = Channel::from_static("http://[::1]:50052").connect_lazy();
/// // let mut client = VocabularyServiceClient::with_interceptor(channel, forwarder);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct CredentialForwarder {
    /// Inbound header value, copied as-is
    auth_header: AsciiMetadataValue,
}

impl CredentialForwarder {
    /// Create a forwarder from a raw inbound `Authorization` header value.
    ///
    /// ## Errors
    ///
    /// Returns `Status::unauthenticated` unless the value is printable ASCII.
    /// A valid credential never hits this.
    pub fn from_authorization(header: &str) -> Result<Self, Status> {
        // Metadata values also admit obs-text (>= 0x80); credentials never contain it.
        if !header.bytes().all(|b| b.is_ascii_graphic() || b == b' ') {
            return Err(Status::unauthenticated("Invalid authorization header"));
        }
        let auth_header = AsciiMetadataValue::try_from(header)
            .map_err(|_| Status::unauthenticated("Invalid authorization header"))?;
        Ok(Self { auth_header })
    }

    /// Outbound call metadata carrying the forwarded header.
    pub fn forward(&self) -> MetadataMap {
        let mut metadata = MetadataMap::new();
        metadata.insert(AUTHORIZATION, self.auth_header.clone());
        metadata
    }
}

impl Interceptor for CredentialForwarder {
    fn call(&mut self, mut request: Request<()>) -> Result<Request<()>, Status> {
        request
            .metadata_mut()
            .insert(AUTHORIZATION, self.auth_header.clone());

        Ok(request)
    }
}
