/// gRPC server module for identity-service
///
/// Exports:
/// - IdentityGrpcService: Main gRPC server implementation
/// - PUBLIC_METHODS / auth_layer: which methods skip authentication
pub mod server;

pub use server::{auth_layer, IdentityGrpcService, PUBLIC_METHODS};
