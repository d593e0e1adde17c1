/// gRPC Contracts Library
///
/// Wire contracts shared by every Vocal Tracker service and the gateway:
/// - Protobuf messages for the identity and vocabulary services
/// - Generated tonic clients and servers (see `build.rs`)
/// - Client channel configuration for the gateway
pub mod common;
pub mod config;
pub mod identity;
pub mod vocabulary;

pub use common::ResultCode;
pub use config::GrpcConfig;
