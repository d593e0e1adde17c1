/// Identity Service Library
///
/// Registers users, issues credentials and answers verification requests
/// for the Vocal Tracker trust domain.
///
/// ## Modules
///
/// - `config`: Service configuration
/// - `db`: In-memory user repository
/// - `error`: Error types
/// - `grpc`: gRPC server implementation and authentication allowlist
/// - `models`: Data models
/// - `security`: Password hashing
/// - `validators`: Input validation
pub mod config;
pub mod db;
pub mod error;
pub mod grpc;
pub mod models;
pub mod security;
pub mod validators;

// Re-export commonly used types
pub use error::{IdentityError, Result};
pub use grpc::{auth_layer, IdentityGrpcService};
