/// gRPC server module for vocabulary-service
pub mod server;

pub use server::{vocabulary_server, VocabularyGrpcService};
