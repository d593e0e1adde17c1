//! Vocabulary Service Library
//!
//! Owns per-user vocabulary entries. Callers are authenticated locally from
//! the forwarded credential and may only touch their own entries.

pub mod config;
pub mod db;
pub mod error;
pub mod grpc;
pub mod models;

pub use error::{Result, VocabularyError};
pub use grpc::{vocabulary_server, VocabularyGrpcService};
