//! HTTP middleware for the gateway
pub mod bearer;

pub use bearer::RequireBearer;
