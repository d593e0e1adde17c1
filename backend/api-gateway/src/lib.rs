//! API Gateway Library
//!
//! REST front door for the web client. The gateway never verifies
//! credentials itself: it checks that a bearer header is present and
//! forwards it verbatim with each downstream gRPC call.

pub mod clients;
pub mod config;
pub mod error;
pub mod middleware;
pub mod rest_api;

use actix_cors::Cors;
use actix_web::http::{header, Method};

pub use clients::ServiceClients;
pub use error::GatewayError;
pub use rest_api::configure;

/// Browser access from any origin. Credentials travel in the
/// `Authorization` header, never in cookies.
pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allowed_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .max_age(3600)
}
