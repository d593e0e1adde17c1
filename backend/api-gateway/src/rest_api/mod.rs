/// REST API v1 Module
///
/// HTTP endpoints for the web client. Each handler translates one HTTP
/// request into one gRPC call.
///
/// Architecture:
/// ```text
/// Web client (HTTP REST, Authorization: Bearer ...)
///     ↓
/// RequireBearer (presence check only)
///     ↓
/// REST handler (this module) → gRPC call with forwarded credential
///     ↓
/// Identity / Vocabulary service (verification + ownership check)
/// ```
pub mod auth;
pub mod models;
pub mod users;
pub mod vocabulary;

use crate::middleware::RequireBearer;
use actix_web::{web, HttpResponse};

pub async fn health() -> HttpResponse {
    HttpResponse::Ok().body("ok")
}

/// Register every gateway route
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health))
        .service(
            web::scope("/api/v1/auth")
                .route("/register", web::post().to(auth::register))
                .route("/login", web::post().to(auth::login))
                .service(
                    web::resource("/verify")
                        .wrap(RequireBearer)
                        .route(web::get().to(auth::verify)),
                ),
        )
        .service(
            web::scope("/api/v1/users/{user_id}")
                .wrap(RequireBearer)
                .route("/profile", web::get().to(users::get_profile))
                .service(
                    web::resource("/vocabularies")
                        .route(web::get().to(vocabulary::list))
                        .route(web::post().to(vocabulary::create)),
                )
                // Before `{vocabulary_id}`, which would otherwise claim it
                .route("/vocabularies/stats", web::get().to(vocabulary::stats))
                .service(
                    web::resource("/vocabularies/{vocabulary_id}")
                        .route(web::get().to(vocabulary::get))
                        .route(web::put().to(vocabulary::update))
                        .route(web::delete().to(vocabulary::delete)),
                ),
        );
}
