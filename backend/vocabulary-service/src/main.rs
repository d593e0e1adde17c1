/// Vocabulary Service Main Entry Point
///
/// Starts gRPC server with:
/// - Credential verification on every vocabulary method
/// - Standard gRPC health service (unauthenticated)
use anyhow::{Context, Result};
use crypto_core::CredentialVerifier;
use grpc_contracts::vocabulary::vocabulary_service_server::VocabularyServiceServer;
use std::net::SocketAddr;
use tokio::signal;
use tonic::transport::Server;
use tracing::info;
use vocabulary_service::{
    config::Settings, db::VocabularyStore, vocabulary_server, VocabularyGrpcService,
};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "vocabulary_service=info,info".into()),
        )
        .with_target(false)
        .json()
        .init();

    info!("Starting Vocabulary Service");

    let settings = Settings::load().context("Failed to load configuration")?;
    let verifier = CredentialVerifier::new(settings.credential_secret.clone());

    let service = VocabularyGrpcService::new(VocabularyStore::new());

    let (mut health_reporter, health_service) = tonic_health::server::health_reporter();
    health_reporter
        .set_serving::<VocabularyServiceServer<VocabularyGrpcService>>()
        .await;

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server address")?;

    info!("Starting gRPC server on {}", addr);

    Server::builder()
        .add_service(health_service)
        .add_service(vocabulary_server(service, verifier))
        .serve_with_shutdown(addr, shutdown_signal())
        .await
        .context("gRPC server error")?;

    info!("Vocabulary service shutdown complete");

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }

    info!("Shutting down gracefully...");
}
