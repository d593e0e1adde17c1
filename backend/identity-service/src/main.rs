/// Identity Service Main Entry Point
///
/// Starts gRPC server with:
/// - Credential issuer and verifier sharing one signing secret
/// - Authentication layer with a public-method allowlist
/// - Standard gRPC health service
use anyhow::{Context, Result};
use crypto_core::{CredentialIssuer, CredentialVerifier};
use grpc_contracts::identity::identity_service_server::IdentityServiceServer;
use identity_service::{auth_layer, config::Settings, db::UserStore, IdentityGrpcService};
use std::net::SocketAddr;
use tokio::signal;
use tonic::transport::Server;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "identity_service=info,info".into()),
        )
        .with_target(false)
        .json()
        .init();

    info!("Starting Identity Service");

    // Load configuration; a missing or weak secret stops startup here
    let settings = Settings::load().context("Failed to load configuration")?;
    info!(
        ttl_secs = settings.credential.ttl.as_secs(),
        "Configuration loaded successfully"
    );

    let issuer =
        CredentialIssuer::new(settings.credential.secret.clone()).with_ttl(settings.credential.ttl);
    let verifier = CredentialVerifier::new(settings.credential.secret.clone());

    let identity_service = IdentityGrpcService::new(UserStore::new(), issuer, verifier.clone());

    let (mut health_reporter, health_service) = tonic_health::server::health_reporter();
    health_reporter
        .set_serving::<IdentityServiceServer<IdentityGrpcService>>()
        .await;

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server address")?;

    info!("Starting gRPC server on {}", addr);

    Server::builder()
        .layer(auth_layer(verifier))
        .add_service(health_service)
        .add_service(IdentityServiceServer::new(identity_service))
        .serve_with_shutdown(addr, shutdown_signal())
        .await
        .context("gRPC server error")?;

    info!("Identity service shutdown complete");

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
