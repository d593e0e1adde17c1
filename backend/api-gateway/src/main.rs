use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use api_gateway::{config::Config, configure, cors, ServiceClients};
use tracing::info;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "api_gateway=info,info".into()),
        )
        .with_target(false)
        .json()
        .init();

    info!("Starting API Gateway");

    let config = Config::from_env().context("Failed to load configuration")?;
    info!(
        identity = %config.grpc.identity_service_url,
        vocabulary = %config.grpc.vocabulary_service_url,
        "Configured downstream services"
    );

    // Lazy channels: peers may come up after the gateway
    let clients = ServiceClients::new(&config.grpc).context("Invalid service URL")?;
    let clients = web::Data::new(clients);

    let bind_addr = config.bind_addr();
    info!("Starting HTTP server on {}", bind_addr);

    // actix-web stops gracefully on SIGINT/SIGTERM
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(cors())
            .app_data(clients.clone())
            .configure(configure)
    })
    .bind(&bind_addr)
    .with_context(|| format!("Failed to bind {}", bind_addr))?
    .run()
    .await
    .context("HTTP server error")?;

    info!("API gateway shutdown complete");
    Ok(())
}
