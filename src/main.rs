//! Gateway process entry point.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tls_gateway::config;
use tls_gateway::http::HttpServer;
use tls_gateway::session::ClientSessionProvider;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tls_gateway=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("tls-gateway v0.1.0 starting");

    let config = config::load()?;
    tracing::info!(
        bind_address = %config.listener.bind_address,
        browser_profile = %config.forwarding.browser_profile,
        url_header = %config.control.url,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let server = HttpServer::new(config, Arc::new(ClientSessionProvider::new()));
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
