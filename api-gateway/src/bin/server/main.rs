use std::sync::Arc;
use std::time::Duration;

use anyhow::Error;
use api_gateway::config::Config;
use api_gateway::inbound::http::create_router;
use api_gateway::outbound::HttpDownstreamClient;
use auth::Authenticator;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api_gateway=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "api-gateway",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        auth_url = %config.services.auth_url,
        event_url = %config.services.event_url,
        timeout_secs = config.services.timeout_secs,
        "Configuration loaded"
    );

    let authenticator = Arc::new(Authenticator::new(
        config.jwt.secret.as_bytes(),
        &config.jwt.issuer,
    ));

    let downstream = Arc::new(HttpDownstreamClient::new(
        config.services.auth_url,
        config.services.event_url,
        Duration::from_secs(config.services.timeout_secs),
    )?);

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(listener, create_router(downstream, authenticator)).await?;

    Ok(())
}
