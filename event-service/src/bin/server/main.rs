use std::sync::Arc;

use anyhow::Error;
use auth::Authenticator;
use event_service::config::Config;
use event_service::domain::category::service::CategoryService;
use event_service::domain::event::service::EventService;
use event_service::inbound::http::create_router;
use event_service::outbound::repositories::PostgresCategoryRepository;
use event_service::outbound::repositories::PostgresEventRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "event_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "event-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        jwt_issuer = %config.jwt.issuer,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let authenticator = Arc::new(Authenticator::new(
        config.jwt.secret.as_bytes(),
        &config.jwt.issuer,
    ));

    let category_repository = Arc::new(PostgresCategoryRepository::new(pg_pool.clone()));
    let event_repository = Arc::new(PostgresEventRepository::new(pg_pool));

    let category_service = Arc::new(CategoryService::new(Arc::clone(&category_repository)));
    let event_service = Arc::new(EventService::new(event_repository, category_repository));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(
        listener,
        create_router(category_service, event_service, authenticator),
    )
    .await?;

    Ok(())
}
