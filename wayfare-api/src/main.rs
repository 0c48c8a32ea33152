use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wayfare_api::{app, AppState, AuthConfig};
use wayfare_core::repository::TripRepository;
use wayfare_core::search::SearchGateway;
use wayfare_core::store::TripStore;
use wayfare_store::app_config::{Config, StoreBackend};
use wayfare_store::{DbClient, HttpTripProvider, InMemoryTripRepository, PostgresTripRepository};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wayfare_api=debug,wayfare_core=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Starting Wayfare API on port {}", config.server.port);

    let repo: Arc<dyn TripRepository> = match config.database.backend {
        StoreBackend::Postgres => {
            let url = config
                .database
                .url
                .as_deref()
                .context("database.url is required for the postgres backend")?;
            let db = DbClient::new(url, config.database.max_connections)
                .await
                .context("Failed to connect to Postgres")?;
            db.migrate().await.context("Failed to run migrations")?;
            Arc::new(PostgresTripRepository::new(db.pool))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory trip store; saved trips are lost on restart");
            Arc::new(InMemoryTripRepository::new())
        }
    };

    let provider = HttpTripProvider::new(&config.provider).context("Failed to build provider client")?;

    let app_state = AppState {
        search: SearchGateway::new(Arc::new(provider)),
        trips: TripStore::new(repo),
        auth: AuthConfig {
            api_key: config.inbound_api_key().to_string(),
        },
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
