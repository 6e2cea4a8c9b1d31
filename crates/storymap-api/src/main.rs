//! Storymap API server entry point.

use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use sqlx::postgres::PgPoolOptions;
use storymap_core::repository::EventStore;
use storymap_core::rng::OsRngFactory;
use storymap_event_store::json_file_store::JsonFileEventStore;
use storymap_event_store::pg_event_store::PgEventStore;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use storymap_api::config::{AppConfig, StoreConfig};
use storymap_api::routes;
use storymap_api::state::AppState;
use storymap_api::telemetry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Read configuration from environment.
    let config = AppConfig::from_env()?;

    // Initialize tracing subscriber.
    let tracer_provider = telemetry::init(config.otlp_endpoint.as_deref())?;

    tracing::info!("Starting Storymap API server");

    // Connect the event store.
    let event_store: Arc<dyn EventStore> = match &config.store {
        StoreConfig::Postgres {
            database_url,
            max_connections,
        } => {
            let pool = PgPoolOptions::new()
                .max_connections(*max_connections)
                .connect(database_url)
                .await?;
            let store = PgEventStore::new(pool);
            store.ensure_schema().await?;
            Arc::new(store)
        }
        StoreConfig::JsonFile(path) => {
            tracing::info!(path = %path.display(), "Reading story events from file");
            Arc::new(JsonFileEventStore::new(path.clone()))
        }
    };

    // Build application state.
    let app_state = AppState::new(
        event_store,
        Arc::new(OsRngFactory),
        config.bounds,
        config.start_options_limit,
    );

    // Build router.
    // TODO: Replace CorsLayer::permissive() with the frontend origin once it is deployed.
    let app = Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/stories", routes::stories::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server.
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| format!("invalid HOST:PORT combination: {e}"))?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(provider) = tracer_provider
        && let Err(e) = provider.shutdown()
    {
        tracing::warn!(error = %e, "failed to flush traces");
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    tracing::info!("Shutting down");
}
