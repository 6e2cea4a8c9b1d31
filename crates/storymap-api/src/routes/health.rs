//! Liveness endpoint reporting the configured story source.

use axum::extract::State;
use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::state::AppState;

/// Story length bounds in effect.
#[derive(Debug, Serialize)]
pub struct LengthBounds {
    pub min: usize,
    pub max: usize,
}

/// Body of GET /health.
#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    /// Which `EventStore` backs the engine, e.g. `postgres` or `json_file`.
    pub store: &'static str,
    pub story_length: LengthBounds,
    pub start_options_limit: usize,
}

/// GET /health
///
/// Does not touch the store; a reachable process answers `ok`.
async fn health(State(state): State<AppState>) -> Json<HealthReport> {
    Json(HealthReport {
        status: "ok",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        store: state.event_store.backend(),
        story_length: LengthBounds {
            min: state.bounds.min_len(),
            max: state.bounds.max_len(),
        },
        start_options_limit: state.start_options_limit,
    })
}

/// Router exposing `/health`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
