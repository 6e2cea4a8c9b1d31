//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use storymap_core::event::EventRecord;
use storymap_core::repository::EventStore;
use storymap_core::rng::RngFactory;
use storymap_narrative::domain::path::SearchBounds;
use storymap_test_support::{InMemoryEventStore, MockRngFactory, event, start_event};
use tower::ServiceExt;

use storymap_api::routes;
use storymap_api::state::AppState;

/// The branching horror story used across tests:
/// `A -> {B, C}`, `B -> D`, with `C` and `D` as endings.
pub fn branching_story() -> Vec<EventRecord> {
    vec![
        start_event("A", &["B", "C"]),
        event("B", &["D"]),
        event("C", &[]),
        event("D", &[]),
    ]
}

/// Build the full app router over `records` with a deterministic RNG.
/// Uses the same route structure as `main.rs`.
pub fn build_test_app(records: Vec<EventRecord>) -> Router {
    build_test_app_with(Arc::new(InMemoryEventStore::new(records)), Arc::new(MockRngFactory))
}

/// Build the full app router over any store and RNG factory.
pub fn build_test_app_with(
    event_store: Arc<dyn EventStore>,
    rng_factory: Arc<dyn RngFactory>,
) -> Router {
    let app_state = AppState::new(event_store, rng_factory, SearchBounds::default(), 3);

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/stories", routes::stories::router())
        .with_state(app_state)
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value =
        serde_json::from_slice(&body_bytes).unwrap_or(serde_json::Value::Null);

    (status, json)
}
