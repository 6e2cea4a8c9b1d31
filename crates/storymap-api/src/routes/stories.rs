//! Routes for story generation and interactive play.

use axum::extract::{Query, State};
use axum::{Json, Router, routing::get};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use storymap_narrative::application::query_handlers::{
    self, StartOption, StepView, StoryNode,
};
use storymap_narrative::domain::path::Strategy;

use crate::error::ApiError;
use crate::state::AppState;

/// Query string for GET /start-nodes.
#[derive(Debug, Deserialize)]
pub struct StartNodesQuery {
    /// Genre to sample from; all genres when absent.
    pub genre: Option<String>,
    /// Maximum number of options; the configured default when absent.
    pub limit: Option<usize>,
}

/// Query string for GET /generate.
#[derive(Debug, Deserialize)]
pub struct GenerateQuery {
    /// Genre to generate from; all genres when absent.
    pub genre: Option<String>,
    /// Traversal strategy.
    #[serde(default)]
    pub strategy: Strategy,
    /// Explicit start node; a random start node when absent.
    pub start_id: Option<String>,
}

/// Query string for GET /step.
#[derive(Debug, Deserialize)]
pub struct StepQuery {
    /// Genre the node belongs to; all genres when absent.
    pub genre: Option<String>,
    /// The node to expand.
    pub node_id: String,
}

/// Response body for GET /generate.
#[derive(Debug, Serialize)]
pub struct GeneratedStory {
    /// The requested genre, if any.
    pub genre: Option<String>,
    /// The strategy used.
    pub strategy: Strategy,
    /// Events in reading order.
    pub story: Vec<StoryNode>,
}

/// GET /start-nodes
#[instrument(skip(state), fields(request_id = %Uuid::new_v4()))]
async fn start_nodes(
    State(state): State<AppState>,
    Query(query): Query<StartNodesQuery>,
) -> Result<Json<Vec<StartOption>>, ApiError> {
    info!("listing start options");

    let limit = query.limit.unwrap_or(state.start_options_limit);
    let mut rng = state.rng_factory.create();
    let options = query_handlers::list_start_options(
        query.genre.as_deref(),
        limit,
        &*state.event_store,
        &mut *rng,
    )
    .await?;

    Ok(Json(options))
}

/// GET /generate
#[instrument(skip(state), fields(request_id = %Uuid::new_v4()))]
async fn generate(
    State(state): State<AppState>,
    Query(query): Query<GenerateQuery>,
) -> Result<Json<GeneratedStory>, ApiError> {
    info!("generating story");

    let mut rng = state.rng_factory.create();
    let path = query_handlers::generate_story(
        query.genre.as_deref(),
        query.strategy,
        query.start_id.as_deref(),
        state.bounds,
        &*state.event_store,
        &mut *rng,
    )
    .await?;

    Ok(Json(GeneratedStory {
        genre: query.genre,
        strategy: query.strategy,
        story: path.nodes,
    }))
}

/// GET /step
#[instrument(skip(state), fields(request_id = %Uuid::new_v4()))]
async fn step(
    State(state): State<AppState>,
    Query(query): Query<StepQuery>,
) -> Result<Json<StepView>, ApiError> {
    info!("expanding story step");

    let view =
        query_handlers::get_step(query.genre.as_deref(), &query.node_id, &*state.event_store)
            .await?;

    Ok(Json(view))
}

/// Returns the router for story operations.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/start-nodes", get(start_nodes))
        .route("/generate", get(generate))
        .route("/step", get(step))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::{Arc, Mutex};

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use storymap_core::repository::EventStore;
    use storymap_narrative::domain::path::SearchBounds;
    use storymap_test_support::{
        FailingEventStore, InMemoryEventStore, MockRngFactory, event, start_event,
    };
    use tower::ServiceExt;
    use tracing::Subscriber;
    use tracing::field::{Field, Visit};
    use tracing::span::{Attributes, Id};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    fn app_state_with(event_store: Arc<dyn EventStore>) -> AppState {
        AppState::new(
            event_store,
            Arc::new(MockRngFactory),
            SearchBounds::default(),
            3,
        )
    }

    fn test_app_state() -> AppState {
        app_state_with(Arc::new(InMemoryEventStore::new(vec![
            start_event("A", &["B", "C"]),
            event("B", &["D"]),
            event("C", &[]),
            event("D", &[]),
        ])))
    }

    fn failing_app_state() -> AppState {
        app_state_with(Arc::new(FailingEventStore))
    }

    async fn send_get(state: AppState, uri: &str) -> (StatusCode, Value) {
        let app = router().with_state(state);
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_start_nodes_returns_200_with_previews() {
        // Act
        let (status, json) = send_get(test_app_state(), "/start-nodes?genre=horror").await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        let options = json.as_array().unwrap();
        assert_eq!(options.len(), 1);
        assert_eq!(options[0]["event_id"], "A");
        assert_eq!(options[0]["preview"], "text of A");
    }

    #[tokio::test]
    async fn test_generate_returns_story_from_explicit_start() {
        // Act
        let (status, json) = send_get(
            test_app_state(),
            "/generate?genre=horror&strategy=random&start_id=C",
        )
        .await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["genre"], "horror");
        assert_eq!(json["strategy"], "random");
        let story = json["story"].as_array().unwrap();
        assert_eq!(story.len(), 1);
        assert_eq!(story[0]["event_id"], "C");
        assert_eq!(story[0]["genre"], "horror");
    }

    #[tokio::test]
    async fn test_generate_defaults_to_length_constrained() {
        let (status, json) = send_get(test_app_state(), "/generate?genre=horror").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["strategy"], "length_constrained");
        assert_eq!(json["story"][0]["event_id"], "A");
    }

    #[tokio::test]
    async fn test_generate_returns_404_for_empty_genre() {
        let (status, json) = send_get(test_app_state(), "/generate?genre=comedy").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "empty_graph");
    }

    #[tokio::test]
    async fn test_generate_returns_400_for_unknown_strategy() {
        let (status, _) =
            send_get(test_app_state(), "/generate?genre=horror&strategy=weighted").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_step_returns_options_in_order() {
        // Act
        let (status, json) = send_get(test_app_state(), "/step?genre=horror&node_id=A").await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["current"]["event_id"], "A");
        assert_eq!(json["options"][0]["event_id"], "B");
        assert_eq!(json["options"][1]["event_id"], "C");
        assert_eq!(json["is_terminal"], false);
    }

    #[tokio::test]
    async fn test_step_returns_404_for_unknown_node() {
        let (status, json) = send_get(test_app_state(), "/step?genre=horror&node_id=Q").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "node_not_found");
    }

    #[tokio::test]
    async fn test_step_returns_400_without_node_id() {
        let (status, _) = send_get(test_app_state(), "/step?genre=horror").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[derive(Clone, Default)]
    struct SpanFieldRecorder {
        spans: Arc<Mutex<Vec<(String, Vec<String>)>>>,
    }

    struct FieldNames(Vec<String>);

    impl Visit for FieldNames {
        fn record_debug(&mut self, field: &Field, _value: &dyn std::fmt::Debug) {
            self.0.push(field.name().to_owned());
        }
    }

    impl<S: Subscriber> Layer<S> for SpanFieldRecorder {
        fn on_new_span(&self, attrs: &Attributes<'_>, _id: &Id, _ctx: Context<'_, S>) {
            let mut names = FieldNames(Vec::new());
            attrs.record(&mut names);
            self.spans
                .lock()
                .unwrap()
                .push((attrs.metadata().name().to_owned(), names.0));
        }
    }

    #[tokio::test]
    async fn test_handler_span_records_request_id() {
        // Arrange
        let recorder = SpanFieldRecorder::default();
        let subscriber = tracing_subscriber::registry().with(recorder.clone());
        let _guard = tracing::subscriber::set_default(subscriber);

        // Act
        let (status, _) = send_get(test_app_state(), "/step?genre=horror&node_id=A").await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        let spans = recorder.spans.lock().unwrap();
        let (_, fields) = spans
            .iter()
            .find(|(name, _)| name == "step")
            .expect("handler span was not entered");
        assert!(fields.iter().any(|field| field == "request_id"));
    }

    #[tokio::test]
    async fn test_start_nodes_returns_500_when_store_fails() {
        // Act
        let (status, json) = send_get(failing_app_state(), "/start-nodes?genre=horror").await;

        // Assert
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "infrastructure_error");
    }
}
