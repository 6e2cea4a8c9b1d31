//! Integration tests for the health endpoint.

mod common;

use axum::http::StatusCode;

#[tokio::test]
async fn test_health_returns_200_with_status_ok() {
    let app = common::build_test_app(vec![]);

    let (status, json) = common::get_json(app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["service"], "storymap-api");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_health_reports_store_backend_and_bounds() {
    let app = common::build_test_app(common::branching_story());

    let (status, json) = common::get_json(app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["store"], "in_memory");
    assert_eq!(json["story_length"]["min"], 5);
    assert_eq!(json["story_length"]["max"], 8);
    assert_eq!(json["start_options_limit"], 3);
}

#[tokio::test]
async fn test_health_stays_ok_when_store_is_down() {
    let app = common::build_test_app_with(
        std::sync::Arc::new(storymap_test_support::FailingEventStore),
        std::sync::Arc::new(storymap_test_support::MockRngFactory),
    );

    let (status, json) = common::get_json(app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["store"], "failing");
}

#[tokio::test]
async fn test_unknown_route_returns_404() {
    let app = common::build_test_app(vec![]);

    let request = axum::http::Request::builder()
        .method("GET")
        .uri("/api/v1/nonexistent")
        .body(axum::body::Body::empty())
        .unwrap();

    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
