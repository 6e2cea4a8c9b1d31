//! Integration tests for the story routes.

mod common;

use std::collections::HashSet;
use std::sync::Arc;

use axum::http::StatusCode;
use storymap_event_store::json_file_store::JsonFileEventStore;
use storymap_test_support::{InMemoryEventStore, SeededRngFactory, event, start_event};

#[tokio::test]
async fn test_random_story_always_ends_at_c_or_d() {
    for seed in 0..25 {
        let app = common::build_test_app_with(
            Arc::new(InMemoryEventStore::new(common::branching_story())),
            Arc::new(SeededRngFactory(seed)),
        );

        let (status, json) =
            common::get_json(app, "/api/v1/stories/generate?genre=horror&strategy=random").await;

        assert_eq!(status, StatusCode::OK);
        let story = json["story"].as_array().unwrap();
        assert_eq!(story[0]["event_id"], "A");
        let last = story.last().unwrap()["event_id"].as_str().unwrap();
        assert!(last == "C" || last == "D", "story ended at {last}");
    }
}

#[tokio::test]
async fn test_explicit_leaf_start_returns_single_event() {
    let app = common::build_test_app(common::branching_story());

    let (status, json) =
        common::get_json(app, "/api/v1/stories/generate?genre=horror&start_id=C").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["story"].as_array().unwrap().len(), 1);
    assert_eq!(json["story"][0]["event_id"], "C");
    assert_eq!(json["story"][0]["text"], "text of C");
}

#[tokio::test]
async fn test_smart_alias_selects_length_constrained() {
    let app = common::build_test_app(common::branching_story());

    let (status, json) =
        common::get_json(app, "/api/v1/stories/generate?genre=horror&strategy=smart").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["strategy"], "length_constrained");
}

#[tokio::test]
async fn test_cyclic_graph_returns_422() {
    let app = common::build_test_app(vec![start_event("A", &["B"]), event("B", &["A"])]);

    let (status, json) = common::get_json(app, "/api/v1/stories/generate?genre=horror").await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error"], "cycle_detected");
}

#[tokio::test]
async fn test_graph_without_starts_returns_404() {
    let app = common::build_test_app(vec![event("A", &[])]);

    let (status, json) = common::get_json(app, "/api/v1/stories/generate?genre=horror").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "no_start_nodes");
}

#[tokio::test]
async fn test_unknown_start_returns_404() {
    let app = common::build_test_app(common::branching_story());

    let (status, json) =
        common::get_json(app, "/api/v1/stories/generate?genre=horror&start_id=Q").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "invalid_start_node");
    assert_eq!(json["message"], "invalid start node: Q");
}

#[tokio::test]
async fn test_start_nodes_limit_larger_than_starts_returns_all() {
    // Arrange
    let app = common::build_test_app(vec![
        start_event("A", &[]),
        start_event("B", &[]),
        event("C", &[]),
    ]);

    // Act
    let (status, json) =
        common::get_json(app, "/api/v1/stories/start-nodes?genre=horror&limit=10").await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    let ids: HashSet<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|option| option["event_id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, HashSet::from(["A", "B"]));
    assert_eq!(json.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_start_nodes_uses_configured_default_limit() {
    let app = common::build_test_app(vec![
        start_event("A", &[]),
        start_event("B", &[]),
        start_event("C", &[]),
        start_event("D", &[]),
    ]);

    let (status, json) = common::get_json(app, "/api/v1/stories/start-nodes?genre=horror").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_interactive_play_walks_to_an_ending() {
    // Arrange
    let records = common::branching_story();

    // Act: follow the last option each time.
    let mut node = "A".to_owned();
    let mut visited = vec![node.clone()];
    loop {
        let app = common::build_test_app(records.clone());
        let (status, json) = common::get_json(
            app,
            &format!("/api/v1/stories/step?genre=horror&node_id={node}"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        if json["is_terminal"].as_bool().unwrap() {
            assert!(json["options"].as_array().unwrap().is_empty());
            break;
        }
        let options = json["options"].as_array().unwrap();
        node = options.last().unwrap()["event_id"].as_str().unwrap().to_owned();
        visited.push(node.clone());
    }

    // Assert
    assert_eq!(visited, ["A", "C"]);
}

#[tokio::test]
async fn test_json_file_store_serves_generation() {
    // Arrange
    let path = std::env::temp_dir().join(format!("storymap-api-{}.json", uuid::Uuid::new_v4()));
    std::fs::write(
        &path,
        r#"[
            {"event_id": "A", "text": "Lights flicker.", "genre": "thriller", "next_event_ids": ["B"], "is_start": "true"},
            {"event_id": "B", "text": "A door slams.", "genre": "thriller", "next_event_ids": []},
            {"text": "orphan without an id", "genre": "thriller", "is_start": true}
        ]"#,
    )
    .unwrap();
    let app = common::build_test_app_with(
        Arc::new(JsonFileEventStore::new(&path)),
        Arc::new(SeededRngFactory(1)),
    );

    // Act
    let (status, json) = common::get_json(app, "/api/v1/stories/generate?genre=thriller").await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["story"][0]["text"], "Lights flicker.");
    assert_eq!(json["story"][1]["text"], "A door slams.");
    assert_eq!(json["story"].as_array().unwrap().len(), 2);

    std::fs::remove_file(path).unwrap();
}
