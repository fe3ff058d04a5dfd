//! Router-level tests for the workout generation API.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use gymgenie::services::providers::mock::MockTextProvider;
use gymgenie::startup::{build_router, session_key};
use gymgenie::AppState;
use http_body_util::BodyExt;
use std::sync::Arc;
use std::time::Duration;
use tower::util::ServiceExt;

fn test_app(provider: MockTextProvider) -> axum::Router {
    let state = AppState::new(Arc::new(provider), Duration::from_secs(30));
    build_router(state, session_key(None))
}

async fn post_workout(app: axum::Router, body: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/generate_workout")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).expect("Response body was not JSON");
    (status, json)
}

#[tokio::test]
async fn missing_input_is_rejected() {
    let app = test_app(MockTextProvider::with_reply("unused"));

    let (status, body) = post_workout(app, "{}").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "No input provided. Please provide your fitness preferences!"
    );
}

#[tokio::test]
async fn null_input_is_rejected() {
    let app = test_app(MockTextProvider::with_reply("unused"));

    let (status, body) = post_workout(app, r#"{"user_input": null}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "No input provided. Please provide your fitness preferences!"
    );
}

#[tokio::test]
async fn empty_input_is_rejected() {
    let app = test_app(MockTextProvider::with_reply("unused"));

    let (status, body) = post_workout(app, r#"{"user_input": ""}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "No input provided. Please provide your fitness preferences!"
    );
}

#[tokio::test]
async fn non_string_input_is_rejected() {
    let app = test_app(MockTextProvider::with_reply("unused"));

    let (status, body) = post_workout(app, r#"{"user_input": 42}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Invalid input type. Please provide a valid string for your fitness preferences!"
    );
}

#[tokio::test]
async fn whitespace_only_input_is_rejected() {
    let app = test_app(MockTextProvider::with_reply("unused"));

    let (status, body) = post_workout(app, r#"{"user_input": "   \t  "}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Input is empty. Please provide a meaningful fitness preference!"
    );
}

#[tokio::test]
async fn successful_generation_returns_workout_plan() {
    let app = test_app(MockTextProvider::with_reply("Day 1: ..."));

    let (status, body) =
        post_workout(app, r#"{"user_input": "build muscle, 3 days/week"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["workout_plan"], "Day 1: ...");
}

#[tokio::test]
async fn upstream_failure_returns_500_with_detail() {
    let app = test_app(MockTextProvider::failing("quota exceeded"));

    let (status, body) = post_workout(app, r#"{"user_input": "get stronger"}"#).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let error = body["error"].as_str().unwrap();
    assert!(error.starts_with("Error generating workout:"));
    assert!(error.contains("quota exceeded"));
}
