use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use super::*;
use crate::embedding::{EmbedderConfig, TextEmbedder};
use crate::predictor::lm::{LmConfig, MockChatApi};
use crate::predictor::{LinearPredictor, PredictorKind, PredictorRegistry};
use crate::regression::RidgeWeights;

fn test_router(mock_reply: &str) -> Router {
    let embedder = Arc::new(TextEmbedder::load(EmbedderConfig::stub()).expect("stub embedder"));

    let dir = tempfile::tempdir().expect("tempdir");
    let weights = RidgeWeights {
        weights: vec![0.01; 2 * embedder.embedding_dim()],
        intercept: 0.1,
    };
    let path = dir.path().join("ridge.json");
    std::fs::write(&path, serde_json::to_string(&weights).expect("serialize")).expect("write");

    let linear = Arc::new(LinearPredictor::load(embedder, &path).expect("linear"));

    let registry = PredictorRegistry::new(linear, LmConfig::default())
        .with_chat_api(Arc::new(MockChatApi::with_reply(mock_reply)));

    create_router(AppState::new(Arc::new(registry)))
}

fn match_body(predictor_type: &str) -> String {
    serde_json::json!({
        "vacancy_description": "3+ years Python experience required, ML knowledge required",
        "candidate_description": "5 years of Python experience, Masters in Computer Science",
        "hr_comment": "",
        "predictor_type": predictor_type,
    })
    .to_string()
}

fn post_match(body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/match")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .expect("request")
}

async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.expect("body").to_bytes();
    serde_json::from_slice(&bytes).expect("json body")
}

#[tokio::test]
async fn test_healthz() {
    let router = test_router("unused");

    let response = router
        .oneshot(
            Request::builder()
                .uri("/healthz")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_match_dummy_always_succeeds() {
    let router = test_router("unused");

    let response = router
        .oneshot(post_match(match_body("dummy")))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    let score = body["score"].as_f64().expect("score present");
    assert!((0.0..=4.0).contains(&score));
    assert!(body["description"].as_str().is_some());
}

#[tokio::test]
async fn test_match_defaults_to_dummy_predictor() {
    let router = test_router("unused");

    let body = serde_json::json!({
        "vacancy_description": "3+ years Python experience required",
        "candidate_description": "5 years of Python experience",
    })
    .to_string();

    let response = router.oneshot(post_match(body)).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_match_linear_is_idempotent() {
    let router = test_router("unused");

    let first = response_json(
        router
            .clone()
            .oneshot(post_match(match_body("linear")))
            .await
            .expect("response"),
    )
    .await;
    let second = response_json(
        router
            .oneshot(post_match(match_body("linear")))
            .await
            .expect("response"),
    )
    .await;

    assert_eq!(first["score"], second["score"]);
}

#[tokio::test]
async fn test_match_lm_parses_mock_reply() {
    let router = test_router("<thought>good overlap</thought><score>72</score>");

    let response = router
        .oneshot(post_match(match_body("lm")))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["score"], 72.0);
    assert_eq!(body["description"], "good overlap");
}

#[tokio::test]
async fn test_match_lm_null_score_is_surfaced() {
    let router = test_router("no verdict");

    let response = router
        .oneshot(post_match(match_body("lm")))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert!(body["score"].is_null());
}

#[tokio::test]
async fn test_match_unsupported_predictor_type() {
    let router = test_router("unused");

    let response = router
        .oneshot(post_match(match_body("test")))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert!(body["error"]
        .as_str()
        .expect("error")
        .contains("unsupported predictor type"));
}

#[tokio::test]
async fn test_match_invalid_predictor_type_fails_deserialization() {
    let router = test_router("unused");

    let response = router
        .oneshot(post_match(match_body("quantum")))
        .await
        .expect("response");

    // Syntactically invalid identifiers are rejected before the strategy
    // layer, with a different status than the unsupported-but-declared case.
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_match_short_descriptions_rejected() {
    let router = test_router("unused");

    let body = serde_json::json!({
        "vacancy_description": "too short",
        "candidate_description": "5 years of Python experience",
        "predictor_type": "dummy",
    })
    .to_string();

    let response = router.oneshot(post_match(body)).await.expect("response");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = response_json(response).await;
    assert!(body["error"]
        .as_str()
        .expect("error")
        .contains("vacancy_description"));
}

#[tokio::test]
async fn test_available_models() {
    let router = test_router("unused");

    let response = router
        .oneshot(
            Request::builder()
                .uri("/available-models")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(
        body["predictor_types"],
        serde_json::json!(["dummy", "linear", "lm"])
    );
}

#[tokio::test]
async fn test_models_per_predictor() {
    let router = test_router("unused");

    let response = router
        .oneshot(
            Request::builder()
                .uri("/available-models-per-predictor")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["models"]["dummy"], serde_json::json!(["dummy-model-v1"]));
    assert_eq!(body["models"]["linear"], serde_json::json!(["ridge-model-v1"]));
    assert_eq!(body["models"]["lm"], serde_json::json!(["mock-model"]));
}

#[tokio::test]
async fn test_models_per_predictor_discovery_failure_is_bad_gateway() {
    let embedder = Arc::new(TextEmbedder::load(EmbedderConfig::stub()).expect("stub embedder"));

    let dir = tempfile::tempdir().expect("tempdir");
    let weights = RidgeWeights {
        weights: vec![0.0; 2 * embedder.embedding_dim()],
        intercept: 0.0,
    };
    let path = dir.path().join("ridge.json");
    std::fs::write(&path, serde_json::to_string(&weights).expect("serialize")).expect("write");
    let linear = Arc::new(LinearPredictor::load(embedder, &path).expect("linear"));

    let registry = PredictorRegistry::new(linear, LmConfig::default())
        .with_chat_api(Arc::new(MockChatApi::failing()));
    let router = create_router(AppState::new(Arc::new(registry)));

    let response = router
        .oneshot(
            Request::builder()
                .uri("/available-models-per-predictor")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[test]
fn test_validation_bounds() {
    let request = MatchRequest {
        vacancy_description: "exactly10!".to_string(),
        candidate_description: "0123456789".to_string(),
        hr_comment: String::new(),
        predictor_type: PredictorKind::Dummy,
        predictor_parameters: None,
    };
    assert!(request.validate().is_ok());

    let request = MatchRequest {
        candidate_description: "012345678".to_string(),
        ..request
    };
    assert!(matches!(
        request.validate(),
        Err(ServiceError::Validation(_))
    ));
}
