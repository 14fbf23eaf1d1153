//! HTTP boundary (Axum) for the scoring service.
//!
//! Validates incoming requests, dispatches them to the selected strategy via
//! the registry and serializes results. All handlers are request-scoped and
//! stateless beyond the shared read-only [`AppState`].

pub mod error;
pub mod models;
pub mod state;

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tower_http::trace::TraceLayer;
use tracing::{info, instrument};

use crate::predictor::MatchInput;

pub use error::ServiceError;
pub use models::{
    AvailableModelsResponse, MatchRequest, MatchResponse, ModelsPerPredictorResponse,
};
pub use state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/match", post(match_handler))
        .route("/available-models", get(available_models_handler))
        .route(
            "/available-models-per-predictor",
            get(models_per_predictor_handler),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[instrument]
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Calculates a match score between a vacancy and a candidate.
#[instrument(skip(state, request), fields(predictor = %request.predictor_type))]
pub async fn match_handler(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<MatchResponse>, ServiceError> {
    request.validate()?;

    let predictor = state
        .registry
        .build(request.predictor_type, request.predictor_parameters.as_ref())?;

    let input = MatchInput {
        candidate: request.candidate_description,
        vacancy: request.vacancy_description,
        hr_comment: request.hr_comment,
    };

    let prediction = predictor.predict(&input).await;

    info!(score = ?prediction.score, "Prediction complete");

    Ok(Json(MatchResponse {
        score: prediction.score,
        description: prediction.explanation,
    }))
}

/// Lists the registered strategy identifiers.
#[instrument(skip(state))]
pub async fn available_models_handler(
    State(state): State<AppState>,
) -> Json<AvailableModelsResponse> {
    Json(AvailableModelsResponse {
        predictor_types: state.registry.registered().to_vec(),
    })
}

/// Lists the model identifiers available to each registered strategy.
///
/// The remote-model listing is a live discovery call; its failure fails the
/// whole endpoint rather than returning a partial map.
#[instrument(skip(state))]
pub async fn models_per_predictor_handler(
    State(state): State<AppState>,
) -> Result<Json<ModelsPerPredictorResponse>, ServiceError> {
    let mut models = BTreeMap::new();

    for kind in state.registry.registered() {
        let predictor = state.registry.build(*kind, None)?;
        let available = predictor.available_models().await?;
        models.insert(*kind, available);
    }

    Ok(Json(ModelsPerPredictorResponse { models }))
}
