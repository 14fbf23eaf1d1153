use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::predictor::{PredictorError, PredictorKind};

/// Errors surfaced at the HTTP boundary.
///
/// A malformed body (including a syntactically invalid `predictor_type`)
/// never reaches this type: it is rejected by body deserialization before any
/// handler logic runs. `UnsupportedPredictor` covers the distinct case of a
/// declared-but-unregistered strategy identifier.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("invalid request: {0}")]
    Validation(String),

    #[error("unsupported predictor type: {0}")]
    UnsupportedPredictor(PredictorKind),

    #[error("predictor construction failed: {0}")]
    PredictorConstruction(String),

    #[error("model discovery failed: {0}")]
    DiscoveryFailed(String),
}

impl From<PredictorError> for ServiceError {
    fn from(err: PredictorError) -> Self {
        match err {
            PredictorError::Unsupported { kind } => ServiceError::UnsupportedPredictor(kind),
            PredictorError::ConstructionFailed { .. } => {
                ServiceError::PredictorConstruction(err.to_string())
            }
            PredictorError::DiscoveryFailed { reason } => ServiceError::DiscoveryFailed(reason),
        }
    }
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServiceError::UnsupportedPredictor(_) => StatusCode::BAD_REQUEST,
            ServiceError::PredictorConstruction(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::DiscoveryFailed(_) => StatusCode::BAD_GATEWAY,
        };

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: status.as_u16(),
        });

        (status, body).into_response()
    }
}
