use thiserror::Error;

use crate::embedding::EmbeddingError;
use crate::regression::RegressionError;
use crate::predictor::registry::PredictorKind;

/// Errors surfaced across the predictor boundary.
///
/// Per-request scoring failures never appear here: `predict` is total and
/// degrades internally. These errors cover strategy construction/dispatch and
/// model discovery only.
#[derive(Debug, Error)]
pub enum PredictorError {
    /// Declared predictor type with no registered implementation.
    #[error("unsupported predictor type: {kind}")]
    Unsupported { kind: PredictorKind },

    /// Strategy could not be instantiated.
    #[error("failed to construct {kind} predictor: {reason}")]
    ConstructionFailed { kind: PredictorKind, reason: String },

    /// Remote model-listing call failed. Discovery never degrades; it errors.
    #[error("model discovery failed: {reason}")]
    DiscoveryFailed { reason: String },
}

/// Errors constructing the linear predictor. Fatal at startup.
#[derive(Debug, Error)]
pub enum LinearError {
    #[error(transparent)]
    Embedding(#[from] EmbeddingError),

    #[error(transparent)]
    Regression(#[from] RegressionError),
}
