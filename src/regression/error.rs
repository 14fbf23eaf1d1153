use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegressionError {
    #[error("regressor weights not found at path: {path}")]
    ModelNotFound { path: PathBuf },

    #[error("failed to load regressor weights: {reason}")]
    ModelLoadFailed { reason: String },

    #[error("invalid regressor weights: {reason}")]
    InvalidModel { reason: String },

    #[error("feature dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}
