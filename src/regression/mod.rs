//! Pretrained ridge regressor over concatenated text embeddings.
//!
//! Weights are persisted as JSON (`{"weights": [...], "intercept": ...}`),
//! loaded once at process start and read-only thereafter. Inference is a dot
//! product, so a loaded model is safe for concurrent use.

mod error;


pub use error::RegressionError;

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

/// On-disk weight layout for [`RidgeModel`].
#[derive(Debug, Serialize, Deserialize)]
pub struct RidgeWeights {
    /// One coefficient per feature (concatenated vacancy + candidate embedding).
    pub weights: Vec<f32>,
    /// Additive bias term.
    pub intercept: f32,
}

/// Pretrained linear regressor producing a raw scalar prediction.
#[derive(Debug, Clone)]
pub struct RidgeModel {
    weights: Vec<f32>,
    intercept: f32,
}

impl RidgeModel {
    /// Loads persisted weights from a JSON file.
    pub fn load(path: &Path) -> Result<Self, RegressionError> {
        if !path.exists() {
            return Err(RegressionError::ModelNotFound {
                path: path.to_path_buf(),
            });
        }

        let content =
            std::fs::read_to_string(path).map_err(|e| RegressionError::ModelLoadFailed {
                reason: e.to_string(),
            })?;

        let parsed: RidgeWeights =
            serde_json::from_str(&content).map_err(|e| RegressionError::ModelLoadFailed {
                reason: format!("invalid weights JSON: {}", e),
            })?;

        let model = Self::from_weights(parsed)?;

        info!(
            path = %path.display(),
            feature_dim = model.feature_dim(),
            "Ridge regressor loaded"
        );

        Ok(model)
    }

    /// Builds a model from in-memory weights.
    pub fn from_weights(weights: RidgeWeights) -> Result<Self, RegressionError> {
        if weights.weights.is_empty() {
            return Err(RegressionError::InvalidModel {
                reason: "weight vector is empty".to_string(),
            });
        }

        if weights.weights.iter().any(|w| !w.is_finite()) || !weights.intercept.is_finite() {
            return Err(RegressionError::InvalidModel {
                reason: "weights contain non-finite values".to_string(),
            });
        }

        Ok(Self {
            weights: weights.weights,
            intercept: weights.intercept,
        })
    }

    /// Number of input features the model expects.
    pub fn feature_dim(&self) -> usize {
        self.weights.len()
    }

    /// Raw (unscaled, unclipped) prediction for one feature vector.
    pub fn predict(&self, features: &[f32]) -> Result<f32, RegressionError> {
        if features.len() != self.weights.len() {
            return Err(RegressionError::DimensionMismatch {
                expected: self.weights.len(),
                actual: features.len(),
            });
        }

        let dot: f32 = self
            .weights
            .iter()
            .zip(features.iter())
            .map(|(w, x)| w * x)
            .sum();

        Ok(dot + self.intercept)
    }
}
