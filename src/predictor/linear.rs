//! Embedding + ridge-regression predictor.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error};

use crate::constants::SCORE_SCALE_MAX;
use crate::embedding::TextEmbedder;
use crate::regression::{RegressionError, RidgeModel};

use super::{LinearError, MatchInput, Prediction, Predictor, PredictorError};

const EXCELLENT_MATCH: &str =
    "Excellent match! The candidate's profile strongly aligns with the position requirements.";
const GOOD_MATCH: &str = "Good match. The candidate has many of the required qualifications.";
const MODERATE_MATCH: &str = "Moderate match. Some qualifications align with the requirements.";
const LIMITED_MATCH: &str =
    "Limited match. The candidate's profile shows minimal alignment with the requirements.";

/// Predictor running a pretrained ridge regressor over concatenated text
/// embeddings (vacancy first, then candidate).
///
/// Construction loads and validates the regressor once; a missing or
/// mismatched model is fatal at startup, never a per-request error. The
/// loaded model is read-only and safe for concurrent inference.
pub struct LinearPredictor {
    embedder: Arc<TextEmbedder>,
    model: RidgeModel,
}

impl std::fmt::Debug for LinearPredictor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinearPredictor")
            .field("embedder", &self.embedder)
            .field("feature_dim", &self.model.feature_dim())
            .finish()
    }
}

impl LinearPredictor {
    pub const MODEL_ID: &'static str = "ridge-model-v1";

    /// Loads the regressor weights and checks them against the embedder's
    /// feature dimension.
    pub fn load(embedder: Arc<TextEmbedder>, weights_path: &Path) -> Result<Self, LinearError> {
        let model = RidgeModel::load(weights_path)?;

        let expected = 2 * embedder.embedding_dim();
        if model.feature_dim() != expected {
            return Err(LinearError::Regression(RegressionError::DimensionMismatch {
                expected,
                actual: model.feature_dim(),
            }));
        }

        Ok(Self { embedder, model })
    }

    /// Scores one vacancy/candidate pair on the 0-5 scale.
    ///
    /// Deterministic for identical inputs and model state.
    pub fn score_pair(&self, vacancy: &str, candidate: &str) -> Result<f64, LinearError> {
        let mut features = self.embedder.embed(vacancy)?;
        features.extend(self.embedder.embed(candidate)?);

        let raw = self.model.predict(&features)?;

        let scaled = (f64::from(raw) * SCORE_SCALE_MAX).clamp(0.0, SCORE_SCALE_MAX);
        let rounded = (scaled * 100.0).round() / 100.0;

        debug!(raw, score = rounded, "Linear prediction");
        Ok(rounded)
    }

    fn band_explanation(score: f64) -> &'static str {
        if score >= 4.0 {
            EXCELLENT_MATCH
        } else if score >= 3.0 {
            GOOD_MATCH
        } else if score >= 2.0 {
            MODERATE_MATCH
        } else {
            LIMITED_MATCH
        }
    }
}

#[async_trait]
impl Predictor for LinearPredictor {
    async fn predict(&self, input: &MatchInput) -> Prediction {
        // hr_comment is accepted but not part of the current feature set.
        match self.score_pair(&input.vacancy, &input.candidate) {
            Ok(score) => Prediction {
                score: Some(score),
                explanation: Some(Self::band_explanation(score).to_string()),
            },
            Err(e) => {
                error!(error = %e, "Linear prediction failed");
                Prediction {
                    score: Some(0.0),
                    explanation: Some(format!("Error in prediction: {e}")),
                }
            }
        }
    }

    async fn available_models(&self) -> Result<Vec<String>, PredictorError> {
        Ok(vec![Self::MODEL_ID.to_string()])
    }
}
