//! Random-score predictor for smoke testing. Ignores all input content.

use async_trait::async_trait;
use rand::Rng;

use super::{MatchInput, Prediction, Predictor, PredictorError};

const STRONG_MATCH: &str =
    "Strong match! The candidate appears to have most of the required skills.";
const MODERATE_MATCH: &str = "Moderate match. Some skills align with the requirements.";
const LIMITED_MATCH: &str = "Limited match. Few skills align with the job requirements.";

/// Predictor returning a uniformly random score in {0..4} with a banded
/// canned explanation.
#[derive(Debug, Clone, Copy, Default)]
pub struct DummyPredictor;

impl DummyPredictor {
    pub const MODEL_ID: &'static str = "dummy-model-v1";

    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Predictor for DummyPredictor {
    async fn predict(&self, _input: &MatchInput) -> Prediction {
        let draw: f64 = rand::thread_rng().gen_range(0.1..=0.9);

        // Bands are evaluated on the raw [0.1, 0.9] draw; the returned score
        // is the draw mapped onto the 0-5 scale and truncated to an integer.
        let explanation = if draw >= 0.7 {
            STRONG_MATCH
        } else if draw >= 0.4 {
            MODERATE_MATCH
        } else {
            LIMITED_MATCH
        };

        Prediction {
            score: Some((draw * crate::constants::SCORE_SCALE_MAX).trunc()),
            explanation: Some(explanation.to_string()),
        }
    }

    async fn available_models(&self) -> Result<Vec<String>, PredictorError> {
        Ok(vec![Self::MODEL_ID.to_string()])
    }
}

#[cfg(test)]
pub(crate) fn known_explanations() -> [&'static str; 3] {
    [STRONG_MATCH, MODERATE_MATCH, LIMITED_MATCH]
}
