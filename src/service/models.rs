//! Request/response models for the scoring API.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::predictor::lm::LmOverrides;
use crate::predictor::PredictorKind;

use super::error::ServiceError;

/// Minimum length for vacancy and candidate descriptions.
pub const MIN_DESCRIPTION_LEN: usize = 10;

fn default_predictor_type() -> PredictorKind {
    PredictorKind::Dummy
}

/// Scoring request body.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchRequest {
    /// The job description or requirements for the position.
    pub vacancy_description: String,

    /// The candidate's profile, experience, or resume text.
    pub candidate_description: String,

    /// Free-form HR comments. May be empty; currently unused by scoring.
    #[serde(default)]
    pub hr_comment: String,

    /// The strategy to use for matching.
    #[serde(default = "default_predictor_type")]
    pub predictor_type: PredictorKind,

    /// Optional per-request parameters for the remote-model strategy.
    #[serde(default)]
    pub predictor_parameters: Option<LmOverrides>,
}

impl MatchRequest {
    /// Field-level validation, applied before any strategy executes.
    pub fn validate(&self) -> Result<(), ServiceError> {
        if self.vacancy_description.chars().count() < MIN_DESCRIPTION_LEN {
            return Err(ServiceError::Validation(format!(
                "vacancy_description must be at least {MIN_DESCRIPTION_LEN} characters"
            )));
        }

        if self.candidate_description.chars().count() < MIN_DESCRIPTION_LEN {
            return Err(ServiceError::Validation(format!(
                "candidate_description must be at least {MIN_DESCRIPTION_LEN} characters"
            )));
        }

        Ok(())
    }
}

/// Scoring response body.
///
/// The score is reported on the strategy's own scale (0-5 for dummy/linear,
/// 0-100 for the remote model) and is `null` when no score was extractable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResponse {
    pub score: Option<f64>,
    pub description: Option<String>,
}

/// Registered strategy identifiers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailableModelsResponse {
    pub predictor_types: Vec<PredictorKind>,
}

/// Model identifiers per registered strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsPerPredictorResponse {
    pub models: BTreeMap<PredictorKind, Vec<String>>,
}
