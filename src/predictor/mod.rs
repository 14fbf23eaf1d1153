//! Predictor contract and the three scoring strategies.
//!
//! Every strategy implements [`Predictor`]: score a candidate/vacancy pair and
//! list the models it can use. `predict` is total — strategy-internal failures
//! degrade to a zero score with the error carried in the explanation, they are
//! never propagated. Strategies are independent of each other and hold no
//! request-spanning mutable state, so instances are safe to share and invoke
//! concurrently.
//!
//! Score scales differ per strategy (0-5 for dummy/linear, 0-100 for the
//! remote model); callers must not compare scores across strategies without
//! normalizing.

pub mod dummy;
mod error;
pub mod linear;
pub mod lm;
pub mod registry;


pub use dummy::DummyPredictor;
pub use error::{LinearError, PredictorError};
pub use linear::LinearPredictor;
pub use lm::LmPredictor;
pub use registry::{PredictorKind, PredictorRegistry, REGISTERED_KINDS};

use async_trait::async_trait;

/// One candidate/vacancy pair to score.
///
/// `hr_comment` is part of the contract for forward compatibility but is
/// currently inert: no strategy uses it for scoring.
#[derive(Debug, Clone, Default)]
pub struct MatchInput {
    pub candidate: String,
    pub vacancy: String,
    pub hr_comment: String,
}

/// Outcome of one prediction.
///
/// `score: None` means no score could be extracted (remote-model parsing
/// ambiguity); it is surfaced as-is, never silently defaulted to zero. A
/// `Some(0.0)` score paired with an "Error in prediction" explanation is the
/// degraded-failure sentinel.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub score: Option<f64>,
    pub explanation: Option<String>,
}

/// One interchangeable scoring strategy.
#[async_trait]
pub trait Predictor: Send + Sync {
    /// Scores a candidate/vacancy pair. Total for well-formed input: inputs
    /// are never mutated and internal failures degrade rather than propagate.
    async fn predict(&self, input: &MatchInput) -> Prediction;

    /// Lists the model identifiers this strategy can use, for discovery/UI
    /// population only.
    async fn available_models(&self) -> Result<Vec<String>, PredictorError>;
}
