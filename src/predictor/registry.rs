//! Closed strategy registry.
//!
//! Built once at process start, read-only thereafter. The set of strategies
//! is fixed and small, so dispatch is an explicit match rather than runtime
//! plugin registration. The `test` kind is deliberately declared but never
//! registered; requesting it exercises the distinct "unsupported" error path.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::dummy::DummyPredictor;
use super::linear::LinearPredictor;
use super::lm::{ChatApi, LmConfig, LmOverrides, LmPredictor};
use super::{Predictor, PredictorError};

/// Declared predictor types. `Test` has no registered implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictorKind {
    Dummy,
    Linear,
    Lm,
    Test,
}

impl std::fmt::Display for PredictorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PredictorKind::Dummy => "dummy",
            PredictorKind::Linear => "linear",
            PredictorKind::Lm => "lm",
            PredictorKind::Test => "test",
        };
        f.write_str(name)
    }
}

/// Strategy kinds with a registered implementation.
pub const REGISTERED_KINDS: &[PredictorKind] = &[
    PredictorKind::Dummy,
    PredictorKind::Linear,
    PredictorKind::Lm,
];

/// Fixed mapping from strategy kind to constructor.
///
/// The linear predictor (and its loaded model) is shared across requests;
/// dummy and remote-model predictors are cheap and built per request so
/// per-request parameters can apply.
pub struct PredictorRegistry {
    linear: Arc<LinearPredictor>,
    lm_defaults: LmConfig,
    chat_api: Option<Arc<dyn ChatApi>>,
}

impl std::fmt::Debug for PredictorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PredictorRegistry")
            .field("linear", &self.linear)
            .field("lm_defaults", &self.lm_defaults)
            .field("chat_api_override", &self.chat_api.is_some())
            .finish()
    }
}

impl PredictorRegistry {
    pub fn new(linear: Arc<LinearPredictor>, lm_defaults: LmConfig) -> Self {
        Self {
            linear,
            lm_defaults,
            chat_api: None,
        }
    }

    /// Routes all remote-model predictors through the given [`ChatApi`]
    /// instead of HTTP. Used by tests and the `mock` feature.
    pub fn with_chat_api(mut self, api: Arc<dyn ChatApi>) -> Self {
        self.chat_api = Some(api);
        self
    }

    /// Strategy kinds this registry can build.
    pub fn registered(&self) -> &'static [PredictorKind] {
        REGISTERED_KINDS
    }

    /// Instantiates the strategy for `kind`.
    ///
    /// `overrides` apply to the remote-model strategy only; other strategies
    /// ignore them.
    pub fn build(
        &self,
        kind: PredictorKind,
        overrides: Option<&LmOverrides>,
    ) -> Result<Arc<dyn Predictor>, PredictorError> {
        match kind {
            PredictorKind::Dummy => Ok(Arc::new(DummyPredictor::new())),
            PredictorKind::Linear => Ok(self.linear.clone()),
            PredictorKind::Lm => {
                let config = self.lm_defaults.with_overrides(overrides);

                let predictor = match &self.chat_api {
                    Some(api) => LmPredictor::with_api(config, api.clone()),
                    None => LmPredictor::new(config).map_err(|e| {
                        PredictorError::ConstructionFailed {
                            kind,
                            reason: e.to_string(),
                        }
                    })?,
                };

                Ok(Arc::new(predictor))
            }
            PredictorKind::Test => Err(PredictorError::Unsupported { kind }),
        }
    }
}
