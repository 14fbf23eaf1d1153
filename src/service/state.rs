use std::sync::Arc;

use crate::predictor::PredictorRegistry;

/// Shared handler state: the read-only strategy registry built at startup.
#[derive(Clone, Debug)]
pub struct AppState {
    pub registry: Arc<PredictorRegistry>,
}

impl AppState {
    pub fn new(registry: Arc<PredictorRegistry>) -> Self {
        Self { registry }
    }
}
