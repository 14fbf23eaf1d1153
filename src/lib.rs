//! Fitscore library crate (used by the server binary and integration tests).
//!
//! # Public API Surface
//!
//! The exports are organized by module:
//!
//! ## Core Types (Stable)
//! - [`Config`], [`ConfigError`] - Server configuration
//! - [`Predictor`], [`MatchInput`], [`Prediction`] - Scoring contract
//! - [`PredictorRegistry`], [`PredictorKind`] - Strategy dispatch
//!
//! ## Strategies
//! - [`DummyPredictor`] - Random baseline
//! - [`LinearPredictor`] - Embedding + ridge regression
//! - [`LmPredictor`], [`LmConfig`] - Remote chat-completion scoring
//!
//! ## Embedding & Regression
//! - [`TextEmbedder`], [`EmbedderConfig`] - BERT CLS embeddings (stub mode for tests)
//! - [`RidgeModel`], [`RidgeWeights`] - JSON-backed linear regression
//!
//! ## HTTP Service
//! - [`create_router`], [`AppState`] - Axum router and shared state
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod config;
pub mod constants;
pub mod embedding;
pub mod predictor;
pub mod regression;
pub mod service;

pub use config::{Config, ConfigError};
pub use constants::{DEFAULT_EMBEDDING_DIM, DEFAULT_MAX_SEQ_LEN, SCORE_SCALE_MAX};
pub use embedding::{EmbedderConfig, EmbeddingError, TextEmbedder};
pub use predictor::lm::{LmConfig, LmOverrides, LmPredictor};
#[cfg(any(test, feature = "mock"))]
pub use predictor::lm::MockChatApi;
pub use predictor::{
    DummyPredictor, LinearPredictor, MatchInput, Prediction, Predictor, PredictorError,
    PredictorKind, PredictorRegistry, REGISTERED_KINDS,
};
pub use regression::{RegressionError, RidgeModel, RidgeWeights};
pub use service::{create_router, AppState, MatchRequest, MatchResponse, ServiceError};
