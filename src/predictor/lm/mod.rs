//! Remote chat-completion predictor.
//!
//! Builds a structured prompt, sends it to an OpenAI-compatible endpoint and
//! parses the free-text reply back into a score and rationale. Transport
//! failures degrade to a `(0.0, "Error in prediction: ...")` sentinel so the
//! [`Predictor`] contract stays total; model discovery failures are hard
//! errors (discovery must never be silently wrong).
//!
//! Remote scores are on the 0-100 scale requested by the prompt. No retries
//! are performed and there is no cancellation: each call runs to completion,
//! timeout, or error.

pub mod api;
pub mod config;
mod error;
pub mod parser;
pub mod prompt;


pub use api::{ChatApi, ChatMessage, ChatRequest, HttpChatApi};
#[cfg(any(test, feature = "mock"))]
pub use api::MockChatApi;
pub use config::{
    DEFAULT_LM_BASE_URL, DEFAULT_LM_MODEL, DEFAULT_LM_TIMEOUT_SECS, LmConfig, LmOverrides,
};
pub use error::LmError;
pub use parser::{parse_reply, ParsedReply};

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error};

use super::{MatchInput, Prediction, Predictor, PredictorError};

/// Predictor backed by a remote chat-completion endpoint.
pub struct LmPredictor {
    config: LmConfig,
    api: Arc<dyn ChatApi>,
}

impl std::fmt::Debug for LmPredictor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LmPredictor")
            .field("api_base_url", &self.config.api_base_url)
            .field("model", &self.config.model)
            .finish()
    }
}

impl LmPredictor {
    /// Creates a predictor talking HTTP to the configured endpoint.
    pub fn new(config: LmConfig) -> Result<Self, LmError> {
        let api = Arc::new(HttpChatApi::new(&config)?);
        Ok(Self { config, api })
    }

    /// Creates a predictor over an explicit [`ChatApi`] implementation.
    pub fn with_api(config: LmConfig, api: Arc<dyn ChatApi>) -> Self {
        Self { config, api }
    }

    fn build_request(&self, input: &MatchInput) -> ChatRequest {
        let template = self
            .config
            .prompt_template
            .as_deref()
            .unwrap_or(prompt::PROMPT_TEMPLATE);

        let user_prompt = prompt::render(template, &input.vacancy, &input.candidate);

        ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage::system(prompt::SYSTEM_PROMPT),
                ChatMessage::user(user_prompt),
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        }
    }
}

#[async_trait]
impl Predictor for LmPredictor {
    async fn predict(&self, input: &MatchInput) -> Prediction {
        let request = self.build_request(input);

        match self.api.chat_completion(&request).await {
            Ok(raw) => {
                let parsed = parse_reply(&raw);
                debug!(
                    score = ?parsed.score,
                    has_thought = parsed.thought.is_some(),
                    "Parsed model reply"
                );

                Prediction {
                    score: parsed.score,
                    explanation: parsed.thought,
                }
            }
            Err(e) => {
                error!(error = %e, "Chat completion failed");
                Prediction {
                    score: Some(0.0),
                    explanation: Some(format!("Error in prediction: {e}")),
                }
            }
        }
    }

    async fn available_models(&self) -> Result<Vec<String>, PredictorError> {
        self.api
            .list_models()
            .await
            .map_err(|e| PredictorError::DiscoveryFailed {
                reason: e.to_string(),
            })
    }
}
