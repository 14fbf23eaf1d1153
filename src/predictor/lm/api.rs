//! OpenAI-compatible chat-completion wire model and client.
//!
//! The core depends only on the `{model, messages, temperature, max_tokens}`
//! request shape and the `{choices[0].message.content}` response shape.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::config::LmConfig;
use super::error::LmError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ModelList {
    data: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
struct ModelEntry {
    id: String,
}

/// Seam over the remote chat-completion endpoint.
#[async_trait]
pub trait ChatApi: Send + Sync {
    /// Sends one chat completion and returns the first choice's content.
    async fn chat_completion(&self, request: &ChatRequest) -> Result<String, LmError>;

    /// Queries the endpoint's model-listing route.
    async fn list_models(&self) -> Result<Vec<String>, LmError>;
}

/// `reqwest`-backed [`ChatApi`] with an explicit per-call timeout.
///
/// One client per predictor instance; no pooling state is shared across
/// requests.
#[derive(Debug, Clone)]
pub struct HttpChatApi {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpChatApi {
    pub fn new(config: &LmConfig) -> Result<Self, LmError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl ChatApi for HttpChatApi {
    async fn chat_completion(&self, request: &ChatRequest) -> Result<String, LmError> {
        debug!(
            url = %format!("{}/chat/completions", self.base_url),
            model = %request.model,
            "Sending chat completion request"
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?
            .error_for_status()?
            .json::<ChatResponse>()
            .await?;

        let choice = response.choices.into_iter().next().ok_or(LmError::EmptyResponse)?;
        Ok(choice.message.content)
    }

    async fn list_models(&self) -> Result<Vec<String>, LmError> {
        let response = self
            .client
            .get(format!("{}/models", self.base_url))
            .bearer_auth(&self.api_key)
            .send()
            .await?
            .error_for_status()?
            .json::<ModelList>()
            .await?;

        Ok(response.data.into_iter().map(|m| m.id).collect())
    }
}

/// Canned [`ChatApi`] for tests.
#[cfg(any(test, feature = "mock"))]
#[derive(Debug, Clone, Default)]
pub struct MockChatApi {
    reply: Option<String>,
    models: Vec<String>,
    fail_listing: bool,
}

#[cfg(any(test, feature = "mock"))]
impl MockChatApi {
    /// Always answers completions with `reply`.
    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self {
            reply: Some(reply.into()),
            models: vec!["mock-model".to_string()],
            fail_listing: false,
        }
    }

    /// Fails every completion call.
    pub fn failing() -> Self {
        Self {
            reply: None,
            models: vec![],
            fail_listing: true,
        }
    }

    /// Sets the model listing returned by [`ChatApi::list_models`].
    pub fn with_models(mut self, models: Vec<String>) -> Self {
        self.models = models;
        self.fail_listing = false;
        self
    }
}

#[cfg(any(test, feature = "mock"))]
#[async_trait]
impl ChatApi for MockChatApi {
    async fn chat_completion(&self, _request: &ChatRequest) -> Result<String, LmError> {
        self.reply.clone().ok_or(LmError::EmptyResponse)
    }

    async fn list_models(&self) -> Result<Vec<String>, LmError> {
        if self.fail_listing {
            return Err(LmError::MalformedResponse {
                reason: "mock listing failure".to_string(),
            });
        }
        Ok(self.models.clone())
    }
}
