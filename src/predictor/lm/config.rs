use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default chat-completion endpoint (LM Studio style local server).
pub const DEFAULT_LM_BASE_URL: &str = "http://localhost:5001/v1";

/// Default credential. Local inference servers accept any token.
pub const DEFAULT_LM_API_KEY: &str = "not-needed";

/// Default model identifier sent to the endpoint.
pub const DEFAULT_LM_MODEL: &str = "local-model";

/// Default remote-call budget in seconds.
pub const DEFAULT_LM_TIMEOUT_SECS: u64 = 180;

/// Configuration for [`LmPredictor`](super::LmPredictor).
///
/// Resolved from the environment once at process start; per-request
/// [`LmOverrides`] replace individual fields.
#[derive(Clone)]
pub struct LmConfig {
    /// Base URL of the OpenAI-compatible endpoint.
    pub api_base_url: String,
    /// Bearer credential.
    pub api_key: String,
    /// Model identifier.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Output token budget.
    pub max_tokens: u32,
    /// Hard bound on each remote call.
    pub timeout: Duration,
    /// Custom prompt template; `None` uses the built-in template.
    pub prompt_template: Option<String>,
}

// Manual impl: the bearer credential must never reach logs.
impl std::fmt::Debug for LmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LmConfig")
            .field("api_base_url", &self.api_base_url)
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("timeout", &self.timeout)
            .field("custom_prompt_template", &self.prompt_template.is_some())
            .finish()
    }
}

impl Default for LmConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_LM_BASE_URL.to_string(),
            api_key: DEFAULT_LM_API_KEY.to_string(),
            model: DEFAULT_LM_MODEL.to_string(),
            temperature: 0.7,
            max_tokens: 256,
            timeout: Duration::from_secs(DEFAULT_LM_TIMEOUT_SECS),
            prompt_template: None,
        }
    }
}

impl LmConfig {
    pub const ENV_BASE_URL: &'static str = "FITSCORE_LM_BASE_URL";
    pub const ENV_API_KEY: &'static str = "FITSCORE_LM_API_KEY";
    pub const ENV_MODEL: &'static str = "FITSCORE_LM_MODEL";
    pub const ENV_TEMPERATURE: &'static str = "FITSCORE_LM_TEMPERATURE";
    pub const ENV_MAX_TOKENS: &'static str = "FITSCORE_LM_MAX_TOKENS";
    pub const ENV_TIMEOUT_SECS: &'static str = "FITSCORE_LM_TIMEOUT_SECS";

    /// Loads config from environment variables (falling back to defaults).
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            api_base_url: parse_string(Self::ENV_BASE_URL, defaults.api_base_url),
            api_key: parse_string(Self::ENV_API_KEY, defaults.api_key),
            model: parse_string(Self::ENV_MODEL, defaults.model),
            temperature: parse_f32(Self::ENV_TEMPERATURE, defaults.temperature),
            max_tokens: parse_u32(Self::ENV_MAX_TOKENS, defaults.max_tokens),
            timeout: Duration::from_secs(parse_u64(
                Self::ENV_TIMEOUT_SECS,
                DEFAULT_LM_TIMEOUT_SECS,
            )),
            prompt_template: None,
        }
    }

    /// Applies per-request overrides on top of this config.
    pub fn with_overrides(&self, overrides: Option<&LmOverrides>) -> Self {
        let mut config = self.clone();

        if let Some(overrides) = overrides {
            if let Some(url) = &overrides.api_base_url {
                config.api_base_url = url.clone();
            }
            if let Some(key) = &overrides.api_key {
                config.api_key = key.clone();
            }
            if let Some(model) = &overrides.model {
                config.model = model.clone();
            }
        }

        config
    }
}

/// Per-request overrides for the remote-model strategy, carried in the
/// request body as `predictor_parameters`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LmOverrides {
    /// Base URL for the language model API.
    pub api_base_url: Option<String>,
    /// API key for the language model service.
    pub api_key: Option<String>,
    /// Model identifier to use for prediction.
    pub model: Option<String>,
}

fn parse_string(var_name: &str, default: String) -> String {
    std::env::var(var_name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or(default)
}

fn parse_f32(var_name: &str, default: f32) -> f32 {
    std::env::var(var_name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn parse_u32(var_name: &str, default: u32) -> u32 {
    std::env::var(var_name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn parse_u64(var_name: &str, default: u64) -> u64 {
    std::env::var(var_name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
