//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `FITSCORE_*` environment variables.
//! Language-model settings live in [`crate::predictor::lm::LmConfig`] and are
//! resolved separately with the same pattern.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::path::PathBuf;

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `FITSCORE_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8000`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Directory holding the text-encoder model (`config.json`,
    /// `model.safetensors`, `tokenizer.json`). When unset the embedder runs
    /// in deterministic stub mode.
    pub encoder_path: Option<PathBuf>,

    /// Path to the persisted ridge regressor weights (JSON).
    /// Default: `./models/vacancy_matcher.json`.
    pub regressor_path: PathBuf,
}

/// Default ridge weights location used when `FITSCORE_REGRESSOR_PATH` is not set.
pub const DEFAULT_REGRESSOR_PATH: &str = "./models/vacancy_matcher.json";

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8000,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            encoder_path: None,
            regressor_path: PathBuf::from(DEFAULT_REGRESSOR_PATH),
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "FITSCORE_PORT";
    const ENV_BIND_ADDR: &'static str = "FITSCORE_BIND_ADDR";
    const ENV_ENCODER_PATH: &'static str = "FITSCORE_ENCODER_PATH";
    const ENV_REGRESSOR_PATH: &'static str = "FITSCORE_REGRESSOR_PATH";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let encoder_path = Self::parse_optional_path_from_env(Self::ENV_ENCODER_PATH);
        let regressor_path =
            Self::parse_path_from_env(Self::ENV_REGRESSOR_PATH, defaults.regressor_path);

        Ok(Self {
            port,
            bind_addr,
            encoder_path,
            regressor_path,
        })
    }

    /// Validates paths and basic invariants.
    ///
    /// The regressor weights file must exist: a missing linear model is a fatal
    /// configuration error at startup, never a per-request failure.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.regressor_path.exists() {
            return Err(ConfigError::PathNotFound {
                path: self.regressor_path.clone(),
            });
        }
        if !self.regressor_path.is_file() {
            return Err(ConfigError::NotAFile {
                path: self.regressor_path.clone(),
            });
        }

        if let Some(ref path) = self.encoder_path {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_dir() {
                return Err(ConfigError::NotADirectory { path: path.clone() });
            }
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_path_from_env(var_name: &str, default: PathBuf) -> PathBuf {
        env::var(var_name).map(PathBuf::from).unwrap_or(default)
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }
}
