//! Environment configuration loader.
//!
//! The whole configuration is read once at process start into an
//! [`AppConfig`] and passed by reference into the store and gateway
//! constructors; request-handling code never reads the environment.

use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;

use dungeonduel_types::llm::SamplingConfig;

use crate::llm::groq::GROQ_BASE_URL;

/// Configuration for one server process.
pub struct AppConfig {
    /// Directory holding the SQLite database.
    pub data_dir: PathBuf,
    /// Groq API credential.
    pub groq_api_key: SecretString,
    /// Chat completions endpoint; override for tests or proxies.
    pub groq_base_url: String,
    /// Model identity stamped onto new sessions as narrator A.
    pub model_a: String,
    /// Model identity stamped onto new sessions as narrator B.
    pub model_b: String,
    /// Deployment-fixed sampling parameters.
    pub sampling: SamplingConfig,
}

/// Errors from reading the process environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),
}

impl AppConfig {
    /// Build the configuration from the process environment.
    ///
    /// Required: `GROQ_API_KEY`, `MODEL_A`, `MODEL_B`.
    /// Optional: `DUNGEONDUEL_DATA_DIR` (default `~/.dungeonduel`),
    /// `GROQ_BASE_URL` (default Groq's public endpoint).
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            data_dir: resolve_data_dir(),
            groq_api_key: SecretString::from(require("GROQ_API_KEY")?),
            groq_base_url: std::env::var("GROQ_BASE_URL")
                .unwrap_or_else(|_| GROQ_BASE_URL.to_string()),
            model_a: require("MODEL_A")?,
            model_b: require("MODEL_B")?,
            sampling: SamplingConfig::default(),
        })
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingVar(name))
}

/// Returns the data directory based on `DUNGEONDUEL_DATA_DIR`, falling
/// back to `~/.dungeonduel`.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("DUNGEONDUEL_DATA_DIR") {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .map(|home| home.join(".dungeonduel"))
        .unwrap_or_else(|| PathBuf::from(".dungeonduel"))
}
