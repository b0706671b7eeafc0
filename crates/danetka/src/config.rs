//! Game configuration loaded from TOML.

use crate::llm_client::{LlmConfig, LlmProvider};
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Configuration for a game session.
#[derive(Debug, Clone, PartialEq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct GameConfig {
    /// Directory of `*.json` game definitions.
    #[serde(default = "default_games_dir")]
    games_dir: PathBuf,

    /// System prompt file for the host.
    #[serde(default = "default_prompt_path")]
    prompt_path: PathBuf,

    /// LLM provider (openai or anthropic).
    #[serde(default = "default_provider")]
    llm_provider: LlmProvider,

    /// LLM model name (e.g., "gpt-4o", "claude-3-5-haiku-20241022").
    #[serde(default = "default_model")]
    llm_model: String,

    /// Maximum tokens for LLM responses.
    #[serde(default = "default_max_tokens")]
    llm_max_tokens: u32,

    /// Sampling temperature.
    #[serde(default)]
    temperature: f32,
}

fn default_games_dir() -> PathBuf {
    PathBuf::from("games")
}

fn default_prompt_path() -> PathBuf {
    PathBuf::from("prompt.md")
}

fn default_provider() -> LlmProvider {
    LlmProvider::OpenAI
}

fn default_model() -> String {
    "gpt-4o".to_string()
}

fn default_max_tokens() -> u32 {
    512
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            games_dir: default_games_dir(),
            prompt_path: default_prompt_path(),
            llm_provider: default_provider(),
            llm_model: default_model(),
            llm_max_tokens: default_max_tokens(),
            temperature: 0.0,
        }
    }
}

impl GameConfig {
    /// Loads configuration from a TOML file. Missing keys take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(
            games_dir = %config.games_dir.display(),
            model = %config.llm_model,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file exists but is invalid.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Creates LLM configuration from this config.
    /// Requires OPENAI_API_KEY or ANTHROPIC_API_KEY environment variable.
    #[instrument(skip(self), fields(provider = ?self.llm_provider, model = %self.llm_model))]
    pub fn create_llm_config(&self) -> Result<LlmConfig, ConfigError> {
        debug!("Creating LLM config");

        let var = self.llm_provider.api_key_var();
        let api_key = std::env::var(var)
            .map_err(|_| ConfigError::new(format!("{} environment variable not set", var)))?;

        Ok(LlmConfig::new(
            self.llm_provider,
            api_key,
            self.llm_model.clone(),
            self.llm_max_tokens,
            self.temperature,
        ))
    }
}

/// Configuration error. Always fatal at startup.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
