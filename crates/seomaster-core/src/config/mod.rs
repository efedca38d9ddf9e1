//! Configuration management for SEOMaster.
//!
//! Configuration is loaded from multiple sources with the following priority:
//! 1. Environment variables (highest priority)
//! 2. Project-local `seomaster.toml` file
//! 3. User config `~/.config/seomaster/config.toml`
//! 4. Built-in defaults (lowest priority)

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::genai::{GenAiError, GeminiClient};

mod defaults;

pub use defaults::*;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API key for the generation endpoint. Usually supplied via
    /// environment rather than written to a config file.
    pub api_key: Option<String>,

    /// Generation model identifier.
    pub model: String,

    /// API base URL (for proxies or regional endpoints).
    pub base_url: String,

    /// Reasoning budget attached to every analysis request.
    pub thinking_budget: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_URL.to_string(),
            thinking_budget: DEFAULT_THINKING_BUDGET,
        }
    }
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// Searches for config in order:
    /// 1. `./seomaster.toml` (project local)
    /// 2. `~/.config/seomaster/config.toml` (user config)
    /// 3. Falls back to defaults
    ///
    /// Environment overrides apply in every case.
    pub fn load() -> Result<Self, ConfigError> {
        if Path::new(DEFAULT_CONFIG_FILE).exists() {
            return Self::from_file(DEFAULT_CONFIG_FILE);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join(DEFAULT_CONFIG_DIR).join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        let mut config = Self::default();
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;

        config.apply_env_overrides();

        Ok(config)
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("SEOMASTER_API_KEY") {
            self.api_key = Some(key);
        } else if self.api_key.is_none() {
            if let Ok(key) = std::env::var("GEMINI_API_KEY") {
                self.api_key = Some(key);
            }
        }
        if let Ok(model) = std::env::var("SEOMASTER_MODEL") {
            self.model = model;
        }
        if let Ok(url) = std::env::var("SEOMASTER_BASE_URL") {
            self.base_url = url;
        }
        if let Ok(budget) = std::env::var("SEOMASTER_THINKING_BUDGET") {
            if let Ok(n) = budget.parse() {
                self.thinking_budget = n;
            }
        }
    }

    /// Builds a generation client from this configuration.
    ///
    /// The client is constructed here, at the composition root, and passed
    /// into [`AnalysisRunner`] explicitly — there is no shared process-wide
    /// client.
    ///
    /// [`AnalysisRunner`]: crate::AnalysisRunner
    pub fn client(&self) -> Result<GeminiClient, GenAiError> {
        let api_key = self.api_key.clone().ok_or(GenAiError::MissingApiKey)?;
        Ok(GeminiClient::new(api_key)
            .with_model(&self.model)
            .with_base_url(&self.base_url))
    }
}
