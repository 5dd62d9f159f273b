//! Layered configuration loading
//!
//! Sources, weakest first: built-in defaults, the global config file under
//! the user config directory, a `verdict.toml` or `.verdict.toml` in the
//! working directory, and `VERDICT_`-prefixed environment variables. Nested
//! keys in the environment use `__`, e.g. `VERDICT_SWARM__NUM_ROUNDS=4`.

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;
use verdict_application::SwarmConfig;

/// Errors from loading configuration
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("Failed to load configuration: {0}")]
    Extraction(#[from] figment::Error),
}

/// Backend endpoint settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendSection {
    /// Base URL of the OpenAI-compatible endpoint
    pub base_url: String,
    /// Environment variable holding the API key, if the endpoint needs one
    pub api_key_env: String,
    /// Models to draw committees from
    pub models: Vec<String>,
    /// Completion token budget per judge invocation
    pub max_tokens: u32,
}

impl Default for BackendSection {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            models: vec!["gpt-4o-mini".to_string()],
            max_tokens: 1024,
        }
    }
}

impl BackendSection {
    /// Resolve the API key from the configured environment variable
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env).ok().filter(|k| !k.is_empty())
    }
}

/// The full on-disk configuration shape
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub swarm: SwarmConfig,
    pub backend: BackendSection,
}

/// Loads [`FileConfig`] from the layered sources
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from defaults, config files, and environment
    pub fn load() -> Result<FileConfig, ConfigLoadError> {
        Self::figment(None).extract().map_err(Into::into)
    }

    /// Load configuration with an explicit file taking precedence over the
    /// discovered ones
    pub fn load_from(path: &std::path::Path) -> Result<FileConfig, ConfigLoadError> {
        Self::figment(Some(path)).extract().map_err(Into::into)
    }

    fn figment(explicit: Option<&std::path::Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(FileConfig::default()));

        if let Some(global) = Self::global_config_path() {
            debug!(path = %global.display(), "Considering global config file");
            figment = figment.merge(Toml::file(global));
        }
        figment = figment
            .merge(Toml::file("verdict.toml"))
            .merge(Toml::file(".verdict.toml"));
        if let Some(path) = explicit {
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Env::prefixed("VERDICT_").split("__"))
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("verdict-swarm").join("config.toml"))
    }
}
