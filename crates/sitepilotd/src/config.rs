//! Configuration management for sitepilotd.
//!
//! Loads settings from a TOML file (`--config`, then /etc/sitepilot/config.toml)
//! or uses defaults. `PORT` and `TOGETHER_API_KEY` override the file.

use serde::{Deserialize, Serialize};
use sitepilot_common::catalog::Catalog;
use sitepilot_common::ranking::DEFAULT_PREFIX_CHARS;
use sitepilot_common::resolver::MatchMode;
use sitepilot_common::suggest::DEFAULT_MAX_SUGGESTIONS;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::ConfigError;

/// System config file path
pub const CONFIG_PATH: &str = "/etc/sitepilot/config.toml";

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Base URL of the site navigation targets are resolved against
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_bind() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_base_url() -> String {
    "http://localhost:3092/".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            base_url: default_base_url(),
        }
    }
}

/// Intent catalog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Catalog TOML file; the bundled catalog when unset
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Synonym matching strategy
    #[serde(default)]
    pub matching: MatchMode,

    /// Cap on suggestions for unrecognized prompts
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,
}

fn default_max_suggestions() -> usize {
    DEFAULT_MAX_SUGGESTIONS
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: None,
            matching: MatchMode::default(),
            max_suggestions: default_max_suggestions(),
        }
    }
}

/// Content store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

fn default_store_path() -> PathBuf {
    PathBuf::from("/var/lib/sitepilot/content.db")
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

/// Retrieval and ranking limits for the answer flow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Characters of each record compared against the prompt
    #[serde(default = "default_prefix_chars")]
    pub prefix_chars: usize,

    /// Records taken from the direct substring search
    #[serde(default = "default_primary_limit")]
    pub primary_limit: usize,

    /// Records taken per keyword on the fallback search
    #[serde(default = "default_per_keyword_limit")]
    pub per_keyword_limit: usize,

    /// Cap on fallback records overall
    #[serde(default = "default_total_limit")]
    pub total_limit: usize,
}

fn default_prefix_chars() -> usize {
    DEFAULT_PREFIX_CHARS
}

fn default_primary_limit() -> usize {
    5
}

fn default_per_keyword_limit() -> usize {
    3
}

fn default_total_limit() -> usize {
    5
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            prefix_chars: default_prefix_chars(),
            primary_limit: default_primary_limit(),
            per_keyword_limit: default_per_keyword_limit(),
            total_limit: default_total_limit(),
        }
    }
}

/// Completion API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// Bearer token; `TOGETHER_API_KEY` overrides
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_top_p")]
    pub top_p: f32,

    #[serde(default = "default_top_k")]
    pub top_k: u32,
}

fn default_endpoint() -> String {
    "https://api.together.xyz".to_string()
}

fn default_model() -> String {
    "mistralai/Mixtral-8x7B-Instruct-v0.1".to_string()
}

fn default_timeout() -> u64 {
    60
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_temperature() -> f32 {
    0.7
}

fn default_top_p() -> f32 {
    0.7
}

fn default_top_k() -> u32 {
    50
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            api_key: None,
            timeout_secs: default_timeout(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            top_k: default_top_k(),
        }
    }
}

/// Top-level daemon configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub ranking: RankingConfig,
    #[serde(default)]
    pub llm: LlmConfig,
}

impl Config {
    /// Load config: an explicit path must exist, the system path is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match explicit {
            Some(path) => Self::load_from_path(path)?,
            None if Path::new(CONFIG_PATH).exists() => Self::load_from_path(CONFIG_PATH)?,
            None => {
                warn!("Config not found at {}, using defaults", CONFIG_PATH);
                Config::default()
            }
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load config from a specific path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config: Config = toml::from_str(&content)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Apply environment overrides from `lookup`
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT").filter(|p| !p.trim().is_empty()) {
            let host = self
                .server
                .bind
                .rsplit_once(':')
                .map(|(host, _)| host.to_string())
                .unwrap_or_else(|| "127.0.0.1".to_string());
            self.server.bind = format!("{}:{}", host, port.trim());
        }
        if let Some(key) = lookup("TOGETHER_API_KEY").filter(|k| !k.trim().is_empty()) {
            self.llm.api_key = Some(key);
        }
    }

    /// The configured catalog, or the bundled one
    pub fn load_catalog(&self) -> Result<Catalog, ConfigError> {
        let catalog = match &self.catalog.path {
            Some(path) => Catalog::load(path)?,
            None => Catalog::builtin()?,
        };
        Ok(catalog)
    }
}
