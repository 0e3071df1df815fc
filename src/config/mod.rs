//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Riot API upstream configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiotConfig {
    /// Environment variable holding the API key
    #[serde(default = "default_riot_key_env")]
    pub api_key_env: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_riot_timeout")]
    pub timeout_seconds: u64,

    /// How many match fetches may be in flight at once
    #[serde(default = "default_max_concurrent_fetches")]
    pub max_concurrent_fetches: usize,
}

fn default_riot_key_env() -> String {
    "RIOT_API_KEY".to_string()
}

fn default_riot_timeout() -> u64 {
    10
}

fn default_max_concurrent_fetches() -> usize {
    4
}

impl Default for RiotConfig {
    fn default() -> Self {
        Self {
            api_key_env: default_riot_key_env(),
            timeout_seconds: default_riot_timeout(),
            max_concurrent_fetches: default_max_concurrent_fetches(),
        }
    }
}

/// Data Dragon catalog configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_catalog_base_url")]
    pub base_url: String,

    /// Patch version the catalog documents are fetched for
    #[serde(default = "default_catalog_version")]
    pub version: String,

    #[serde(default = "default_catalog_language")]
    pub language: String,

    #[serde(default = "default_catalog_timeout")]
    pub timeout_seconds: u64,
}

fn default_catalog_base_url() -> String {
    "https://ddragon.leagueoflegends.com".to_string()
}

fn default_catalog_version() -> String {
    "15.1.1".to_string()
}

fn default_catalog_language() -> String {
    "en_US".to_string()
}

fn default_catalog_timeout() -> u64 {
    10
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_catalog_base_url(),
            version: default_catalog_version(),
            language: default_catalog_language(),
            timeout_seconds: default_catalog_timeout(),
        }
    }
}

/// AI backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    /// Environment variable holding the API key
    #[serde(default = "default_ai_key_env")]
    pub api_key_env: String,

    /// Base URL for the AI service
    #[serde(default = "default_ai_base_url")]
    pub base_url: String,

    /// Default model to use
    #[serde(default = "default_ai_model")]
    pub model: String,

    /// Models callers may request
    #[serde(default = "default_available_models")]
    pub available_models: Vec<String>,

    /// Default response timeout in seconds
    #[serde(default = "default_ai_timeout")]
    pub timeout_seconds: u64,
}

fn default_ai_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

fn default_ai_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_ai_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_available_models() -> Vec<String> {
    vec![
        "gemini-2.0-flash".to_string(),
        "gemini-2.0-flash-lite".to_string(),
        "gemini-1.5-flash".to_string(),
    ]
}

fn default_ai_timeout() -> u64 {
    10
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key_env: default_ai_key_env(),
            base_url: default_ai_base_url(),
            model: default_ai_model(),
            available_models: default_available_models(),
            timeout_seconds: default_ai_timeout(),
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origin() -> String {
    "*".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub riot: RiotConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub ai: AiConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            server: ServerConfig::default(),
            riot: RiotConfig::default(),
            catalog: CatalogConfig::default(),
            ai: AiConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "Server port must be greater than 0".to_string(),
            ));
        }

        if self.riot.timeout_seconds == 0 {
            return Err(ConfigError::ValidationError(
                "Riot API timeout must be greater than 0".to_string(),
            ));
        }

        if self.riot.max_concurrent_fetches == 0 {
            return Err(ConfigError::ValidationError(
                "Concurrent fetch limit must be greater than 0".to_string(),
            ));
        }

        if self.ai.timeout_seconds == 0 {
            return Err(ConfigError::ValidationError(
                "AI timeout must be greater than 0".to_string(),
            ));
        }

        if self.catalog.version.is_empty() {
            return Err(ConfigError::ValidationError(
                "Catalog version must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.log_level, "info");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.riot.api_key_env, "RIOT_API_KEY");
        assert_eq!(config.riot.max_concurrent_fetches, 4);
        assert_eq!(config.catalog.language, "en_US");
        assert_eq!(config.ai.model, "gemini-2.0-flash");
    }

    #[test]
    fn test_config_validation_ok() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_bad_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_bad_timeout() {
        let mut config = AppConfig::default();
        config.ai.timeout_seconds = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_bad_fetch_limit() {
        let mut config = AppConfig::default();
        config.riot.max_concurrent_fetches = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string(&config).unwrap();

        // Should be parseable
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.server.port, parsed.server.port);
        assert_eq!(config.catalog.version, parsed.catalog.version);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let parsed: AppConfig = toml::from_str("[server]\nport = 9000\n").unwrap();

        assert_eq!(parsed.server.port, 9000);
        assert_eq!(parsed.server.host, "127.0.0.1");
        assert_eq!(parsed.ai.timeout_seconds, 10);
    }
}
