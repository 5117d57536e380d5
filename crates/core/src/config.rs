//! Configuration management for the Scout CLI.
//!
//! This module handles loading and merging configuration from multiple sources:
//! - Environment variables (`SCOUT_*`)
//! - Command-line flags
//! - An optional YAML config file
//!
//! Precedence is CLI flags > environment variables > config file > defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{AppError, AppResult};

/// Main application configuration.
///
/// This struct holds all global configuration options that affect
/// CLI behavior across commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// LLM provider (e.g., "ollama", "openai", "claude")
    pub provider: String,

    /// Model identifier
    pub model: String,

    /// Custom LLM endpoint URL
    pub endpoint: Option<String>,

    /// API key for the LLM provider
    pub api_key: Option<String>,

    /// Search capability settings
    pub search: SearchConfig,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,
}

/// Search capability configuration.
///
/// Defaults mirror the Qwant v3 API parameters the research pipeline
/// was built against; any API with the same request/response shape works.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Base URL of the search API
    pub endpoint: String,

    /// Search locale (e.g., "en_GB")
    pub locale: String,

    /// Safe-search level (0 = off, 1 = moderate, 2 = strict)
    pub safesearch: u8,

    /// Result-count hint sent to the provider
    pub count: u32,

    /// Request timeout for search and page fetches, in seconds
    #[serde(rename = "timeoutSecs")]
    pub timeout_secs: u64,

    /// Maximum number of non-empty documents to retrieve per question
    #[serde(rename = "maxResults")]
    pub max_results: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.qwant.com/v3".to_string(),
            locale: "en_GB".to_string(),
            safesearch: 1,
            count: 10,
            timeout_secs: 10,
            max_results: 6,
        }
    }
}

/// Full configuration file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigFile {
    llm: Option<LlmFileConfig>,
    search: Option<SearchConfig>,
    logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LlmFileConfig {
    provider: Option<String>,
    model: Option<String>,
    endpoint: Option<String>,
    /// Environment variable holding the API key
    #[serde(rename = "apiKeyEnv")]
    api_key_env: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingConfig {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config_file: None,
            provider: "ollama".to_string(), // Local-first default
            model: "llama3.2".to_string(),
            endpoint: None,
            api_key: None,
            search: SearchConfig::default(),
            log_level: None,
            verbose: false,
            no_color: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and defaults.
    ///
    /// Environment variables:
    /// - `SCOUT_CONFIG`: Path to config file
    /// - `SCOUT_PROVIDER`: LLM provider
    /// - `SCOUT_MODEL`: Model identifier
    /// - `SCOUT_API_KEY`: API key
    /// - `SCOUT_SEARCH_ENDPOINT`: Search API base URL
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();

        if let Ok(config_file) = std::env::var("SCOUT_CONFIG") {
            config.config_file = Some(PathBuf::from(config_file));
        }

        // Load from YAML config file if one was named or the default exists
        let config_path = config
            .config_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(".scout/config.yaml"));

        if config_path.exists() {
            config = config.merge_yaml(&config_path)?;
        }

        // Environment variables override YAML config
        if let Ok(provider) = std::env::var("SCOUT_PROVIDER") {
            config.provider = provider;
        }

        if let Ok(model) = std::env::var("SCOUT_MODEL") {
            config.model = model;
        }

        if let Ok(key) = std::env::var("SCOUT_API_KEY") {
            config.api_key = Some(key);
        }

        if let Ok(endpoint) = std::env::var("SCOUT_SEARCH_ENDPOINT") {
            config.search.endpoint = endpoint;
        }

        config.log_level = std::env::var("RUST_LOG").ok();

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge YAML configuration file into this config.
    fn merge_yaml(&mut self, path: &PathBuf) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        let mut result = self.clone();

        if let Some(llm) = config_file.llm {
            if let Some(provider) = llm.provider {
                result.provider = provider;
            }
            if let Some(model) = llm.model {
                result.model = model;
            }
            if let Some(endpoint) = llm.endpoint {
                result.endpoint = Some(endpoint);
            }
            if let Some(env_var) = llm.api_key_env {
                if let Ok(key) = std::env::var(&env_var) {
                    result.api_key = Some(key);
                }
            }
        }

        if let Some(search) = config_file.search {
            result.search = search;
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// This method merges command-line flags with the loaded configuration,
    /// giving precedence to CLI flags over environment variables.
    pub fn with_overrides(
        mut self,
        config_file: Option<PathBuf>,
        provider: Option<String>,
        model: Option<String>,
        max_results: Option<usize>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(config_file) = config_file {
            self.config_file = Some(config_file);
        }

        if let Some(provider) = provider {
            self.provider = provider;
        }

        if let Some(model) = model {
            self.model = model;
        }

        if let Some(max_results) = max_results {
            self.search.max_results = max_results;
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Validate configuration for the active provider.
    pub fn validate(&self) -> AppResult<()> {
        let provider = &self.provider;
        let known_providers = ["ollama", "openai", "claude"];

        if !known_providers.contains(&provider.as_str()) {
            return Err(AppError::Config(format!(
                "Unknown provider: {}. Supported: {}",
                provider,
                known_providers.join(", ")
            )));
        }

        // Remote providers need a key; Ollama does not
        if provider != "ollama" && self.api_key.is_none() {
            return Err(AppError::Config(format!(
                "Provider '{}' requires an API key (set SCOUT_API_KEY)",
                provider
            )));
        }

        if self.search.max_results == 0 {
            return Err(AppError::Config(
                "search.maxResults must be at least 1".to_string(),
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
        assert_eq!(config.provider, "ollama");
        assert_eq!(config.model, "llama3.2");
        assert_eq!(config.search.max_results, 6);
        assert_eq!(config.search.locale, "en_GB");
        assert!(!config.verbose);
        assert!(!config.no_color);
    }

    #[test]
    fn test_with_overrides() {
        let config = AppConfig::default();
        let overridden = config.with_overrides(
            None,
            Some("openai".to_string()),
            Some("gpt-4o".to_string()),
            Some(3),
            None,
            true,
            false,
        );

        assert_eq!(overridden.provider, "openai");
        assert_eq!(overridden.model, "gpt-4o");
        assert_eq!(overridden.search.max_results, 3);
        assert!(overridden.verbose);
        assert_eq!(overridden.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_validate_unknown_provider() {
        let mut config = AppConfig::default();
        config.provider = "unknown".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_ollama_needs_no_key() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_remote_provider_needs_key() {
        let mut config = AppConfig::default();
        config.provider = "openai".to_string();
        assert!(config.validate().is_err());

        config.api_key = Some("sk-test".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_max_results() {
        let mut config = AppConfig::default();
        config.search.max_results = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_search_config_yaml_merge() {
        let yaml = r#"
search:
  endpoint: https://search.example.test/v3
  locale: en_US
  safesearch: 2
  count: 5
  timeoutSecs: 4
  maxResults: 3
"#;
        let parsed: super::ConfigFile = serde_yaml::from_str(yaml).unwrap();
        let search = parsed.search.unwrap();
        assert_eq!(search.endpoint, "https://search.example.test/v3");
        assert_eq!(search.max_results, 3);
        assert_eq!(search.timeout_secs, 4);
    }
}
