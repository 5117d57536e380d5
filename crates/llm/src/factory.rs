//! LLM provider factory.
//!
//! This module provides a factory for creating LLM clients based on
//! application configuration. It handles provider resolution and
//! secret injection.

use crate::client::LlmClient;
use crate::providers::OllamaClient;
use scout_core::{AppError, AppResult};
use std::sync::Arc;

/// Create an LLM client based on the provider name.
///
/// # Arguments
/// * `provider` - Provider identifier ("ollama", "openai", "claude")
/// * `endpoint` - Optional custom endpoint URL
/// * `api_key` - Optional API key (for providers that require it)
///
/// # Returns
/// A shared trait object implementing `LlmClient`
///
/// # Errors
/// Returns error if the provider is unknown or required secrets are missing.
pub fn create_client(
    provider: &str,
    endpoint: Option<&str>,
    api_key: Option<&str>,
) -> AppResult<Arc<dyn LlmClient>> {
    match provider.to_lowercase().as_str() {
        "ollama" => {
            let base_url = endpoint.unwrap_or("http://localhost:11434");
            let client = OllamaClient::with_base_url(base_url);
            Ok(Arc::new(client))
        }
        "openai" => {
            if api_key.is_none() {
                return Err(AppError::Config(
                    "OpenAI provider requires API key".to_string(),
                ));
            }
            // TODO: wire up the OpenAI-compatible chat endpoint
            Err(AppError::Config(
                "OpenAI provider not yet implemented".to_string(),
            ))
        }
        "claude" | "anthropic" => {
            if api_key.is_none() {
                return Err(AppError::Config(
                    "Claude provider requires API key".to_string(),
                ));
            }
            Err(AppError::Config(
                "Claude provider not yet implemented".to_string(),
            ))
        }
        _ => Err(AppError::Config(format!("Unknown provider: {}", provider))),
    }
}
