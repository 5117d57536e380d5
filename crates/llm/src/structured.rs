//! Strict structured completion.
//!
//! A structured call is required to return valid data for its declared
//! type or fail outright — there is no partial or best-effort parsing,
//! and no automatic retry. Callers treat the error as fatal for their
//! stage.

use scout_core::{AppError, AppResult};
use serde::de::DeserializeOwned;

use crate::client::{LlmClient, LlmRequest};

/// Perform a JSON-mode completion and parse the result into `T`.
///
/// The request is forced into JSON mode regardless of how it was built.
/// A response that is not valid JSON for `T` is an `AppError::Llm`.
pub async fn complete_structured<T: DeserializeOwned>(
    client: &dyn LlmClient,
    request: &LlmRequest,
) -> AppResult<T> {
    let mut request = request.clone();
    request.json_mode = true;

    let response = client.complete(&request).await?;

    parse_structured(&response.content)
}

/// Parse a structured completion body into `T`.
///
/// Tolerates surrounding whitespace, nothing else.
pub fn parse_structured<T: DeserializeOwned>(content: &str) -> AppResult<T> {
    serde_json::from_str(content.trim())
        .map_err(|e| AppError::Llm(format!("Malformed structured response: {}", e)))
}
