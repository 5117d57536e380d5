//! Shared mock implementations for pipeline tests.
//!
//! Every external capability (search, extraction, LLM) sits behind a
//! trait; these mocks let the pipeline run without a network.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use scout_core::{AppError, AppResult};
use scout_llm::{LlmClient, LlmRequest, LlmResponse, LlmUsage};

use crate::extract::Extractor;
use crate::search::{SearchProvider, SearchResponse};
use crate::types::{ExtractedDocument, SearchCategory};

/// LLM client returning canned completions in order.
pub(crate) struct MockLlm {
    responses: Mutex<Vec<Result<String, String>>>,
    pub requests: Mutex<Vec<LlmRequest>>,
}

impl MockLlm {
    pub fn new(responses: Vec<Result<String, String>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    fn provider_name(&self) -> &str {
        "mock"
    }

    async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse> {
        self.requests.lock().unwrap().push(request.clone());

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Err(AppError::Llm("mock has no more responses".to_string()));
        }

        match responses.remove(0) {
            Ok(content) => Ok(LlmResponse {
                content,
                model: request.model.clone(),
                usage: LlmUsage::default(),
            }),
            Err(message) => Err(AppError::Llm(message)),
        }
    }
}

/// Search provider returning one canned response (or failure).
pub(crate) struct MockSearch {
    result: Result<String, String>,
    pub calls: Mutex<Vec<(String, SearchCategory)>>,
}

impl MockSearch {
    /// Succeed with the given response body (JSON in the provider shape).
    pub fn with_json(json: &str) -> Self {
        Self {
            result: Ok(json.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Fail every search (e.g., simulated timeout).
    pub fn failing(message: &str) -> Self {
        Self {
            result: Err(message.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl SearchProvider for MockSearch {
    async fn search(&self, query: &str, category: SearchCategory) -> AppResult<SearchResponse> {
        self.calls
            .lock()
            .unwrap()
            .push((query.to_string(), category));

        match &self.result {
            Ok(json) => serde_json::from_str(json)
                .map_err(|e| AppError::Search(format!("bad mock response: {}", e))),
            Err(message) => Err(AppError::Search(message.clone())),
        }
    }
}

/// Extractor serving canned documents by URL; unknown URLs yield empty.
pub(crate) struct MockExtractor {
    documents: HashMap<String, ExtractedDocument>,
    pub calls: Mutex<Vec<(String, bool)>>,
}

impl MockExtractor {
    pub fn new(documents: Vec<(&str, ExtractedDocument)>) -> Self {
        Self {
            documents: documents
                .into_iter()
                .map(|(url, doc)| (url.to_string(), doc))
                .collect(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn attempted_urls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(url, _)| url.clone())
            .collect()
    }
}

#[async_trait]
impl Extractor for MockExtractor {
    async fn extract(&self, url: &str, video_context: bool) -> ExtractedDocument {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), video_context));

        self.documents.get(url).cloned().unwrap_or_default()
    }
}
