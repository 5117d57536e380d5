//! Category-parameterized web search.
//!
//! The search capability is a Qwant-shaped HTTP API. Its response nests
//! result items either as a flat list or as "mainline" groups that each
//! hold a nested item list; both shapes are modeled as one untagged
//! union and normalized by a single flattening routine. Missing keys at
//! any nesting level mean "no results", never an error.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use scout_core::{AppError, AppResult, SearchConfig};

use crate::types::SearchCategory;

/// Trait for the external search capability.
///
/// Implementations may fail; the retriever recovers any failure as an
/// empty retrieval.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str, category: SearchCategory) -> AppResult<SearchResponse>;
}

/// Top-level search response envelope.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    data: Option<SearchData>,
}

#[derive(Debug, Clone, Deserialize)]
struct SearchData {
    #[serde(default)]
    result: Option<SearchResultBody>,
}

#[derive(Debug, Clone, Deserialize)]
struct SearchResultBody {
    #[serde(default)]
    items: Option<ResultItems>,
}

/// The two observed shapes of the `items` field.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum ResultItems {
    /// Flat list of items (news, images, videos)
    Flat(Vec<ResultNode>),
    /// Items nested inside named "mainline" groups (web)
    Grouped(MainlineGroups),
}

#[derive(Debug, Clone, Deserialize)]
struct MainlineGroups {
    #[serde(default)]
    mainline: Vec<ResultNode>,
}

/// One node in the result tree: either a result item carrying a URL or a
/// group carrying nested items. Provider metadata beyond that is opaque
/// to the pipeline and dropped at this boundary.
#[derive(Debug, Clone, Default, Deserialize)]
struct ResultNode {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    items: Option<Vec<ResultNode>>,
}

impl SearchResponse {
    /// Flatten the nested result shape into candidate URLs, preserving
    /// discovery order. Handles one level of group nesting, matching the
    /// provider's "mainline" grouping.
    pub fn flatten_urls(&self) -> Vec<String> {
        let nodes = match self
            .data
            .as_ref()
            .and_then(|d| d.result.as_ref())
            .and_then(|r| r.items.as_ref())
        {
            Some(ResultItems::Flat(nodes)) => nodes,
            Some(ResultItems::Grouped(groups)) => &groups.mainline,
            None => return Vec::new(),
        };

        let mut urls = Vec::new();
        for node in nodes {
            if let Some(url) = &node.url {
                urls.push(url.clone());
            } else if let Some(subitems) = &node.items {
                for subitem in subitems {
                    if let Some(url) = &subitem.url {
                        urls.push(url.clone());
                    }
                }
            }
        }
        urls
    }
}

/// HTTP client for a Qwant-shaped search API.
pub struct QwantSearchClient {
    http: reqwest::Client,
    config: SearchConfig,
}

impl QwantSearchClient {
    /// Create a client from search configuration.
    ///
    /// Requests carry a browser-like session so the API serves the same
    /// response shapes it serves the web client.
    pub fn new(config: SearchConfig) -> AppResult<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json, text/plain, */*"),
        );
        headers.insert(
            reqwest::header::ACCEPT_LANGUAGE,
            reqwest::header::HeaderValue::from_static("en-US,en;q=0.5"),
        );

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent("Mozilla/5.0 (X11; Linux x86_64; rv:133.0) Gecko/20100101 Firefox/133.0")
            .default_headers(headers)
            .build()
            .map_err(|e| AppError::Search(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }
}

#[async_trait]
impl SearchProvider for QwantSearchClient {
    async fn search(&self, query: &str, category: SearchCategory) -> AppResult<SearchResponse> {
        let url = format!("{}/search/{}", self.config.endpoint, category.as_str());

        tracing::debug!("Searching '{}' via {}", query, url);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("q", query),
                ("count", &self.config.count.to_string()),
                ("locale", &self.config.locale),
                ("offset", "0"),
                ("device", "desktop"),
                ("safesearch", &self.config.safesearch.to_string()),
                ("displayed", "true"),
            ])
            .send()
            .await
            .map_err(|e| AppError::Search(format!("Search request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Search(format!(
                "Search API error: {}",
                response.status()
            )));
        }

        response
            .json::<SearchResponse>()
            .await
            .map_err(|e| AppError::Search(format!("Failed to parse search response: {}", e)))
    }
}
