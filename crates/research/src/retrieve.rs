//! Multi-source retrieval.
//!
//! Calls the search capability, flattens the provider's result shape
//! into candidate URLs, filters video-hosting URLs per the video policy,
//! and extracts documents strictly sequentially in discovery order until
//! the cap is reached.

use std::sync::Arc;

use crate::extract::Extractor;
use crate::search::SearchProvider;
use crate::types::{RetrievalResult, SearchCategory};
use crate::video::{is_video_query, is_video_url};

/// Retrieves and extracts documents for a classified question.
pub struct Retriever {
    search: Arc<dyn SearchProvider>,
    extractor: Arc<dyn Extractor>,
    max_results: usize,
}

impl Retriever {
    pub fn new(
        search: Arc<dyn SearchProvider>,
        extractor: Arc<dyn Extractor>,
        max_results: usize,
    ) -> Self {
        Self {
            search,
            extractor,
            max_results,
        }
    }

    /// Retrieve up to `max_results` non-empty documents for a question.
    ///
    /// A failed search yields an empty retrieval — "no results" is a
    /// normal outcome, never an error. An extraction that yields empty
    /// text is attempted once, not retried, not stored, and does not
    /// count toward the cap; once the cap is reached, remaining
    /// candidates are not visited.
    ///
    /// Extraction is deliberately sequential: the cap depends on counting
    /// non-empty documents as they arrive, in discovery order.
    pub async fn retrieve(&self, question: &str, category: SearchCategory) -> RetrievalResult {
        tracing::info!("Searching '{}' using {} search", question, category);

        let video_search = is_video_query(question, category);

        let response = match self.search.search(question, category).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Search failed, continuing with no results: {}", e);
                return RetrievalResult::new();
            }
        };

        let mut result = RetrievalResult::new();

        for url in response.flatten_urls() {
            if result.len() >= self.max_results {
                break;
            }

            // Video-hosting URLs are excluded from non-video retrievals
            if !video_search && is_video_url(&url) {
                tracing::debug!("Skipping video URL for non-video search: {}", url);
                continue;
            }

            if result.contains(&url) {
                continue;
            }

            tracing::debug!("Fetching content from {}", url);
            let document = self.extractor.extract(&url, video_search).await;

            if document.is_empty() {
                tracing::debug!("No content extracted from {}", url);
                continue;
            }

            result.insert(url, document);
        }

        tracing::info!("Retrieved {} documents", result.len());
        result
    }
}
