//! Domain types for the research pipeline.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Search-intent category used to parameterize retrieval.
///
/// Produced once per question by the intent classifier and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchCategory {
    Web,
    News,
    Images,
    Videos,
}

impl SearchCategory {
    /// The provider-facing path segment for this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::News => "news",
            Self::Images => "images",
            Self::Videos => "videos",
        }
    }
}

impl std::fmt::Display for SearchCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifier output: a category plus the model's justification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classification {
    /// The chosen search category
    pub category: SearchCategory,

    /// The reasoning behind the category selection
    pub reasoning: String,
}

/// Normalized text extracted from one URL.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedDocument {
    /// Normalized plain text (possibly empty)
    pub text: String,

    /// Whether the text originated from a video transcript rather than
    /// rendered markup
    pub from_transcript: bool,
}

impl ExtractedDocument {
    /// An extraction attempt that yielded nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Document from rendered page text.
    pub fn from_page(text: String) -> Self {
        Self {
            text,
            from_transcript: false,
        }
    }

    /// Document from a video transcript.
    pub fn from_transcript(text: String) -> Self {
        Self {
            text,
            from_transcript: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// The outcome of one retrieval: extracted documents keyed by URL, plus
/// the ordered URL list.
///
/// The URL list is the authoritative citation order (insertion order =
/// discovery order). It is kept separately from any model-generated
/// citation list because the synthesis step does not reliably use real
/// URLs as citations.
#[derive(Debug, Clone, Default)]
pub struct RetrievalResult {
    urls: Vec<String>,
    documents: HashMap<String, ExtractedDocument>,
}

impl RetrievalResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a document for a URL, preserving discovery order.
    ///
    /// Returns `false` if the URL is already present (at most one
    /// document per URL per retrieval).
    pub fn insert(&mut self, url: impl Into<String>, document: ExtractedDocument) -> bool {
        let url = url.into();
        if self.documents.contains_key(&url) {
            return false;
        }
        self.urls.push(url.clone());
        self.documents.insert(url, document);
        true
    }

    pub fn contains(&self, url: &str) -> bool {
        self.documents.contains_key(url)
    }

    pub fn get(&self, url: &str) -> Option<&ExtractedDocument> {
        self.documents.get(url)
    }

    /// The authoritative citation order.
    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    /// Iterate (URL, document) pairs in citation order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ExtractedDocument)> {
        self.urls
            .iter()
            .filter_map(|url| self.documents.get(url).map(|doc| (url.as_str(), doc)))
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

/// The final synthesized answer with its citation list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesizedAnswer {
    /// Whitespace-normalized answer body
    pub answer: String,

    /// Source URLs in citation order. Always the retriever's URL list,
    /// never the model-proposed one.
    pub sources: Vec<String>,
}
