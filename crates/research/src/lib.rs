//! Research pipeline for the Scout CLI.
//!
//! This crate implements the core question-answering pipeline:
//! intent classification → multi-source retrieval → content
//! extraction/normalization → citation-preserving synthesis.
//!
//! The pipeline driver owns all per-question state; nothing persists
//! across questions. External capabilities (search, page fetch,
//! transcripts, LLM calls) sit behind trait seams so the pipeline can be
//! exercised without a network.
//!
//! # Example
//! ```no_run
//! use scout_core::AppConfig;
//! use scout_research::ResearchPipeline;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::load()?;
//! let pipeline = ResearchPipeline::from_config(&config)?;
//! let answer = pipeline.run("What's new in Rust 2024?").await?;
//! println!("{}", answer.answer);
//! # Ok(())
//! # }
//! ```

pub mod classify;
pub mod extract;
pub mod pipeline;
pub mod retrieve;
pub mod search;
pub mod synthesize;
pub mod text;
pub mod transcript;
pub mod types;
pub mod video;

#[cfg(test)]
pub(crate) mod testing;

// Re-export the main pipeline surface
pub use classify::IntentClassifier;
pub use extract::{ContentExtractor, Extractor};
pub use pipeline::ResearchPipeline;
pub use retrieve::Retriever;
pub use search::{QwantSearchClient, SearchProvider, SearchResponse};
pub use synthesize::Synthesizer;
pub use types::{
    Classification, ExtractedDocument, RetrievalResult, SearchCategory, SynthesizedAnswer,
};
