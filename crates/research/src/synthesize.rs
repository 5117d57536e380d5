//! Citation-preserving answer synthesis.
//!
//! Two sequential LLM calls over the same document map: an open-ended
//! analysis pass (an intermediate artifact, logged but not returned) and
//! a structured curation pass constrained to {answer, sources}. The
//! model-proposed source list is then discarded and replaced with the
//! retriever's authoritative URL order, because the model may hallucinate
//! or reorder citations.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use scout_core::AppResult;
use scout_llm::{complete_structured, LlmClient, LlmRequest};
use scout_prompt::{build_prompt, load_prompt};

use crate::text::collapse_whitespace;
use crate::types::{RetrievalResult, SynthesizedAnswer};

/// The curation call's declared output shape.
#[derive(Debug, Deserialize)]
struct CuratedAnswer {
    answer: String,
    /// Model-proposed citations; discarded during reconciliation but part
    /// of the structured contract, so their absence is malformed output.
    #[allow(dead_code)]
    sources: Vec<String>,
}

/// Synthesizes a structured answer from retrieved documents.
pub struct Synthesizer {
    llm: Arc<dyn LlmClient>,
    model: String,
    prompt_dir: Option<PathBuf>,
}

impl Synthesizer {
    pub fn new(llm: Arc<dyn LlmClient>, model: impl Into<String>) -> Self {
        Self {
            llm,
            model: model.into(),
            prompt_dir: None,
        }
    }

    /// Use prompt overrides from a directory.
    pub fn with_prompt_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.prompt_dir = Some(dir.into());
        self
    }

    /// Synthesize an answer for a question over the retrieved documents.
    ///
    /// Either call failing (including malformed structured output) is
    /// reported as one stage failure; the two calls are not
    /// distinguished to the caller.
    pub async fn synthesize(
        &self,
        question: &str,
        retrieval: &RetrievalResult,
    ) -> AppResult<SynthesizedAnswer> {
        let documents = format_documents(retrieval);

        // Open-ended analysis pass. Its output is side information only,
        // but the call is made regardless.
        let analysis = self
            .complete_prompt("research.analyze", question, &documents)
            .await?;
        tracing::debug!("Analysis pass produced {} chars", analysis.len());

        // Structured curation pass.
        let request = self
            .build_request("research.curate", question, &documents)
            .await?;
        let curated: CuratedAnswer = complete_structured(self.llm.as_ref(), &request).await?;

        // Citation reconciliation: the authoritative retrieved-URL order
        // always replaces the model-proposed source list.
        Ok(SynthesizedAnswer {
            answer: collapse_whitespace(&curated.answer),
            sources: retrieval.urls().to_vec(),
        })
    }

    async fn complete_prompt(
        &self,
        prompt_id: &str,
        question: &str,
        documents: &str,
    ) -> AppResult<String> {
        let request = self.build_request(prompt_id, question, documents).await?;
        let response = self.llm.complete(&request).await?;
        Ok(response.content)
    }

    async fn build_request(
        &self,
        prompt_id: &str,
        question: &str,
        documents: &str,
    ) -> AppResult<LlmRequest> {
        let definition = load_prompt(self.prompt_dir.as_deref(), prompt_id)?;

        let mut variables = HashMap::new();
        variables.insert("question".to_string(), question.to_string());
        variables.insert("documents".to_string(), documents.to_string());

        let built = build_prompt(&definition, variables)?;

        let mut request = LlmRequest::new(built.user, &self.model);
        if let Some(system) = built.system {
            request = request.with_system(system);
        }
        if definition.output.is_json() {
            request = request.with_json_mode();
        }

        Ok(request)
    }
}

/// Render the document map for prompt interpolation, in citation order.
fn format_documents(retrieval: &RetrievalResult) -> String {
    if retrieval.is_empty() {
        return "(no search results were retrieved)".to_string();
    }

    retrieval
        .iter()
        .map(|(url, doc)| format!("Source: {}\n{}", url, doc.text))
        .collect::<Vec<_>>()
        .join("\n\n")
}
