//! The research pipeline driver.
//!
//! Wires classification → retrieval → synthesis into a single entry
//! point. One pipeline value can serve many questions, but all
//! per-question state is constructed inside `run` and discarded at the
//! end; nothing carries over between questions.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use scout_core::{AppConfig, AppResult};
use scout_llm::{create_client, LlmClient};

use crate::classify::IntentClassifier;
use crate::extract::{ContentExtractor, Extractor};
use crate::retrieve::Retriever;
use crate::search::{QwantSearchClient, SearchProvider};
use crate::synthesize::Synthesizer;
use crate::types::{Classification, RetrievalResult, SearchCategory, SynthesizedAnswer};

/// The research pipeline: classification, retrieval, synthesis.
///
/// Stages are also exposed individually so a presentation layer can
/// decorate each one (e.g., with a progress spinner) without reaching
/// into pipeline state.
pub struct ResearchPipeline {
    classifier: IntentClassifier,
    retriever: Retriever,
    synthesizer: Synthesizer,
}

impl ResearchPipeline {
    /// Build a pipeline from application configuration, constructing the
    /// default search, extraction, and LLM capabilities.
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        let llm = create_client(
            &config.provider,
            config.endpoint.as_deref(),
            config.api_key.as_deref(),
        )?;

        let search: Arc<dyn SearchProvider> =
            Arc::new(QwantSearchClient::new(config.search.clone())?);
        let extractor: Arc<dyn Extractor> = Arc::new(ContentExtractor::new(Duration::from_secs(
            config.search.timeout_secs,
        )));

        Ok(Self::new(
            llm,
            search,
            extractor,
            &config.model,
            config.search.max_results,
            None,
        ))
    }

    /// Build a pipeline from explicit capabilities.
    pub fn new(
        llm: Arc<dyn LlmClient>,
        search: Arc<dyn SearchProvider>,
        extractor: Arc<dyn Extractor>,
        model: &str,
        max_results: usize,
        prompt_dir: Option<PathBuf>,
    ) -> Self {
        let mut classifier = IntentClassifier::new(llm.clone(), model);
        let mut synthesizer = Synthesizer::new(llm, model);

        if let Some(dir) = &prompt_dir {
            classifier = classifier.with_prompt_dir(dir.clone());
            synthesizer = synthesizer.with_prompt_dir(dir.clone());
        }

        Self {
            classifier,
            retriever: Retriever::new(search, extractor, max_results),
            synthesizer,
        }
    }

    /// Classify the question's search intent.
    pub async fn classify(&self, question: &str) -> AppResult<Classification> {
        self.classifier.classify(question).await
    }

    /// Retrieve documents for a classified question.
    pub async fn retrieve(&self, question: &str, category: SearchCategory) -> RetrievalResult {
        self.retriever.retrieve(question, category).await
    }

    /// Synthesize the final answer over retrieved documents.
    pub async fn synthesize(
        &self,
        question: &str,
        retrieval: &RetrievalResult,
    ) -> AppResult<SynthesizedAnswer> {
        self.synthesizer.synthesize(question, retrieval).await
    }

    /// Answer a question end to end.
    ///
    /// The question is trimmed and nothing else; rejecting empty input
    /// is the caller's job. Stages run strictly sequentially. A fatal
    /// error (classification or synthesis) aborts this question only —
    /// the pipeline itself carries no state across calls.
    pub async fn run(&self, question: &str) -> AppResult<SynthesizedAnswer> {
        let question = question.trim();

        let classification = self.classify(question).await?;
        let retrieval = self.retrieve(question, classification.category).await;
        self.synthesize(question, &retrieval).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockExtractor, MockLlm, MockSearch};
    use crate::types::ExtractedDocument;

    fn pipeline_with(
        llm: Arc<MockLlm>,
        search: Arc<MockSearch>,
        extractor: Arc<MockExtractor>,
    ) -> ResearchPipeline {
        ResearchPipeline::new(llm, search, extractor, "test-model", 6, None)
    }

    #[tokio::test]
    async fn test_end_to_end_news_question() {
        let llm = Arc::new(MockLlm::new(vec![
            Ok(r#"{"category": "news", "reasoning": "time-sensitive"}"#.to_string()),
            Ok("analysis".to_string()),
            Ok(r#"{"answer": "Rover landed safely.", "sources": ["wrong"]}"#.to_string()),
        ]));
        let search = Arc::new(MockSearch::with_json(
            r#"{"data": {"result": {"items": [{"url": "https://news.test/mars"}]}}}"#,
        ));
        let extractor = Arc::new(MockExtractor::new(vec![(
            "https://news.test/mars",
            ExtractedDocument::from_page("rover coverage".to_string()),
        )]));

        let pipeline = pipeline_with(llm, search.clone(), extractor);
        let answer = pipeline
            .run("What's the latest news on the Mars rover landing?")
            .await
            .unwrap();

        assert_eq!(answer.answer, "Rover landed safely.");
        assert_eq!(answer.sources, vec!["https://news.test/mars"]);

        // The retriever searched under the classified category
        let calls = search.calls.lock().unwrap();
        assert_eq!(calls[0].1, SearchCategory::News);
    }

    #[tokio::test]
    async fn test_video_question_keeps_youtube_source() {
        let llm = Arc::new(MockLlm::new(vec![
            Ok(r#"{"category": "videos", "reasoning": "explicit video request"}"#.to_string()),
            Ok("analysis".to_string()),
            Ok(r#"{"answer": "Black holes form when...", "sources": []}"#.to_string()),
        ]));
        let search = Arc::new(MockSearch::with_json(
            r#"{"data": {"result": {"items": [{"url": "https://www.youtube.com/watch?v=abc"}]}}}"#,
        ));
        let extractor = Arc::new(MockExtractor::new(vec![(
            "https://www.youtube.com/watch?v=abc",
            ExtractedDocument::from_transcript("[Transcript] gravity wins".to_string()),
        )]));

        let pipeline = pipeline_with(llm, search, extractor);
        let answer = pipeline
            .run("Show me a video of how black holes form")
            .await
            .unwrap();

        assert_eq!(answer.sources, vec!["https://www.youtube.com/watch?v=abc"]);
    }

    #[tokio::test]
    async fn test_search_failure_still_yields_answer() {
        let llm = Arc::new(MockLlm::new(vec![
            Ok(r#"{"category": "web", "reasoning": "general"}"#.to_string()),
            Ok("no sources".to_string()),
            Ok(r#"{"answer": "I found no sources to answer this.", "sources": []}"#.to_string()),
        ]));
        let search = Arc::new(MockSearch::failing("timed out"));
        let extractor = Arc::new(MockExtractor::new(vec![]));

        let pipeline = pipeline_with(llm, search, extractor);
        let answer = pipeline.run("anything at all").await.unwrap();

        // Synthesis still ran and the citation list is honestly empty
        assert!(!answer.answer.is_empty());
        assert!(answer.sources.is_empty());
    }

    #[tokio::test]
    async fn test_classification_failure_aborts_question() {
        let llm = Arc::new(MockLlm::new(vec![Ok("not json".to_string())]));
        let search = Arc::new(MockSearch::with_json(r#"{}"#));
        let extractor = Arc::new(MockExtractor::new(vec![]));

        let pipeline = pipeline_with(llm, search.clone(), extractor);
        assert!(pipeline.run("anything").await.is_err());

        // Retrieval never ran
        assert!(search.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_question_is_trimmed() {
        let llm = Arc::new(MockLlm::new(vec![
            Ok(r#"{"category": "web", "reasoning": "general"}"#.to_string()),
            Ok("analysis".to_string()),
            Ok(r#"{"answer": "ok", "sources": []}"#.to_string()),
        ]));
        let search = Arc::new(MockSearch::with_json(r#"{}"#));
        let extractor = Arc::new(MockExtractor::new(vec![]));

        let pipeline = pipeline_with(llm.clone(), search.clone(), extractor);
        pipeline.run("  padded question  ").await.unwrap();

        let calls = search.calls.lock().unwrap();
        assert_eq!(calls[0].0, "padded question");
    }
}
