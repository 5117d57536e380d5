//! Query-intent classification.
//!
//! One structured LLM call maps a free-text question to a search
//! category with a justification. A malformed response is fatal for the
//! stage; there is no retry. Empty questions are rejected upstream by
//! the caller, not here.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use scout_core::AppResult;
use scout_llm::{complete_structured, LlmClient, LlmRequest};
use scout_prompt::{build_prompt, load_prompt};

use crate::types::Classification;

/// Classifies a question's search intent.
pub struct IntentClassifier {
    llm: Arc<dyn LlmClient>,
    model: String,
    prompt_dir: Option<PathBuf>,
}

impl IntentClassifier {
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

    /// Classify a question into a search category.
    pub async fn classify(&self, question: &str) -> AppResult<Classification> {
        let definition = load_prompt(self.prompt_dir.as_deref(), "research.classify")?;

        let mut variables = HashMap::new();
        variables.insert("question".to_string(), question.to_string());

        let built = build_prompt(&definition, variables)?;

        let mut request = LlmRequest::new(built.user, &self.model);
        if let Some(system) = built.system {
            request = request.with_system(system);
        }

        let classification: Classification =
            complete_structured(self.llm.as_ref(), &request).await?;

        tracing::info!(
            category = %classification.category,
            "Classified question: {}",
            classification.reasoning
        );

        Ok(classification)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockLlm;
    use crate::types::SearchCategory;

    #[tokio::test]
    async fn test_classify_news_question() {
        let llm = Arc::new(MockLlm::new(vec![Ok(
            r#"{"category": "news", "reasoning": "recent event"}"#.to_string(),
        )]));
        let classifier = IntentClassifier::new(llm.clone(), "test-model");

        let classification = classifier
            .classify("What's the latest news on the Mars rover landing?")
            .await
            .unwrap();

        assert_eq!(classification.category, SearchCategory::News);

        // The classification call must be a JSON-mode call carrying the question
        let requests = llm.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].json_mode);
        assert!(requests[0].prompt.contains("Mars rover"));
    }

    #[tokio::test]
    async fn test_classify_video_question() {
        let llm = Arc::new(MockLlm::new(vec![Ok(
            r#"{"category": "videos", "reasoning": "explicit video request"}"#.to_string(),
        )]));
        let classifier = IntentClassifier::new(llm, "test-model");

        let classification = classifier
            .classify("Show me a video of how black holes form")
            .await
            .unwrap();

        assert_eq!(classification.category, SearchCategory::Videos);
    }

    #[tokio::test]
    async fn test_malformed_response_is_fatal() {
        let llm = Arc::new(MockLlm::new(vec![Ok(
            "web would be a good category".to_string()
        )]));
        let classifier = IntentClassifier::new(llm.clone(), "test-model");

        let result = classifier.classify("any question").await;
        assert!(result.is_err());

        // No retry on malformed output
        assert_eq!(llm.request_count(), 1);
    }

    #[tokio::test]
    async fn test_unknown_category_is_fatal() {
        let llm = Arc::new(MockLlm::new(vec![Ok(
            r#"{"category": "maps", "reasoning": "?"}"#.to_string(),
        )]));
        let classifier = IntentClassifier::new(llm, "test-model");

        assert!(classifier.classify("any question").await.is_err());
    }
}
