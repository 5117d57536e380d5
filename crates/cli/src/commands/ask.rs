//! Ask command handler.
//!
//! Answers a single question end to end and prints the cited answer.

use clap::Args;
use scout_core::{AppConfig, AppError, AppResult};
use scout_research::ResearchPipeline;

use crate::spinner::Spinner;

/// Answer a single question and exit
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The question to research
    pub question: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl AskCommand {
    /// Execute the ask command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ask command");

        let question = self.question.trim();
        if question.is_empty() {
            return Err(AppError::Config("No question provided".to_string()));
        }

        let pipeline = ResearchPipeline::from_config(config)?;
        answer_question(&pipeline, question, self.json).await
    }
}

/// Run the pipeline for one question and print the result.
///
/// Shared with the REPL so both surfaces render answers identically.
pub(crate) async fn answer_question(
    pipeline: &ResearchPipeline,
    question: &str,
    json: bool,
) -> AppResult<()> {
    let spinners = !json;

    let classification = {
        let _spinner = Spinner::start("Analyzing question...", spinners);
        pipeline.classify(question).await?
    };

    if !json {
        eprintln!(
            "Search category: {} ({})",
            classification.category, classification.reasoning
        );
    }

    let retrieval = {
        let _spinner = Spinner::start("Searching the web...", spinners);
        pipeline.retrieve(question, classification.category).await
    };

    let answer = {
        let _spinner = Spinner::start("Synthesizing answer...", spinners);
        pipeline.synthesize(question, &retrieval).await?
    };

    if json {
        let output = serde_json::json!({
            "question": question,
            "category": classification.category,
            "reasoning": classification.reasoning,
            "answer": answer.answer,
            "sources": answer.sources,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("\n{}\n", answer.answer);

        if answer.sources.is_empty() {
            println!("(no sources retrieved)");
        } else {
            println!("Sources:");
            for (i, url) in answer.sources.iter().enumerate() {
                println!("  [{}] {}", i + 1, url);
            }
        }
    }

    Ok(())
}
