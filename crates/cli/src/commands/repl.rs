//! Interactive session command handler.
//!
//! A read-answer loop over the research pipeline. The pipeline (and its
//! HTTP clients) is built once; each question is otherwise independent,
//! and a failed question never ends the session.

use clap::Args;
use scout_core::{AppConfig, AppResult};
use scout_research::ResearchPipeline;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

use super::ask::answer_question;

/// Interactive question-answering session
#[derive(Args, Debug)]
pub struct ReplCommand {}

impl ReplCommand {
    /// Execute the interactive session.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Starting interactive session");

        let pipeline = ResearchPipeline::from_config(config)?;

        println!("Scout interactive session. Type 'help' for commands, 'quit' to leave.");

        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            print!("scout> ");
            std::io::stdout().flush().ok();

            let line = match lines.next_line().await? {
                Some(line) => line,
                None => break, // EOF (Ctrl-D)
            };

            let input = line.trim();
            match input {
                "" => continue,
                "quit" | "exit" => break,
                "help" => {
                    println!("Commands:");
                    println!("  help        Show this help");
                    println!("  clear       Clear the screen");
                    println!("  quit, exit  Leave the session");
                    println!("Anything else is researched as a question.");
                }
                "clear" => {
                    print!("\x1b[2J\x1b[H");
                    std::io::stdout().flush().ok();
                }
                question => {
                    // One question failing must not end the session
                    if let Err(e) = answer_question(&pipeline, question, false).await {
                        eprintln!("Error: {}", e);
                    }
                }
            }
        }

        println!("Goodbye.");
        Ok(())
    }
}
