//! Scout CLI
//!
//! Main entry point for the scout command-line tool.
//! Answers questions by searching the web, extracting page content and
//! video transcripts, and synthesizing a cited answer with a local LLM.

mod commands;
mod spinner;

use clap::{Parser, Subcommand};
use commands::{AskCommand, ReplCommand};
use scout_core::{logging, AppConfig, AppResult};
use std::path::PathBuf;

/// Scout CLI - web research with cited answers
#[derive(Parser, Debug)]
#[command(name = "scout")]
#[command(about = "Answer questions from live web sources with citations", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, env = "SCOUT_CONFIG")]
    config: Option<PathBuf>,

    /// LLM provider (ollama, openai, claude)
    #[arg(short, long, global = true, env = "SCOUT_PROVIDER")]
    provider: Option<String>,

    /// Model identifier
    #[arg(short, long, global = true, env = "SCOUT_MODEL")]
    model: Option<String>,

    /// Maximum number of sources to retrieve per question
    #[arg(long, global = true)]
    max_results: Option<usize>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Answer a single question and exit
    Ask(AskCommand),

    /// Interactive question-answering session
    Repl(ReplCommand),
}

#[tokio::main]
async fn main() -> AppResult<()> {
    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    // Load base configuration from environment
    let config = AppConfig::load()?;

    // Apply CLI overrides
    let config = config.with_overrides(
        cli.config,
        cli.provider,
        cli.model,
        cli.max_results,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    config.validate()?;

    // Initialize logging with final configuration
    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::info!("Scout CLI starting");
    tracing::debug!("Provider: {}", config.provider);
    tracing::debug!("Model: {}", config.model);
    tracing::debug!("Search endpoint: {}", config.search.endpoint);

    let result = match cli.command {
        Commands::Ask(cmd) => cmd.execute(&config).await,
        Commands::Repl(cmd) => cmd.execute(&config).await,
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
