//! Prompt system for the Scout CLI.
//!
//! This crate provides structured prompt management with:
//! - YAML-based prompt definitions
//! - Handlebars template rendering
//! - Built-in definitions for the research pipeline (classify, analyze,
//!   curate), overridable from a local prompt directory

pub mod builder;
pub mod loader;
pub mod types;

// Re-export main types
pub use builder::build_prompt;
pub use loader::{list_prompts, load_prompt};
pub use types::{BuiltPrompt, PromptDefinition, PromptOutputSpec};
