//! Command handlers for the Scout CLI.
//!
//! This module organizes all CLI commands into separate submodules.

pub mod ask;
pub mod repl;

// Re-export command types for convenience
pub use ask::AskCommand;
pub use repl::ReplCommand;
