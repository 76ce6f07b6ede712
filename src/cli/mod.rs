//! CLI module
//!
//! Provides:
//! - Argument parsing for the three chat commands
//! - Config layering with command-line overrides
//! - Command dispatch to the pipeline with deterministic exit codes

pub mod args;
pub mod dispatch;

// Re-exports
pub use args::{parse_args, AskArgs, Cli, CliCommand, SelectionArgs};
pub use dispatch::{apply_cli_overrides, run_cli, ExitCode};

/// CLI errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),
}

/// Exit codes (deterministic)
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_CONFIG_ERROR: i32 = 2;

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, Error>;
