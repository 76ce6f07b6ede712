//! CLI argument parsing
//!
//! ```text
//! youchat [options] ask [TEXT...] [--copy]
//! youchat [options] refactor [--file <PATH>] [--lines <A:B>] [--language <ID>]
//! youchat [options] explain  [--file <PATH>] [--lines <A:B>] [--language <ID>]
//!
//! OPTIONS:
//!   --config <PATH>      Config file
//!   --panel-dir <DIR>    Where panel documents are written
//!   --log-level <FILTER> Tracing filter directive
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::cli::{Error, Result};
use crate::host::LineRange;
use crate::pipeline::Command;

/// Parsed CLI arguments
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "youchat", version, about = "Ask a chat endpoint about text or code")]
pub struct Cli {
    /// Config file (default: $YOUCHAT_CONFIG or the user config directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory receiving panel documents
    #[arg(long, global = true, value_name = "DIR")]
    pub panel_dir: Option<PathBuf>,

    /// Tracing filter, e.g. `youchat=debug`
    #[arg(long, global = true, value_name = "FILTER")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum CliCommand {
    /// Ask a free-text question; prompts when no text is given
    Ask(AskArgs),
    /// Send a selection to be refactored; opens a panel
    Refactor(SelectionArgs),
    /// Send a selection to be explained; opens a panel
    Explain(SelectionArgs),
}

#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct AskArgs {
    /// Question text; read interactively when omitted
    pub text: Vec<String>,

    /// Copy the code block from the reply without asking
    #[arg(long)]
    pub copy: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct SelectionArgs {
    /// File holding the selection; stdin is read when omitted
    #[arg(long, short, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// 1-based inclusive line range inside the file
    #[arg(long, value_name = "A:B", requires = "file")]
    pub lines: Option<LineRange>,

    /// Language id override
    #[arg(long, value_name = "ID")]
    pub language: Option<String>,
}

impl CliCommand {
    pub fn pipeline_command(&self) -> Command {
        match self {
            CliCommand::Ask(_) => Command::Ask,
            CliCommand::Refactor(_) => Command::Refactor,
            CliCommand::Explain(_) => Command::Explain,
        }
    }
}

/// Parse CLI arguments (first item is the program name)
pub fn parse_args<I, T>(args: I) -> Result<Cli>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args).map_err(|e| Error::InvalidArgs(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ask_with_text() {
        let cli = parse_args(["youchat", "ask", "how", "are", "lifetimes", "checked"]).unwrap();
        match cli.command {
            CliCommand::Ask(args) => {
                assert_eq!(args.text.join(" "), "how are lifetimes checked");
                assert!(!args.copy);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_ask_without_text() {
        let cli = parse_args(["youchat", "ask", "--copy"]).unwrap();
        assert_eq!(
            cli.command,
            CliCommand::Ask(AskArgs {
                text: vec![],
                copy: true
            })
        );
    }

    #[test]
    fn test_parse_refactor_with_range() {
        let cli = parse_args([
            "youchat", "refactor", "--file", "src/lib.rs", "--lines", "3:9",
        ])
        .unwrap();
        assert_eq!(cli.command.pipeline_command(), Command::Refactor);
        match cli.command {
            CliCommand::Refactor(args) => {
                assert_eq!(args.file, Some(PathBuf::from("src/lib.rs")));
                assert_eq!(args.lines, Some(LineRange { start: 3, end: 9 }));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_lines_require_file() {
        assert!(parse_args(["youchat", "explain", "--lines", "1:2"]).is_err());
    }

    #[test]
    fn test_bad_range_rejected() {
        assert!(parse_args(["youchat", "explain", "-f", "a.rs", "--lines", "9:2"]).is_err());
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let cli = parse_args([
            "youchat", "explain", "--panel-dir", "/tmp/p", "--log-level", "debug",
        ])
        .unwrap();
        assert_eq!(cli.panel_dir, Some(PathBuf::from("/tmp/p")));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_missing_subcommand() {
        assert!(parse_args(["youchat"]).is_err());
    }

    #[test]
    fn test_unknown_subcommand() {
        assert!(parse_args(["youchat", "restart"]).is_err());
    }
}
