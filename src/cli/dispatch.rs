//! CLI command dispatch
//!
//! Wires terminal host surfaces and the configured dispatcher into a
//! pipeline run and maps the outcome to an exit code.

use std::time::Duration;

use crate::cli::{Cli, CliCommand, EXIT_CONFIG_ERROR, EXIT_FAILURE, EXIT_SUCCESS};
use crate::config::AppConfig;
use crate::dispatch::Dispatcher;
use crate::host::{
    FileSelection, FixedPrompt, Prompter, SelectionSource, StdinPrompter, StdinSelection,
    SystemClipboard, TerminalPresenter,
};
use crate::pipeline::{HostContext, Pipeline};
use crate::render::COPY_ACTION;

/// Exit code wrapper for CLI operations
pub type ExitCode = i32;

/// Fold command-line flags into the loaded configuration
pub fn apply_cli_overrides(mut config: AppConfig, cli: &Cli) -> AppConfig {
    if let Some(ref dir) = cli.panel_dir {
        config.panel_dir = dir.clone();
    }
    if let Some(ref level) = cli.log_level {
        config.log_level = level.clone();
    }
    config
}

fn build_prompter(command: &CliCommand) -> Box<dyn Prompter> {
    match command {
        CliCommand::Ask(args) if !args.text.is_empty() => {
            Box::new(FixedPrompt(args.text.join(" ")))
        }
        _ => Box::new(StdinPrompter),
    }
}

fn build_selection(command: &CliCommand) -> Box<dyn SelectionSource> {
    match command {
        CliCommand::Refactor(args) | CliCommand::Explain(args) => match args.file {
            Some(ref path) => Box::new(
                FileSelection::new(path)
                    .with_lines(args.lines)
                    .with_language(args.language.clone()),
            ),
            None => Box::new(StdinSelection {
                language: args.language.clone(),
            }),
        },
        CliCommand::Ask(_) => Box::new(StdinSelection::default()),
    }
}

/// Run one CLI command and return exit code
pub async fn run_cli(cli: Cli, config: &AppConfig) -> ExitCode {
    let dispatcher = match Dispatcher::from_app_config(config) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error: {}", e);
            return EXIT_CONFIG_ERROR;
        }
    };

    let preselected = match cli.command {
        CliCommand::Ask(ref args) if args.copy => Some(COPY_ACTION.to_string()),
        _ => None,
    };
    let presenter = TerminalPresenter::new(&config.panel_dir).with_preselected_action(preselected);
    let prompter = build_prompter(&cli.command);
    let selection = build_selection(&cli.command);
    let clipboard =
        SystemClipboard::with_hold(Duration::from_secs(config.clipboard_hold_secs));

    let host = HostContext {
        prompter: prompter.as_ref(),
        selection: selection.as_ref(),
        presenter: &presenter,
        clipboard: &clipboard,
    };

    let outcome = Pipeline::new(&dispatcher, host, config.max_words)
        .run(cli.command.pipeline_command())
        .await;

    if outcome.is_success() {
        EXIT_SUCCESS
    } else {
        EXIT_FAILURE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::parse_args;
    use std::path::PathBuf;

    #[test]
    fn test_cli_overrides_config() {
        let cli = parse_args(["youchat", "--panel-dir", "/tmp/panels", "ask", "hi"]).unwrap();
        let config = apply_cli_overrides(AppConfig::default(), &cli);
        assert_eq!(config.panel_dir, PathBuf::from("/tmp/panels"));
    }

    #[test]
    fn test_ask_words_become_fixed_prompt() {
        let cli = parse_args(["youchat", "ask", "hello", "there"]).unwrap();
        let prompter = build_prompter(&cli.command);
        assert_eq!(prompter.prompt("x").unwrap(), Some("hello there".to_string()));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_exits_with_failure() {
        let dir = tempfile::TempDir::new().unwrap();
        let file = dir.path().join("a.py");
        std::fs::write(&file, "print(1)\n").unwrap();

        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let config = AppConfig {
            base_url: format!("http://127.0.0.1:{}/chat", port),
            panel_dir: dir.path().join("panels"),
            ..AppConfig::default()
        };
        let cli = parse_args(["youchat", "explain", "--file", file.to_str().unwrap()]).unwrap();

        assert_eq!(run_cli(cli, &config).await, EXIT_FAILURE);
        assert!(!dir.path().join("panels").exists());
    }
}
