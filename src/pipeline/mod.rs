//! Prompt dispatch pipeline
//!
//! Collector → Dispatcher → Renderer, one run per command invocation:
//!
//! ```text
//! Idle → Collecting → Dispatching → Rendering → Idle
//! ```
//!
//! Every failure is shown on the presenter and returned as an `Outcome`;
//! only a cancelled prompt stays silent.

pub mod collect;

use std::path::PathBuf;

use tracing::{error, info, warn};

use crate::dispatch::{DispatchError, Dispatcher, Instruction};
use crate::host::{ClipboardWriter, Presenter, Prompter, SelectionSource};
use crate::render::{present, render, Presented, RenderContext, RenderMode};

pub use collect::{
    check_word_limit, collect, word_count, CollectedInput, InputSource, PROMPT_LABEL,
};

/// Progress title shown while a request is outstanding
pub const PROGRESS_TITLE: &str = "YouChat: Please wait...";
pub const PROGRESS_SUCCEEDED: &str = "API request successful";
pub const PROGRESS_FAILED: &str = "API request failed";

/// Pipeline errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PipelineError {
    /// User aborted input
    #[error("Input cancelled")]
    Cancelled,

    #[error("No active editor found")]
    NoEditor,

    #[error("No text selected")]
    Empty,

    #[error("Selected text exceeds maximum limit of {limit} words")]
    TooLong { words: usize, limit: usize },

    /// Input could not be read
    #[error("{0}")]
    Input(String),

    #[error("{0}")]
    Network(String),

    #[error("{0}")]
    Decode(String),

    /// Panel could not be shown
    #[error("Failed to open panel: {0}")]
    Panel(String),
}

impl From<DispatchError> for PipelineError {
    fn from(err: DispatchError) -> Self {
        match err {
            DispatchError::Network(m) => PipelineError::Network(m),
            DispatchError::Decode(m) => PipelineError::Decode(m),
        }
    }
}

/// Invokable host commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Ask free text
    Ask,
    /// Send selection for refactor
    Refactor,
    /// Explain selection
    Explain,
}

impl Command {
    pub fn source(&self) -> InputSource {
        match self {
            Command::Ask => InputSource::Prompt,
            Command::Refactor | Command::Explain => InputSource::Selection,
        }
    }

    pub fn instruction(&self) -> Instruction {
        match self {
            Command::Ask => Instruction::Ask,
            Command::Refactor => Instruction::Refactor,
            Command::Explain => Instruction::Explain,
        }
    }

    pub fn render_mode(&self) -> RenderMode {
        match self {
            Command::Ask => RenderMode::Inform,
            Command::Refactor => RenderMode::RefactorPanel,
            Command::Explain => RenderMode::ExplainPanel,
        }
    }
}

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Prompt aborted; nothing shown
    Cancelled,
    /// Input refused before dispatch
    Rejected(PipelineError),
    /// Dispatch or presentation failed
    Failed(PipelineError),
    Notified { copied: bool },
    Panel { path: PathBuf },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            Outcome::Cancelled | Outcome::Notified { .. } | Outcome::Panel { .. }
        )
    }
}

/// Borrowed host collaborators
#[derive(Clone, Copy)]
pub struct HostContext<'a> {
    pub prompter: &'a dyn Prompter,
    pub selection: &'a dyn SelectionSource,
    pub presenter: &'a dyn Presenter,
    pub clipboard: &'a dyn ClipboardWriter,
}

impl<'a> HostContext<'a> {
    /// All four roles played by one value
    pub fn uniform<H>(host: &'a H) -> Self
    where
        H: Prompter + SelectionSource + Presenter + ClipboardWriter,
    {
        Self {
            prompter: host,
            selection: host,
            presenter: host,
            clipboard: host,
        }
    }
}

/// One configured pipeline; holds no per-run state
pub struct Pipeline<'a> {
    dispatcher: &'a Dispatcher,
    host: HostContext<'a>,
    max_words: usize,
}

impl<'a> Pipeline<'a> {
    pub fn new(dispatcher: &'a Dispatcher, host: HostContext<'a>, max_words: usize) -> Self {
        Self {
            dispatcher,
            host,
            max_words,
        }
    }

    /// Run `command` to completion
    pub async fn run(&self, command: Command) -> Outcome {
        info!(?command, "pipeline started");

        let input = match collect(
            command.source(),
            self.host.prompter,
            self.host.selection,
            self.max_words,
        ) {
            Ok(input) => input,
            Err(PipelineError::Cancelled) => {
                info!(?command, "input cancelled");
                return Outcome::Cancelled;
            }
            Err(e @ PipelineError::TooLong { .. }) => {
                self.host.presenter.warning(&e.to_string());
                return Outcome::Rejected(e);
            }
            Err(e) => {
                warn!(?command, error = %e, "input rejected");
                self.host.presenter.error(&e.to_string());
                return Outcome::Rejected(e);
            }
        };

        let mut progress = self.host.presenter.progress(PROGRESS_TITLE);
        progress.report(0, None);
        let result = self
            .dispatcher
            .dispatch(
                command.instruction(),
                &input.text,
                input.language_id.as_deref(),
            )
            .await;
        let response = match result {
            Ok(response) => {
                progress.report(100, Some(PROGRESS_SUCCEEDED));
                progress.finish();
                response
            }
            Err(e) => {
                progress.report(100, Some(PROGRESS_FAILED));
                progress.finish();
                let e = PipelineError::from(e);
                error!(?command, error = %e, "dispatch failed");
                self.host.presenter.error(&e.to_string());
                return Outcome::Failed(e);
            }
        };

        let context = RenderContext {
            selected_text: match command.source() {
                InputSource::Selection => Some(input.text.as_str()),
                InputSource::Prompt => None,
            },
            language_hint: input.language_id.as_deref(),
        };
        let output = render(&response.message, command.render_mode(), context);

        match present(&output, self.host.presenter, self.host.clipboard) {
            Ok(Presented::Notified { copied }) => {
                info!(?command, copied, "pipeline finished");
                Outcome::Notified { copied }
            }
            Ok(Presented::Panel { path }) => {
                info!(?command, path = %path.display(), "pipeline finished");
                Outcome::Panel { path }
            }
            Err(e) => {
                let e = PipelineError::Panel(e.to_string());
                error!(?command, error = %e, "presentation failed");
                self.host.presenter.error(&e.to_string());
                Outcome::Failed(e)
            }
        }
    }
}
