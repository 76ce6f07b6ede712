//! Input Collector
//!
//! Obtains the payload from a prompt or the active selection and applies the
//! word limit before anything is sent.

use tracing::{debug, warn};

use crate::host::{Prompter, SelectionSource};
use crate::pipeline::PipelineError;

/// Label shown when asking for free text
pub const PROMPT_LABEL: &str = "Enter a message for YouChat:";

/// Where the payload comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    Prompt,
    Selection,
}

/// Payload accepted for dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectedInput {
    pub text: String,
    /// Language of the selection's document; `None` for prompts
    pub language_id: Option<String>,
}

/// Words separated by whitespace runs
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Reject payloads over `max_words`
pub fn check_word_limit(text: &str, max_words: usize) -> Result<(), PipelineError> {
    let words = word_count(text);
    if words > max_words {
        warn!(words, limit = max_words, "payload over word limit");
        return Err(PipelineError::TooLong {
            words,
            limit: max_words,
        });
    }
    Ok(())
}

/// Collect a payload from `source`
pub fn collect(
    source: InputSource,
    prompter: &dyn Prompter,
    selection: &dyn SelectionSource,
    max_words: usize,
) -> Result<CollectedInput, PipelineError> {
    let collected = match source {
        InputSource::Prompt => {
            let text = prompter
                .prompt(PROMPT_LABEL)
                .map_err(|e| PipelineError::Input(e.to_string()))?
                .ok_or(PipelineError::Cancelled)?;
            CollectedInput {
                text,
                language_id: None,
            }
        }
        InputSource::Selection => {
            let current = selection
                .active_selection()
                .map_err(|e| PipelineError::Input(e.to_string()))?
                .ok_or(PipelineError::NoEditor)?;
            if current.text.trim().is_empty() {
                return Err(PipelineError::Empty);
            }
            CollectedInput {
                text: current.text,
                language_id: Some(current.language_id),
            }
        }
    };

    check_word_limit(&collected.text, max_words)?;
    debug!(?source, words = word_count(&collected.text), "input collected");
    Ok(collected)
}
