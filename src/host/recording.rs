//! Recording host for testing
//!
//! Scripted answers in, every observable effect recorded as a `HostEvent`.

use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::host::{
    ClipboardError, ClipboardWriter, Presenter, Progress, Prompter, Selection, SelectionSource,
};

/// Observable host effect
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    Prompted(String),
    Info(String),
    InfoWithActions { message: String, actions: Vec<String> },
    Warning(String),
    Error(String),
    Panel { title: String, html: String },
    ProgressStarted(String),
    ProgressReport { increment: u8, message: Option<String> },
    ProgressFinished,
    ClipboardWrite(String),
}

/// Scripted host
#[derive(Debug, Clone, Default)]
pub struct RecordingHost {
    /// `None` aborts the prompt
    pub prompt_answer: Option<String>,
    /// `None` means no active editor
    pub selection: Option<Selection>,
    /// Action the "user" clicks
    pub chosen_action: Option<String>,
    pub clipboard_fails: bool,
    events: Arc<Mutex<Vec<HostEvent>>>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prompt_answer(mut self, answer: &str) -> Self {
        self.prompt_answer = Some(answer.to_string());
        self
    }

    pub fn with_selection(mut self, text: &str, language_id: &str) -> Self {
        self.selection = Some(Selection {
            text: text.to_string(),
            language_id: language_id.to_string(),
        });
        self
    }

    pub fn choosing(mut self, action: &str) -> Self {
        self.chosen_action = Some(action.to_string());
        self
    }

    pub fn events(&self) -> Vec<HostEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    pub fn clipboard_writes(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                HostEvent::ClipboardWrite(text) => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn panels(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                HostEvent::Panel { html, .. } => Some(html),
                _ => None,
            })
            .collect()
    }

    fn record(&self, event: HostEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl Prompter for RecordingHost {
    fn prompt(&self, label: &str) -> io::Result<Option<String>> {
        self.record(HostEvent::Prompted(label.to_string()));
        Ok(self.prompt_answer.clone())
    }
}

impl SelectionSource for RecordingHost {
    fn active_selection(&self) -> io::Result<Option<Selection>> {
        Ok(self.selection.clone())
    }
}

impl Presenter for RecordingHost {
    fn info(&self, message: &str) {
        self.record(HostEvent::Info(message.to_string()));
    }

    fn info_with_actions(&self, message: &str, actions: &[&str]) -> Option<String> {
        self.record(HostEvent::InfoWithActions {
            message: message.to_string(),
            actions: actions.iter().map(|a| a.to_string()).collect(),
        });
        self.chosen_action
            .clone()
            .filter(|chosen| actions.contains(&chosen.as_str()))
    }

    fn warning(&self, message: &str) {
        self.record(HostEvent::Warning(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.record(HostEvent::Error(message.to_string()));
    }

    fn open_panel(&self, title: &str, html: &str) -> io::Result<PathBuf> {
        self.record(HostEvent::Panel {
            title: title.to_string(),
            html: html.to_string(),
        });
        Ok(PathBuf::from(format!("memory://{}", title)))
    }

    fn progress(&self, title: &str) -> Box<dyn Progress> {
        self.record(HostEvent::ProgressStarted(title.to_string()));
        Box::new(RecordingProgress {
            events: Arc::clone(&self.events),
        })
    }
}

impl ClipboardWriter for RecordingHost {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        if self.clipboard_fails {
            return Err(ClipboardError::Initialize("no display".to_string()));
        }
        self.record(HostEvent::ClipboardWrite(text.to_string()));
        Ok(())
    }
}

struct RecordingProgress {
    events: Arc<Mutex<Vec<HostEvent>>>,
}

impl Progress for RecordingProgress {
    fn report(&mut self, increment: u8, message: Option<&str>) {
        if let Ok(mut events) = self.events.lock() {
            events.push(HostEvent::ProgressReport {
                increment,
                message: message.map(str::to_string),
            });
        }
    }

    fn finish(self: Box<Self>) {
        if let Ok(mut events) = self.events.lock() {
            events.push(HostEvent::ProgressFinished);
        }
    }
}
