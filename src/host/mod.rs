//! Host surfaces
//!
//! Input and presentation collaborators the pipeline talks to. The terminal
//! implementations live in `terminal` and `selection`; tests plug in
//! recorders.

pub mod clipboard;
pub mod recording;
pub mod selection;
pub mod terminal;

use std::io;
use std::path::PathBuf;

pub use clipboard::{ClipboardError, SystemClipboard};
pub use recording::{HostEvent, RecordingHost};
pub use selection::{language_id_for_path, FileSelection, LineRange, StdinSelection};
pub use terminal::{FixedPrompt, StdinPrompter, TerminalPresenter};

/// Highlighted text plus the language of the document it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub text: String,
    pub language_id: String,
}

/// Free-text input from the user
pub trait Prompter: Send + Sync {
    /// `Ok(None)` means the user aborted input
    fn prompt(&self, label: &str) -> io::Result<Option<String>>;
}

/// The active editing surface
pub trait SelectionSource: Send + Sync {
    /// `Ok(None)` means there is no active editor
    fn active_selection(&self) -> io::Result<Option<Selection>>;
}

/// Progress indicator, shown while a request is outstanding
pub trait Progress: Send {
    fn report(&mut self, increment: u8, message: Option<&str>);

    /// Dismiss the indicator; consumes the handle
    fn finish(self: Box<Self>);
}

/// Notifications, panels and progress
pub trait Presenter: Send + Sync {
    fn info(&self, message: &str);

    /// Show a message with action buttons; returns the chosen label
    fn info_with_actions(&self, message: &str, actions: &[&str]) -> Option<String>;

    fn warning(&self, message: &str);

    fn error(&self, message: &str);

    /// Display an HTML document; returns where it was placed
    fn open_panel(&self, title: &str, html: &str) -> io::Result<PathBuf>;

    fn progress(&self, title: &str) -> Box<dyn Progress>;
}

/// Clipboard text sink
pub trait ClipboardWriter: Send + Sync {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}
