//! System clipboard via arboard
//!
//! On X11 and Wayland the owning process serves the clipboard contents, so a
//! short-lived CLI has to stay around until a clipboard manager (or another
//! application) takes ownership. `SystemClipboard` blocks for up to `hold`
//! after writing.

use std::time::Duration;

use arboard::Clipboard;
use tracing::debug;

use crate::host::ClipboardWriter;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClipboardError {
    #[error("Failed to initialize clipboard: {0}")]
    Initialize(String),

    #[error("Failed to write clipboard: {0}")]
    Write(String),
}

/// System clipboard; a fresh handle is opened per write
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard {
    hold: Duration,
}

impl SystemClipboard {
    /// Keep serving written text for up to `hold` (ignored off Linux/BSD)
    pub fn with_hold(hold: Duration) -> Self {
        Self { hold }
    }

    pub fn hold(&self) -> Duration {
        self.hold
    }
}

impl ClipboardWriter for SystemClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut clipboard =
            Clipboard::new().map_err(|e| ClipboardError::Initialize(e.to_string()))?;
        set_text(&mut clipboard, text, self.hold).map_err(|e| ClipboardError::Write(e.to_string()))
    }
}

#[cfg(all(
    unix,
    not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
))]
fn set_text(clipboard: &mut Clipboard, text: &str, hold: Duration) -> Result<(), arboard::Error> {
    use arboard::SetExtLinux;

    if hold.is_zero() {
        return clipboard.set_text(text.to_string());
    }
    debug!(hold_secs = hold.as_secs(), "holding clipboard ownership");
    // Returns early once another owner takes over
    clipboard
        .set()
        .wait_until(std::time::Instant::now() + hold)
        .text(text.to_string())
}

#[cfg(not(all(
    unix,
    not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
)))]
fn set_text(clipboard: &mut Clipboard, text: &str, _hold: Duration) -> Result<(), arboard::Error> {
    // The OS keeps the contents after the process exits
    debug!("clipboard contents persist after exit");
    clipboard.set_text(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_does_not_hold() {
        assert!(SystemClipboard::default().hold().is_zero());
    }

    #[test]
    fn test_with_hold() {
        let clipboard = SystemClipboard::with_hold(Duration::from_secs(3));
        assert_eq!(clipboard.hold(), Duration::from_secs(3));
    }
}
