//! Response Renderer
//!
//! `render` is pure: it extracts the code block and builds the output for
//! the chosen surface. `present` performs the side effects (notification,
//! clipboard, panel).

pub mod extract;
pub mod panel;

use std::path::PathBuf;

use tracing::{debug, warn};

use crate::host::{ClipboardWriter, Presenter};

pub use extract::{extract_code, strip_blank_lines, ExtractedCode};
pub use panel::{render_panel, PanelContent, PanelLayout, PANEL_TITLE};

/// Label of the notification action
pub const COPY_ACTION: &str = "Copy code";

/// Confirmation shown after a copy
pub const COPIED_MESSAGE: &str = "Code copied to clipboard";

/// Presentation surface for a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Notification with a copy action
    Inform,
    /// Panel with response, code and input tabs
    RefactorPanel,
    /// Panel whose first tab explains the input
    ExplainPanel,
}

/// Values echoed back into the rendered output
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderContext<'a> {
    pub selected_text: Option<&'a str>,
    pub language_hint: Option<&'a str>,
}

/// Output ready for presentation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedOutput {
    Notification { message: String, code: ExtractedCode },
    Panel { html: String, code: ExtractedCode },
}

impl RenderedOutput {
    pub fn code(&self) -> &ExtractedCode {
        match self {
            RenderedOutput::Notification { code, .. } | RenderedOutput::Panel { code, .. } => code,
        }
    }
}

/// Result of presenting an output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Presented {
    Notified { copied: bool },
    Panel { path: PathBuf },
}

/// Build the output for `mode`
pub fn render(message: &str, mode: RenderMode, context: RenderContext<'_>) -> RenderedOutput {
    let code = extract_code(message);
    debug!(present = code.present(), ?mode, "code extraction");

    match mode {
        RenderMode::Inform => RenderedOutput::Notification {
            message: message.to_string(),
            code,
        },
        RenderMode::RefactorPanel | RenderMode::ExplainPanel => {
            let (layout, shown) = if mode == RenderMode::RefactorPanel {
                (PanelLayout::Refactor, strip_blank_lines(message))
            } else {
                let language = context.language_hint.unwrap_or("plaintext").to_string();
                (PanelLayout::Explain { language }, message.to_string())
            };
            let html = render_panel(
                &layout,
                PanelContent {
                    message: &shown,
                    code: code.as_str(),
                    selected_text: context.selected_text.unwrap_or(""),
                },
            );
            RenderedOutput::Panel { html, code }
        }
    }
}

/// Show an output on the host
pub fn present(
    output: &RenderedOutput,
    presenter: &dyn Presenter,
    clipboard: &dyn ClipboardWriter,
) -> std::io::Result<Presented> {
    match output {
        RenderedOutput::Notification { message, code } => {
            let chosen = presenter.info_with_actions(message, &[COPY_ACTION]);
            if chosen.as_deref() != Some(COPY_ACTION) {
                return Ok(Presented::Notified { copied: false });
            }
            let Some(ref text) = code.code else {
                debug!("copy requested but no code block was found");
                return Ok(Presented::Notified { copied: false });
            };
            match clipboard.write_text(text) {
                Ok(()) => {
                    presenter.info(COPIED_MESSAGE);
                    Ok(Presented::Notified { copied: true })
                }
                Err(e) => {
                    warn!(error = %e, "clipboard write failed");
                    presenter.error(&e.to_string());
                    Ok(Presented::Notified { copied: false })
                }
            }
        }
        RenderedOutput::Panel { html, .. } => {
            let path = presenter.open_panel(PANEL_TITLE, html)?;
            Ok(Presented::Panel { path })
        }
    }
}
