//! YouChat: send prompts or code selections to a chat endpoint
//!
//! One stateless pipeline per command invocation:
//! input collection → one HTTP GET → code extraction and presentation
//! (notification with a copy action, or an HTML panel).

pub mod cli;
pub mod config;
pub mod dispatch;
pub mod host;
pub mod logging;
pub mod pipeline;
pub mod render;

// Re-export pipeline entry points
pub use pipeline::{Command, HostContext, Outcome, Pipeline, PipelineError};

// Re-export dispatcher types
pub use dispatch::{DispatchConfig, DispatchError, Dispatcher, FakeTransport, Instruction, RemoteResponse};

// Re-export renderer types
pub use render::{extract_code, render, ExtractedCode, RenderContext, RenderMode, RenderedOutput};

pub use config::AppConfig;
