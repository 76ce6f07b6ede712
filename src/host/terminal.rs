//! Terminal host
//!
//! Messages go to stdout (results) and stderr (status), panels are written as
//! standalone HTML files, progress is a spinner on a background tokio task.

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

use crate::host::{Presenter, Progress, Prompter};

const SPINNER_FRAMES: [&str; 4] = ["|", "/", "-", "\\"];
const SPINNER_INTERVAL: Duration = Duration::from_millis(120);

/// Reads one line from stdin; EOF aborts
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinPrompter;

impl Prompter for StdinPrompter {
    fn prompt(&self, label: &str) -> io::Result<Option<String>> {
        let mut stderr = io::stderr();
        write!(stderr, "{} ", label)?;
        stderr.flush()?;

        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// Answer supplied up front (command-line words)
#[derive(Debug, Clone)]
pub struct FixedPrompt(pub String);

impl Prompter for FixedPrompt {
    fn prompt(&self, _label: &str) -> io::Result<Option<String>> {
        Ok(Some(self.0.clone()))
    }
}

/// Terminal presenter
#[derive(Debug, Clone)]
pub struct TerminalPresenter {
    panel_dir: PathBuf,
    /// Action chosen without asking (e.g. `--copy`)
    preselected_action: Option<String>,
}

impl TerminalPresenter {
    pub fn new(panel_dir: impl Into<PathBuf>) -> Self {
        Self {
            panel_dir: panel_dir.into(),
            preselected_action: None,
        }
    }

    pub fn with_preselected_action(mut self, action: Option<String>) -> Self {
        self.preselected_action = action;
        self
    }

    fn ask_action(action: &str) -> Option<String> {
        let stdin = io::stdin();
        if !stdin.is_terminal() {
            return None;
        }
        let mut stderr = io::stderr();
        write!(stderr, "{}? [y/N] ", action).ok()?;
        stderr.flush().ok()?;

        let mut answer = String::new();
        stdin.lock().read_line(&mut answer).ok()?;
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes").then(|| action.to_string())
    }
}

impl Presenter for TerminalPresenter {
    fn info(&self, message: &str) {
        println!("{}", message);
    }

    fn info_with_actions(&self, message: &str, actions: &[&str]) -> Option<String> {
        println!("{}", message);

        if let Some(ref chosen) = self.preselected_action {
            if actions.contains(&chosen.as_str()) {
                return Some(chosen.clone());
            }
        }
        actions.iter().find_map(|action| Self::ask_action(action))
    }

    fn warning(&self, message: &str) {
        eprintln!("Warning: {}", message);
    }

    fn error(&self, message: &str) {
        eprintln!("Error: {}", message);
    }

    fn open_panel(&self, title: &str, html: &str) -> io::Result<PathBuf> {
        std::fs::create_dir_all(&self.panel_dir)?;
        let path = self
            .panel_dir
            .join(format!("{}-{}.html", title.to_lowercase(), uuid::Uuid::new_v4()));
        std::fs::write(&path, html)?;
        debug!(path = %path.display(), bytes = html.len(), "panel written");
        println!("{}: {}", title, path.display());
        Ok(path)
    }

    fn progress(&self, title: &str) -> Box<dyn Progress> {
        Box::new(TerminalProgress::start(title))
    }
}

/// Spinner on stderr
pub struct TerminalProgress {
    title: String,
    state: Arc<Mutex<ProgressState>>,
    ticker: Option<JoinHandle<()>>,
}

#[derive(Debug, Default)]
struct ProgressState {
    percent: u8,
    message: Option<String>,
}

impl TerminalProgress {
    fn start(title: &str) -> Self {
        let state = Arc::new(Mutex::new(ProgressState::default()));
        let ticker = if io::stderr().is_terminal() {
            tokio::runtime::Handle::try_current()
                .ok()
                .map(|handle| handle.spawn(spin(title.to_string(), Arc::clone(&state))))
        } else {
            eprintln!("{}", title);
            None
        };

        Self {
            title: title.to_string(),
            state,
            ticker,
        }
    }
}

async fn spin(title: String, state: Arc<Mutex<ProgressState>>) {
    let mut interval = tokio::time::interval(SPINNER_INTERVAL);
    for frame in SPINNER_FRAMES.iter().cycle() {
        interval.tick().await;
        let percent = state.lock().map(|s| s.percent).unwrap_or(0);
        eprint!("\r{} {} {:>3}%", frame, title, percent);
        let _ = io::stderr().flush();
    }
}

impl Progress for TerminalProgress {
    fn report(&mut self, increment: u8, message: Option<&str>) {
        if let Ok(mut state) = self.state.lock() {
            state.percent = state.percent.saturating_add(increment).min(100);
            if let Some(m) = message {
                state.message = Some(m.to_string());
            }
        }
    }

    fn finish(mut self: Box<Self>) {
        let spinning = if let Some(ticker) = self.ticker.take() {
            ticker.abort();
            true
        } else {
            false
        };

        let (percent, message) = self
            .state
            .lock()
            .map(|s| (s.percent, s.message.clone()))
            .unwrap_or((100, None));
        let prefix = if spinning { "\r" } else { "" };
        match message {
            Some(m) => eprintln!("{}{} {:>3}% {}", prefix, self.title, percent, m),
            None => eprintln!("{}{} {:>3}%", prefix, self.title, percent),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_prompt_returns_text() {
        let prompt = FixedPrompt("hello world".to_string());
        assert_eq!(prompt.prompt("ignored").unwrap(), Some("hello world".to_string()));
    }

    #[test]
    fn test_preselected_action_is_chosen() {
        let presenter = TerminalPresenter::new(std::env::temp_dir())
            .with_preselected_action(Some("Copy code".to_string()));
        assert_eq!(
            presenter.info_with_actions("msg", &["Copy code"]),
            Some("Copy code".to_string())
        );
    }

    #[test]
    fn test_open_panel_writes_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let presenter = TerminalPresenter::new(dir.path().join("panels"));
        let path = presenter.open_panel("YouChat", "<html></html>").unwrap();
        assert!(path.starts_with(dir.path()));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "<html></html>");
    }

    #[test]
    fn test_progress_clamps_percent() {
        let mut progress = TerminalProgress::start("YouChat: Please wait...");
        progress.report(80, None);
        progress.report(80, Some("done"));
        let percent = progress.state.lock().unwrap().percent;
        assert_eq!(percent, 100);
        Box::new(progress).finish();
    }
}
