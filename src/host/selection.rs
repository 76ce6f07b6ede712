//! Selection sources
//!
//! A file (optionally narrowed to a line range) or piped stdin stands in for
//! the editor's highlighted text.

use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::debug;

use crate::host::{Selection, SelectionSource};

/// Inclusive 1-based line range, written `A:B`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
}

impl FromStr for LineRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = match s.split_once(':') {
            Some((a, b)) => (a, b),
            None => (s, s),
        };
        let start: usize = start
            .trim()
            .parse()
            .map_err(|_| format!("invalid start line in '{}'", s))?;
        let end: usize = end
            .trim()
            .parse()
            .map_err(|_| format!("invalid end line in '{}'", s))?;
        if start == 0 || end < start {
            return Err(format!("line range '{}' must satisfy 1 <= start <= end", s));
        }
        Ok(Self { start, end })
    }
}

impl LineRange {
    /// Lines of `content` inside the range; past-the-end lines are dropped
    pub fn slice(&self, content: &str) -> String {
        content
            .lines()
            .skip(self.start - 1)
            .take(self.end - self.start + 1)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Editor-style language id for a file path
pub fn language_id_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("rs") => "rust",
        Some("py") | Some("pyi") => "python",
        Some("js") | Some("mjs") | Some("cjs") => "javascript",
        Some("jsx") => "javascriptreact",
        Some("ts") | Some("mts") => "typescript",
        Some("tsx") => "typescriptreact",
        Some("go") => "go",
        Some("rb") => "ruby",
        Some("c") | Some("h") => "c",
        Some("cc") | Some("cpp") | Some("cxx") | Some("hpp") => "cpp",
        Some("cs") => "csharp",
        Some("java") => "java",
        Some("kt") => "kotlin",
        Some("php") => "php",
        Some("sh") | Some("bash") | Some("zsh") => "shellscript",
        Some("html") | Some("htm") => "html",
        Some("css") => "css",
        Some("json") => "json",
        Some("toml") => "toml",
        Some("yaml") | Some("yml") => "yaml",
        Some("md") => "markdown",
        Some("sql") => "sql",
        _ => "plaintext",
    }
}

/// Selection read from a file on disk
#[derive(Debug, Clone)]
pub struct FileSelection {
    pub path: PathBuf,
    pub lines: Option<LineRange>,
    /// Overrides the extension-derived language id
    pub language: Option<String>,
}

impl FileSelection {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lines: None,
            language: None,
        }
    }

    pub fn with_lines(mut self, lines: Option<LineRange>) -> Self {
        self.lines = lines;
        self
    }

    pub fn with_language(mut self, language: Option<String>) -> Self {
        self.language = language;
        self
    }
}

impl SelectionSource for FileSelection {
    fn active_selection(&self) -> io::Result<Option<Selection>> {
        let content = std::fs::read_to_string(&self.path)?;
        let text = match self.lines {
            Some(range) => range.slice(&content),
            None => content,
        };
        let language_id = self
            .language
            .clone()
            .unwrap_or_else(|| language_id_for_path(&self.path).to_string());

        debug!(path = %self.path.display(), %language_id, len = text.len(), "read file selection");
        Ok(Some(Selection { text, language_id }))
    }
}

/// Selection piped through stdin; an interactive terminal has none
#[derive(Debug, Clone, Default)]
pub struct StdinSelection {
    pub language: Option<String>,
}

impl SelectionSource for StdinSelection {
    fn active_selection(&self) -> io::Result<Option<Selection>> {
        let stdin = io::stdin();
        if stdin.is_terminal() {
            return Ok(None);
        }
        let mut text = String::new();
        stdin.lock().read_to_string(&mut text)?;
        Ok(Some(Selection {
            text,
            language_id: self
                .language
                .clone()
                .unwrap_or_else(|| "plaintext".to_string()),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line_range() {
        assert_eq!("3:7".parse::<LineRange>().unwrap(), LineRange { start: 3, end: 7 });
        assert_eq!("4".parse::<LineRange>().unwrap(), LineRange { start: 4, end: 4 });
        assert!("0:2".parse::<LineRange>().is_err());
        assert!("5:2".parse::<LineRange>().is_err());
        assert!("a:b".parse::<LineRange>().is_err());
    }

    #[test]
    fn test_slice_clamps_to_eof() {
        let range = LineRange { start: 2, end: 10 };
        assert_eq!(range.slice("one\ntwo\nthree\n"), "two\nthree");
    }

    #[test]
    fn test_slice_past_eof_is_empty() {
        let range = LineRange { start: 9, end: 10 };
        assert_eq!(range.slice("one\n"), "");
    }

    #[test]
    fn test_language_ids() {
        assert_eq!(language_id_for_path(Path::new("src/main.rs")), "rust");
        assert_eq!(language_id_for_path(Path::new("a/B.PY")), "python");
        assert_eq!(language_id_for_path(Path::new("README")), "plaintext");
    }

    #[test]
    fn test_file_selection_with_range_and_override() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("lib.rs");
        std::fs::write(&path, "use x;\nfn a() {}\nfn b() {}\n").unwrap();

        let selection = FileSelection::new(&path)
            .with_lines(Some(LineRange { start: 2, end: 3 }))
            .active_selection()
            .unwrap()
            .unwrap();
        assert_eq!(selection.text, "fn a() {}\nfn b() {}");
        assert_eq!(selection.language_id, "rust");

        let selection = FileSelection::new(&path)
            .with_language(Some("plaintext".to_string()))
            .active_selection()
            .unwrap()
            .unwrap();
        assert_eq!(selection.language_id, "plaintext");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = FileSelection::new("/definitely/not/here.rs").active_selection();
        assert!(result.is_err());
    }
}
