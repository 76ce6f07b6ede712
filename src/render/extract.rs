//! Fenced code block extraction
//!
//! Best-effort: one greedy match from the first triple-backtick fence to the
//! last one. Not a markdown parser.

use std::sync::OnceLock;

use regex::Regex;

/// Code block found in a response message
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtractedCode {
    pub code: Option<String>,
}

impl ExtractedCode {
    pub fn present(&self) -> bool {
        self.code.is_some()
    }

    /// Extracted code, or `""` when none was found
    pub fn as_str(&self) -> &str {
        self.code.as_deref().unwrap_or("")
    }
}

fn fence_regex() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| Regex::new(r"(?s)```(.*)```").expect("static regex"))
}

fn info_string_regex() -> &'static Regex {
    static INFO: OnceLock<Regex> = OnceLock::new();
    INFO.get_or_init(|| Regex::new(r"^[A-Za-z0-9_+#.\-]*\r?\n").expect("static regex"))
}

/// Extract the fenced block interior
///
/// A language tag on the opening fence line and one trailing newline before
/// the closing fence are dropped; everything else is kept verbatim.
pub fn extract_code(message: &str) -> ExtractedCode {
    let Some(captures) = fence_regex().captures(message) else {
        return ExtractedCode { code: None };
    };
    let interior = captures.get(1).map_or("", |m| m.as_str());

    let body = match info_string_regex().find(interior) {
        Some(m) => &interior[m.end()..],
        None => interior,
    };
    let body = body
        .strip_suffix("\r\n")
        .or_else(|| body.strip_suffix('\n'))
        .unwrap_or(body);

    ExtractedCode {
        code: Some(body.to_string()),
    }
}

/// Drop whitespace-only lines
pub fn strip_blank_lines(message: &str) -> String {
    message
        .split_inclusive('\n')
        .filter(|line| !line.trim().is_empty())
        .collect()
}
