//! Query URL construction
//!
//! `<base>?message=<instruction><language?><payload>&key=<key>`, each part
//! percent-encoded on its own and concatenated in that order.

/// Fixed instruction prepended to every payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// Free-text question
    Ask,
    /// Rewrite the selected code
    Refactor,
    /// Describe the selected code
    Explain,
}

impl Instruction {
    pub fn prefix(&self) -> &'static str {
        match self {
            Instruction::Ask => "dont reply with very long messages now: ",
            Instruction::Refactor => "Don't reply with very long messages. Refactor this code to make it better and return only the new code: ",
            Instruction::Explain => "Don't reply with very long messages. Explain this code: ",
        }
    }
}

/// Build the request URL
pub fn build_query_url(
    base_url: &str,
    api_key: &str,
    instruction: Instruction,
    language_hint: Option<&str>,
    payload: &str,
) -> String {
    let mut message = String::from(urlencoding::encode(instruction.prefix()));
    if let Some(lang) = language_hint {
        message.push_str(&urlencoding::encode(lang));
    }
    message.push_str(&urlencoding::encode(payload));

    let separator = if base_url.contains('?') { '&' } else { '?' };
    format!(
        "{}{}message={}&key={}",
        base_url,
        separator,
        message,
        urlencoding::encode(api_key)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://api.betterapi.net/youdotcom/chat";

    #[test]
    fn test_ask_url_layout() {
        let url = build_query_url(BASE, "site", Instruction::Ask, None, "hello");
        assert_eq!(
            url,
            "https://api.betterapi.net/youdotcom/chat?message=dont%20reply%20with%20very%20long%20messages%20now%3A%20hello&key=site"
        );
    }

    #[test]
    fn test_language_hint_between_prefix_and_payload() {
        let url = build_query_url(BASE, "site", Instruction::Explain, Some("rust"), "fn main() {}");
        let message = url
            .split("message=")
            .nth(1)
            .and_then(|rest| rest.split("&key=").next())
            .unwrap();
        assert!(message.starts_with("Don%27t%20reply"));
        assert!(message.ends_with("code%3A%20rustfn%20main%28%29%20%7B%7D"));
    }

    #[test]
    fn test_payload_ampersand_cannot_break_query() {
        let url = build_query_url(BASE, "site", Instruction::Ask, None, "a&key=evil");
        assert!(url.ends_with("a%26key%3Devil&key=site"));
        assert_eq!(url.matches("&key=").count(), 1);
    }

    #[test]
    fn test_base_with_existing_query() {
        let url = build_query_url("http://h/chat?v=2", "k", Instruction::Ask, None, "x");
        assert!(url.starts_with("http://h/chat?v=2&message="));
    }
}
