//! Response body decoding
//!
//! The endpoint may return JSON whose characters are HTML-entity escaped
//! (`{&quot;message&quot;: ...}`), so the body is entity-decoded first unless
//! disabled.

use serde::{Deserialize, Serialize};

/// Decoded API reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteResponse {
    pub message: String,
}

/// Decode a raw body into a `RemoteResponse`
pub fn decode_body(raw: &str, unescape_entities: bool) -> Result<RemoteResponse, serde_json::Error> {
    if unescape_entities {
        let decoded = html_escape::decode_html_entities(raw);
        serde_json::from_str(&decoded)
    } else {
        serde_json::from_str(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_json() {
        let resp = decode_body(r#"{"message":"Hi there"}"#, true).unwrap();
        assert_eq!(resp.message, "Hi there");
    }

    #[test]
    fn test_entity_escaped_json() {
        let raw = "{&quot;message&quot;:&quot;a &lt;b&gt; &amp; c&quot;}";
        let resp = decode_body(raw, true).unwrap();
        assert_eq!(resp.message, "a <b> & c");
    }

    #[test]
    fn test_entity_escaped_without_unescape_fails() {
        let raw = "{&quot;message&quot;:&quot;x&quot;}";
        assert!(decode_body(raw, false).is_err());
    }

    #[test]
    fn test_extra_fields_ignored() {
        let resp = decode_body(r#"{"message":"m","search":{"third_party_search_results":[]}}"#, true).unwrap();
        assert_eq!(resp.message, "m");
    }

    #[test]
    fn test_missing_message_is_error() {
        assert!(decode_body(r#"{"error":"nope"}"#, true).is_err());
    }

    #[test]
    fn test_html_page_is_error() {
        assert!(decode_body("<html><body>502 Bad Gateway</body></html>", true).is_err());
    }
}
