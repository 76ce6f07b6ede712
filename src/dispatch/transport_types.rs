//! Transport types
//!
//! Common types shared across transport implementations.

use std::error::Error as StdError;

use async_trait::async_trait;

/// Transport errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// Network error (connection refused, DNS, TLS, timeout, body read)
    #[error("{0}")]
    Network(String),

    /// Client construction failed
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL carries the whole payload; keep it out of messages
        let is_builder = err.is_builder();
        let message = describe_chain(&err.without_url());
        if is_builder {
            TransportError::Configuration(message)
        } else {
            TransportError::Network(message)
        }
    }
}

/// Top-level message followed by every distinct cause, joined by `": "`
pub fn describe_chain(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.ends_with(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

/// Buffered HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,
    /// Entire response body
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Asynchronous HTTP GET transport
///
/// Abstraction over the HTTP client so the dispatcher can be driven by
/// `FakeTransport` fixtures in tests.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Issue one GET and buffer the whole body
    async fn get(&self, url: &str) -> Result<TransportResponse, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug)]
    struct Layer {
        text: &'static str,
        cause: Option<Box<Layer>>,
    }

    impl fmt::Display for Layer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.text)
        }
    }

    impl StdError for Layer {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            self.cause.as_deref().map(|c| c as &(dyn StdError + 'static))
        }
    }

    #[test]
    fn test_chain_includes_root_cause() {
        let err = Layer {
            text: "error sending request",
            cause: Some(Box::new(Layer {
                text: "tcp connect error",
                cause: Some(Box::new(Layer {
                    text: "Connection refused (os error 111)",
                    cause: None,
                })),
            })),
        };
        assert_eq!(
            describe_chain(&err),
            "error sending request: tcp connect error: Connection refused (os error 111)"
        );
    }

    #[test]
    fn test_chain_skips_repeated_cause() {
        let err = Layer {
            text: "client error: timed out",
            cause: Some(Box::new(Layer {
                text: "timed out",
                cause: None,
            })),
        };
        assert_eq!(describe_chain(&err), "client error: timed out");
    }
}
