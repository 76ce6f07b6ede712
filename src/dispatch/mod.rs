//! Remote Query Dispatcher
//!
//! Builds the query URL, performs exactly one GET through the configured
//! transport and decodes the buffered body. No retries.

pub mod decode;
pub mod query;
pub mod transport;
pub mod transport_fake;
pub mod transport_reqwest;
pub mod transport_types;

use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::config::AppConfig;

pub use decode::{decode_body, RemoteResponse};
pub use query::{build_query_url, Instruction};
pub use transport::{FakeTransport, HttpTransport, ReqwestTransport, Transport, TransportError};

/// Dispatch failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    /// Request could not be completed
    #[error("{0}")]
    Network(String),

    /// Body was not the expected JSON
    #[error("{0}")]
    Decode(String),
}

impl From<TransportError> for DispatchError {
    fn from(err: TransportError) -> Self {
        DispatchError::Network(err.to_string())
    }
}

/// Immutable endpoint settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchConfig {
    pub base_url: String,
    pub api_key: String,
    pub unescape_entities: bool,
}

impl From<&AppConfig> for DispatchConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            unescape_entities: config.unescape_entities,
        }
    }
}

/// Remote query dispatcher
#[derive(Debug)]
pub struct Dispatcher {
    config: DispatchConfig,
    transport: Transport,
}

impl Dispatcher {
    pub fn new(config: DispatchConfig, transport: impl Into<Transport>) -> Self {
        Self {
            config,
            transport: transport.into(),
        }
    }

    /// Dispatcher backed by reqwest, configured from `AppConfig`
    pub fn from_app_config(config: &AppConfig) -> Result<Self, DispatchError> {
        let transport = ReqwestTransport::with_timeout(config.timeout_secs.map(Duration::from_secs))?;
        Ok(Self::new(DispatchConfig::from(config), transport))
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// Send one query and decode the reply
    pub async fn dispatch(
        &self,
        instruction: Instruction,
        payload: &str,
        language_hint: Option<&str>,
    ) -> Result<RemoteResponse, DispatchError> {
        let url = build_query_url(
            &self.config.base_url,
            &self.config.api_key,
            instruction,
            language_hint,
            payload,
        );
        info!(
            endpoint = %self.config.base_url,
            ?instruction,
            language = language_hint.unwrap_or("-"),
            payload_len = payload.len(),
            "dispatching query"
        );

        let response = self.transport.get(&url).await.map_err(|e| {
            error!(error = %e, "request failed");
            DispatchError::from(e)
        })?;

        if !response.is_success() {
            warn!(status = response.status, "non-success status, decoding body anyway");
        }

        let decoded = decode_body(&response.body, self.config.unescape_entities).map_err(|e| {
            error!(error = %e, body_len = response.body.len(), "failed to decode response body");
            DispatchError::Decode(e.to_string())
        })?;

        debug!(message_len = decoded.message.len(), "response decoded");
        Ok(decoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> DispatchConfig {
        DispatchConfig {
            base_url: "http://fake/chat".to_string(),
            api_key: "site".to_string(),
            unescape_entities: true,
        }
    }

    #[tokio::test]
    async fn test_dispatch_decodes_message() {
        let dispatcher = Dispatcher::new(config(), FakeTransport::new(r#"{"message":"Hi there"}"#));
        let resp = dispatcher.dispatch(Instruction::Ask, "hello", None).await.unwrap();
        assert_eq!(resp.message, "Hi there");

        let fake = dispatcher.transport().as_fake().unwrap();
        assert_eq!(fake.request_count(), 1);
        assert!(fake.requested_urls()[0].ends_with("hello&key=site"));
    }

    #[tokio::test]
    async fn test_network_error_keeps_cause_text() {
        let dispatcher = Dispatcher::new(config(), FakeTransport::with_error("connection refused"));
        let err = dispatcher.dispatch(Instruction::Ask, "hello", None).await.unwrap_err();
        assert_eq!(err, DispatchError::Network("connection refused".to_string()));
        assert_eq!(err.to_string(), "connection refused");
    }

    #[tokio::test]
    async fn test_non_json_is_decode_error() {
        let dispatcher = Dispatcher::new(config(), FakeTransport::new("not json"));
        let err = dispatcher.dispatch(Instruction::Ask, "hello", None).await.unwrap_err();
        assert!(matches!(err, DispatchError::Decode(_)));
    }

    #[tokio::test]
    async fn test_error_status_body_still_decoded() {
        let dispatcher = Dispatcher::new(
            config(),
            FakeTransport::with_status(500, r#"{"message":"overloaded"}"#),
        );
        let resp = dispatcher.dispatch(Instruction::Ask, "hello", None).await.unwrap();
        assert_eq!(resp.message, "overloaded");
    }

    #[tokio::test]
    async fn test_no_retry_on_failure() {
        let dispatcher = Dispatcher::new(config(), FakeTransport::with_error("reset"));
        let _ = dispatcher.dispatch(Instruction::Refactor, "x", Some("rust")).await;
        assert_eq!(dispatcher.transport().as_fake().unwrap().request_count(), 1);
    }
}
