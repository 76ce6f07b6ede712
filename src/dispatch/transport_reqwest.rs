//! Real HTTP transport using reqwest

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::dispatch::transport_types::{HttpTransport, TransportError, TransportResponse};

/// Real HTTP transport using reqwest
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create transport with client defaults (no explicit timeout)
    pub fn new() -> Result<Self, TransportError> {
        Self::with_timeout(None)
    }

    /// Create transport with an optional request timeout
    pub fn with_timeout(timeout: Option<Duration>) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<TransportResponse, TransportError> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        debug!(status, "response headers received");

        let body = response.text().await?;
        debug!(status, body_len = body.len(), "response body buffered");

        Ok(TransportResponse { status, body })
    }
}
