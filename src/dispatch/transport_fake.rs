//! Fake transport for testing
//!
//! Uses fixture strings instead of real HTTP calls and records every
//! requested URL.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::dispatch::transport_types::{HttpTransport, TransportError, TransportResponse};

/// Fake transport for testing (uses fixture strings)
#[derive(Debug)]
pub struct FakeTransport {
    /// Response body to return
    pub response_body: String,
    /// Status code to return
    pub status: u16,
    /// Error message to return (if set)
    pub error_message: Option<String>,
    requests: Mutex<Vec<String>>,
}

impl FakeTransport {
    /// Create fake transport with given 200 response
    pub fn new(response: &str) -> Self {
        Self::with_status(200, response)
    }

    /// Create fake transport with explicit status
    pub fn with_status(status: u16, response: &str) -> Self {
        Self {
            response_body: response.to_string(),
            status,
            error_message: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Create fake transport that returns a network error
    pub fn with_error(msg: &str) -> Self {
        Self {
            response_body: String::new(),
            status: 0,
            error_message: Some(msg.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// URLs requested so far, in order
    pub fn requested_urls(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or(0)
    }
}

#[async_trait]
impl HttpTransport for FakeTransport {
    async fn get(&self, url: &str) -> Result<TransportResponse, TransportError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(url.to_string());
        }
        if let Some(ref msg) = self.error_message {
            return Err(TransportError::Network(msg.clone()));
        }
        Ok(TransportResponse {
            status: self.status,
            body: self.response_body.clone(),
        })
    }
}
