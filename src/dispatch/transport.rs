//! HTTP transport selection
//!
//! Concrete enum over the real and fake transports so the dispatcher owns a
//! single sized type.

use async_trait::async_trait;

pub use crate::dispatch::transport_fake::FakeTransport;
pub use crate::dispatch::transport_reqwest::ReqwestTransport;
pub use crate::dispatch::transport_types::{HttpTransport, TransportError, TransportResponse};

#[derive(Debug)]
pub enum Transport {
    Real(ReqwestTransport),
    Fake(FakeTransport),
}

#[async_trait]
impl HttpTransport for Transport {
    async fn get(&self, url: &str) -> Result<TransportResponse, TransportError> {
        match self {
            Transport::Real(t) => t.get(url).await,
            Transport::Fake(t) => t.get(url).await,
        }
    }
}

impl From<ReqwestTransport> for Transport {
    fn from(t: ReqwestTransport) -> Self {
        Transport::Real(t)
    }
}

impl From<FakeTransport> for Transport {
    fn from(t: FakeTransport) -> Self {
        Transport::Fake(t)
    }
}

impl Transport {
    /// Borrow the fake transport, if this is one
    pub fn as_fake(&self) -> Option<&FakeTransport> {
        match self {
            Transport::Fake(t) => Some(t),
            Transport::Real(_) => None,
        }
    }
}
