//! HTTP transport abstraction for SWPC requests
//!
//! The client talks to the network through the `Transport` trait so tests
//! can substitute a canned implementation. The production implementation
//! wraps a `reqwest::Client` configured with the caller's timeout and
//! user-agent.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while fetching a resource
#[derive(Debug, Error)]
pub enum TransportError {
    /// The HTTP request could not be built or completed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("unexpected status {status} from {url}")]
    Status { url: String, status: u16 },
}

/// A fetched resource: HTTP status plus the undecoded body bytes
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Capability to fetch a fully-qualified URL
///
/// Implementations own any deadline enforcement; the client performs no
/// retries and propagates failures unchanged.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<TransportResponse, TransportError>;
}

/// Production transport backed by `reqwest`
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Builds a transport with an optional request timeout and user-agent
    pub fn new(timeout: Option<Duration>, agent: Option<&str>) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(agent) = agent {
            builder = builder.user_agent(agent.to_string());
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch(&self, url: &str) -> Result<TransportResponse, TransportError> {
        debug!(url, "fetching");
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let body = response.bytes().await?.to_vec();
        debug!(url, bytes = body.len(), "fetched");
        Ok(TransportResponse {
            status: status.as_u16(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_with_defaults() {
        assert!(HttpTransport::new(None, None).is_ok());
    }

    #[test]
    fn test_build_with_timeout_and_agent() {
        let transport = HttpTransport::new(
            Some(Duration::from_secs(10)),
            Some("auroracast-test/0.1"),
        );
        assert!(transport.is_ok());
    }
}
