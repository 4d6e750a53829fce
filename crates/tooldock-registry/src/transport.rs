//! HTTP transport used for catalog and artifact retrieval.
//!
//! [`HttpTransport`] is the seam between the registry logic and the network.
//! [`ReqwestTransport`] is the production implementation; tests substitute an
//! in-memory double.

use std::fmt;

use async_trait::async_trait;
use tracing::debug;

/// Why a GET did not produce a body.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// Connection, TLS, or body-read failure.
    #[error("network error: {0}")]
    Network(String),
    /// The server answered with a non-success status.
    #[error("unexpected HTTP status {0}")]
    Status(u16),
}

/// Minimal HTTP client interface: fetch a URL's body in full.
#[async_trait]
pub trait HttpTransport: Send + Sync + fmt::Debug {
    /// GET `url` and return the body of a success (2xx) response.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Status`] for non-success responses and
    /// [`TransportError::Network`] for everything else.
    async fn get(&self, url: &str) -> Result<Vec<u8>, TransportError>;
}

/// [`HttpTransport`] over a shared `reqwest` client (rustls).
///
/// No request timeout is configured; a stalled host blocks the call.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a client identifying itself as `tooldock/<version>`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Network`] if the TLS backend cannot be initialised.
    pub fn new() -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("tooldock/", env!("CARGO_PKG_VERSION")))
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| TransportError::Network(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        debug!(url, "GET");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        Ok(body.to_vec())
    }
}
