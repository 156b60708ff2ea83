//! HTTP transport boundary.
//!
//! The client talks to the network through the [`Transport`] trait so tests
//! can substitute a mock. The default implementation uses reqwest.

use crate::error::{Error, Result, TransportError};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// What comes back from a fetch: status and raw body, nothing interpreted.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

/// Injectable fetch capability.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issues a GET for the given URL. Non-2xx statuses are responses, not
    /// errors; only failures below the HTTP level surface here.
    async fn fetch(&self, url: &str) -> std::result::Result<FetchResponse, TransportError>;
}

/// Default transport on top of reqwest.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Creates a transport with no proxy.
    pub fn new() -> Result<Self> {
        Self::with_proxy(None)
    }

    /// Creates a transport with an optional proxy URL.
    pub fn with_proxy(proxy: Option<&str>) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10));

        if let Some(proxy_url) = proxy {
            debug!("Configuring proxy: {}", proxy_url);
            let proxy = reqwest::Proxy::all(proxy_url)
                .map_err(|e| Error::Config(format!("Failed to configure proxy: {}", e)))?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

fn map_reqwest_error(e: reqwest::Error) -> TransportError {
    if e.is_connect() || e.is_timeout() {
        TransportError::Unreachable(e.to_string())
    } else {
        TransportError::Http {
            status: e.status().map(|s| s.as_u16()),
            message: e.to_string(),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch(&self, url: &str) -> std::result::Result<FetchResponse, TransportError> {
        let response = self.client.get(url).send().await.map_err(map_reqwest_error)?;

        let status = response.status().as_u16();
        debug!("Response status: {}", status);

        let body = response.text().await.map_err(map_reqwest_error)?;

        Ok(FetchResponse { status, body })
    }
}
