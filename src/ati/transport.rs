//! HTTP transport abstraction.
//!
//! The builder never talks to reqwest directly; it goes through a minimal
//! trait that performs one GET and hands back status plus raw body. Tests
//! substitute a double to assert on call counts and outgoing parameters
//! without a network.

use crate::error::{ApiError, Result};
use async_trait::async_trait;

/// Raw outcome of one HTTP call: status code and unparsed body.
///
/// Status interpretation is the caller's job; the transport only errors
/// when no response was received at all.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    /// True for any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// One-shot GET against a fully formed URL.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs a GET with the given query pairs and extra headers.
    async fn get(
        &self,
        url: &str,
        query: &[(String, String)],
        headers: &[(String, String)],
    ) -> Result<RawResponse, ApiError>;
}

/// Default transport backed by a shared `reqwest::Client`.
pub struct HttpTransport {
    http_client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            http_client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(
        &self,
        url: &str,
        query: &[(String, String)],
        headers: &[(String, String)],
    ) -> Result<RawResponse, ApiError> {
        let mut request = self
            .http_client
            .get(url)
            .header("user-agent", "reqwest")
            .query(query);
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }

        tracing::debug!(url, pairs = query.len(), "sending GET request");
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(RawResponse { status, body })
    }
}
