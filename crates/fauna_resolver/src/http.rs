//! reqwest-backed transport.

use crate::{FetchRequest, ImageTransport, TransportResponse};
use async_trait::async_trait;
use fauna_error::{FaunaResult, HttpError, TransportError, TransportErrorKind};
use fauna_rate_limit::{ResolverConfig, parse_retry_after};
use std::time::Duration;

/// Production [`ImageTransport`] using a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a client whose requests give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialised.
    pub fn new(timeout: Duration) -> FaunaResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("fauna/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| HttpError::new(timeout.as_secs(), e.to_string()))?;
        Ok(Self { client })
    }

    /// Build a client from the resolver configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialised.
    pub fn from_config(config: &ResolverConfig) -> FaunaResult<Self> {
        Self::new(Duration::from_secs(config.timeout_secs))
    }
}

fn classify(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::new(TransportErrorKind::Timeout(error.to_string()))
    } else if error.is_decode() || error.is_body() {
        TransportError::new(TransportErrorKind::Decode(error.to_string()))
    } else {
        TransportError::new(TransportErrorKind::Connect(error.to_string()))
    }
}

#[async_trait]
impl ImageTransport for ReqwestTransport {
    #[tracing::instrument(
        skip(self, request),
        fields(category = %request.category(), url = %request.url())
    )]
    async fn get(&self, request: &FetchRequest) -> Result<TransportResponse, TransportError> {
        let mut builder = self.client.get(request.url());
        if let Some(key) = request.api_key() {
            builder = builder.header("x-api-key", key);
        }

        let response = builder.send().await.map_err(classify)?;
        let status = response.status().as_u16();
        let retry_after = parse_retry_after(response.headers());
        let body = response.text().await.map_err(classify)?;

        tracing::debug!(status, body_len = body.len(), "Received response");
        Ok(TransportResponse::new(status, retry_after, body))
    }
}
