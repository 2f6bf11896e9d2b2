//! Outbound HTTP seam.

use async_trait::async_trait;
use derive_getters::Getters;
use fauna_error::TransportError;
use std::sync::Arc;
use std::time::Duration;

/// One outbound image lookup.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct FetchRequest {
    /// Category being resolved, for logging
    category: String,
    /// Endpoint to GET
    url: String,
    /// Value for the `x-api-key` header, if any
    api_key: Option<String>,
}

impl FetchRequest {
    /// Create a request without credentials.
    pub fn new(category: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            url: url.into(),
            api_key: None,
        }
    }

    /// Attach an API key.
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }
}

/// What came back from one GET, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct TransportResponse {
    /// HTTP status code
    status: u16,
    /// Parsed `Retry-After`, if the server sent one
    retry_after: Option<Duration>,
    /// Raw response body
    body: String,
}

impl TransportResponse {
    /// Create a response.
    pub fn new(status: u16, retry_after: Option<Duration>, body: impl Into<String>) -> Self {
        Self {
            status,
            retry_after,
            body: body.into(),
        }
    }

    /// A 200 response with `body`.
    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, None, body)
    }
}

/// Performs GET requests for the resolver.
///
/// Implementations report network-level failures (timeouts, refused
/// connections) as errors and return every HTTP response, whatever its
/// status, as a [`TransportResponse`].
#[async_trait]
pub trait ImageTransport: Send + Sync {
    /// Issue one GET.
    async fn get(&self, request: &FetchRequest) -> Result<TransportResponse, TransportError>;
}

#[async_trait]
impl<T: ImageTransport + ?Sized> ImageTransport for Arc<T> {
    async fn get(&self, request: &FetchRequest) -> Result<TransportResponse, TransportError> {
        (**self).get(request).await
    }
}
