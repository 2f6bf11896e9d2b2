//! Image client setup errors.

/// The shared reqwest client for the animal APIs could not be built.
///
/// Failures of individual fetches are [`TransportError`](crate::TransportError)s
/// and never reach callers; this one stops startup, since no live tier is
/// possible without a client.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display(
    "HTTP Error: image client with {}s timeout unavailable: {} at line {} in {}",
    timeout_secs,
    message,
    line,
    file
)]
pub struct HttpError {
    /// Per-request timeout the client was built with
    pub timeout_secs: u64,
    /// Why the builder failed, usually the TLS backend
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl HttpError {
    /// Record a failed client build for the given timeout.
    ///
    /// # Examples
    ///
    /// ```
    /// use fauna_error::HttpError;
    ///
    /// let err = HttpError::new(10, "no TLS backend");
    /// assert_eq!(err.timeout_secs, 10);
    /// assert!(err.to_string().contains("10s timeout"));
    /// ```
    #[track_caller]
    pub fn new(timeout_secs: u64, message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            timeout_secs,
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
