//! Outbound fetch error types and retry classification.

use std::time::Duration;

/// Ways a single outbound image fetch attempt can fail.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum TransportErrorKind {
    /// Request exceeded the configured timeout
    #[display("Request timed out: {}", _0)]
    Timeout(String),
    /// Connection could not be established or was dropped
    #[display("Connection failed: {}", _0)]
    Connect(String),
    /// Server answered 429; carries the delay it asked for, if any
    #[display("Rate limited (retry after {:?})", retry_after)]
    RateLimited {
        /// Parsed `Retry-After` header
        retry_after: Option<Duration>,
    },
    /// Server answered with a non-success status
    #[display("HTTP {}", _0)]
    Status(u16),
    /// Success response without a usable image URL
    #[display("Unusable response body: {}", _0)]
    Decode(String),
}

impl TransportErrorKind {
    /// Delay the server asked for before the next attempt.
    ///
    /// Only rate-limit responses carry one; every other failure uses the
    /// caller's fixed backoff.
    pub fn requested_delay(&self) -> Option<Duration> {
        match self {
            TransportErrorKind::RateLimited { retry_after } => *retry_after,
            _ => None,
        }
    }

    /// Whether the server answered 429.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, TransportErrorKind::RateLimited { .. })
    }

    /// Whether this failure came from the network rather than the server.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            TransportErrorKind::Timeout(_) | TransportErrorKind::Connect(_)
        )
    }
}

/// Transport error with source location tracking.
///
/// # Examples
///
/// ```
/// use fauna_error::{TransportError, TransportErrorKind};
///
/// let err = TransportError::new(TransportErrorKind::Status(503));
/// assert!(format!("{}", err).contains("HTTP 503"));
/// assert!(!err.kind.is_network());
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Transport Error: {} at line {} in {}", kind, line, file)]
pub struct TransportError {
    /// The kind of error that occurred
    pub kind: TransportErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl TransportError {
    /// Create a new TransportError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: TransportErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_rate_limits_request_a_delay() {
        let asked = TransportErrorKind::RateLimited {
            retry_after: Some(Duration::from_secs(3)),
        };
        assert!(asked.is_rate_limited());
        assert_eq!(asked.requested_delay(), Some(Duration::from_secs(3)));

        let silent = TransportErrorKind::RateLimited { retry_after: None };
        assert!(silent.is_rate_limited());
        assert_eq!(silent.requested_delay(), None);

        let status = TransportErrorKind::Status(503);
        assert!(!status.is_rate_limited());
        assert_eq!(status.requested_delay(), None);
    }

    #[test]
    fn network_failures_are_told_apart_from_server_answers() {
        assert!(TransportErrorKind::Timeout("slow".into()).is_network());
        assert!(TransportErrorKind::Connect("refused".into()).is_network());
        assert!(!TransportErrorKind::Status(500).is_network());
        assert!(!TransportErrorKind::Decode("no url".into()).is_network());
        assert!(!TransportErrorKind::RateLimited { retry_after: None }.is_network());
    }
}
