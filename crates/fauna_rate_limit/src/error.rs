//! Error types for fetch gating.

/// Error kinds for fetch gating.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum RateLimitErrorKind {
    /// Every concurrent fetch slot is taken.
    #[display("All {} fetch slots are in use", _0)]
    Saturated(usize),
    /// The per-minute quota has no capacity left right now.
    #[display("Per-minute quota of {} requests exhausted", _0)]
    QuotaExceeded(u32),
    /// The gate was closed and will hand out no more permits.
    #[display("Fetch gate is closed")]
    Closed,
}

/// Fetch gating error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Rate Limit Error: {} at line {} in {}", kind, line, file)]
pub struct RateLimitError {
    kind: RateLimitErrorKind,
    line: u32,
    file: &'static str,
}

impl RateLimitError {
    /// Create a new rate limiting error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: RateLimitErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &RateLimitErrorKind {
        &self.kind
    }
}

impl From<RateLimitErrorKind> for RateLimitError {
    #[track_caller]
    fn from(kind: RateLimitErrorKind) -> Self {
        Self::new(kind)
    }
}
