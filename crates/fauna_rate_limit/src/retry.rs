//! Retry spacing for outbound fetches.

use crate::ResolverConfig;
use fauna_error::TransportErrorKind;
use std::time::Duration;
use tokio_retry2::strategy::FixedInterval;

/// How many times a fetch is attempted and how long to wait in between.
///
/// Ordinary failures wait a fixed backoff. A 429 waits for the server's
/// `Retry-After` (or a default when it sent none), capped so one slow API
/// cannot stall a command for a minute.
///
/// # Examples
///
/// ```
/// use fauna_rate_limit::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::default();
/// assert_eq!(*policy.attempts(), 3);
/// assert_eq!(policy.rate_limit_delay(None), Duration::from_secs(5));
/// assert_eq!(policy.rate_limit_delay(Some(Duration::from_secs(2))), Duration::from_secs(2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_getters::Getters)]
pub struct RetryPolicy {
    /// Total attempts including the first
    attempts: usize,
    /// Wait after a timeout, transport error or unusable response
    backoff: Duration,
    /// Longest wait honoured for a 429
    retry_after_cap: Duration,
    /// Wait assumed when a 429 carries no usable `Retry-After`
    default_retry_after: Duration,
}

impl RetryPolicy {
    /// Create a policy. Zero attempts is treated as one.
    pub fn new(
        attempts: usize,
        backoff: Duration,
        retry_after_cap: Duration,
        default_retry_after: Duration,
    ) -> Self {
        Self {
            attempts: attempts.max(1),
            backoff,
            retry_after_cap,
            default_retry_after,
        }
    }

    /// Build a policy from the resolver section of the configuration.
    pub fn from_config(config: &ResolverConfig) -> Self {
        Self::new(
            config.retry_count as usize,
            Duration::from_millis(config.transport_backoff_ms),
            Duration::from_secs(config.retry_after_cap_secs),
            Duration::from_secs(config.default_retry_after_secs),
        )
    }

    /// Delay schedule for `tokio_retry2`: one entry per retry after the
    /// first attempt.
    pub fn strategy(&self) -> std::iter::Take<FixedInterval> {
        let millis = u64::try_from(self.backoff.as_millis()).unwrap_or(u64::MAX);
        FixedInterval::from_millis(millis).take(self.attempts - 1)
    }

    /// Wait before retrying a 429 that asked for `retry_after`.
    pub fn rate_limit_delay(&self, retry_after: Option<Duration>) -> Duration {
        retry_after
            .unwrap_or(self.default_retry_after)
            .min(self.retry_after_cap)
    }

    /// Delay that overrides the fixed schedule for this failure, if any.
    pub fn override_delay(&self, error: &TransportErrorKind) -> Option<Duration> {
        error
            .is_rate_limited()
            .then(|| self.rate_limit_delay(error.requested_delay()))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&ResolverConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_yields_one_delay_per_retry() {
        let policy = RetryPolicy::default();
        let delays: Vec<_> = policy.strategy().collect();
        assert_eq!(delays, vec![Duration::from_millis(500); 2]);
    }

    #[test]
    fn zero_attempts_still_tries_once() {
        let policy = RetryPolicy::new(0, Duration::ZERO, Duration::ZERO, Duration::ZERO);
        assert_eq!(*policy.attempts(), 1);
        assert_eq!(policy.strategy().count(), 0);
    }

    #[test]
    fn only_rate_limits_override_backoff() {
        let policy = RetryPolicy::default();
        assert_eq!(
            policy.override_delay(&TransportErrorKind::RateLimited {
                retry_after: Some(Duration::from_secs(120))
            }),
            Some(Duration::from_secs(5))
        );
        assert_eq!(
            policy.override_delay(&TransportErrorKind::Timeout("slow".into())),
            None
        );
        assert_eq!(policy.override_delay(&TransportErrorKind::Status(500)), None);
    }

    #[test]
    fn rate_limit_without_header_waits_capped_default() {
        let policy = RetryPolicy::default();
        assert_eq!(
            policy.override_delay(&TransportErrorKind::RateLimited { retry_after: None }),
            Some(Duration::from_secs(5))
        );
        assert_eq!(
            policy.override_delay(&TransportErrorKind::RateLimited {
                retry_after: Some(Duration::from_secs(1))
            }),
            Some(Duration::from_secs(1))
        );
    }
}
