//! Process-wide bound on outbound image fetches.
//!
//! Two limits are combined:
//! - a Tokio semaphore caps how many fetches are in flight at once
//! - an optional governor quota (GCRA) caps requests per minute

use crate::{RateLimitError, RateLimitErrorKind, ResolverConfig};
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as GovernorRateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;
use tokio::sync::Semaphore;

type DirectRateLimiter = GovernorRateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Shared gate every outbound fetch must pass through.
///
/// Cloning is cheap and every clone shares the same slots, so one gate built
/// at startup bounds the whole process regardless of category.
///
/// # Example
///
/// ```
/// use fauna_rate_limit::FetchGate;
///
/// # #[tokio::main]
/// # async fn main() {
/// let gate = FetchGate::new(5, 0);
/// let permit = gate.acquire().await.unwrap();
/// assert_eq!(gate.available(), 4);
/// drop(permit);
/// assert_eq!(gate.available(), 5);
/// # }
/// ```
#[derive(Clone)]
pub struct FetchGate {
    max_concurrent: usize,
    requests_per_minute: u32,
    rpm_limiter: Option<Arc<DirectRateLimiter>>,
    semaphore: Arc<Semaphore>,
}

impl FetchGate {
    /// Create a gate allowing `max_concurrent` fetches in flight and, when
    /// `requests_per_minute` is non-zero, at most that many per minute.
    ///
    /// A concurrency of zero is treated as one.
    pub fn new(max_concurrent: usize, requests_per_minute: u32) -> Self {
        let max_concurrent = max_concurrent.max(1);
        let rpm_limiter = NonZeroU32::new(requests_per_minute)
            .map(|n| Arc::new(GovernorRateLimiter::direct(Quota::per_minute(n))));

        tracing::debug!(max_concurrent, requests_per_minute, "Creating fetch gate");

        Self {
            max_concurrent,
            requests_per_minute,
            rpm_limiter,
            semaphore: Arc::new(Semaphore::new(max_concurrent)),
        }
    }

    /// Build a gate from the resolver section of the configuration.
    pub fn from_config(config: &ResolverConfig) -> Self {
        Self::new(config.max_concurrent_requests, config.requests_per_minute)
    }

    /// Wait for a slot, honouring the per-minute quota first so a waiting
    /// request does not hold a concurrency slot.
    ///
    /// # Errors
    ///
    /// Fails only after [`FetchGate::close`] has been called.
    pub async fn acquire(&self) -> Result<FetchPermit, RateLimitError> {
        if let Some(limiter) = &self.rpm_limiter {
            limiter.until_ready().await;
        }

        let permit = self
            .semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| RateLimitError::new(RateLimitErrorKind::Closed))?;

        Ok(FetchPermit { _permit: permit })
    }

    /// Take a slot without waiting.
    ///
    /// # Errors
    ///
    /// Returns `QuotaExceeded` when the per-minute quota would block,
    /// `Saturated` when every slot is taken, and `Closed` after shutdown.
    pub fn try_acquire(&self) -> Result<FetchPermit, RateLimitError> {
        if let Some(limiter) = &self.rpm_limiter
            && limiter.check().is_err()
        {
            return Err(RateLimitErrorKind::QuotaExceeded(self.requests_per_minute).into());
        }

        let permit = self
            .semaphore
            .clone()
            .try_acquire_owned()
            .map_err(|e| match e {
                tokio::sync::TryAcquireError::Closed => {
                    RateLimitError::new(RateLimitErrorKind::Closed)
                }
                tokio::sync::TryAcquireError::NoPermits => {
                    RateLimitError::new(RateLimitErrorKind::Saturated(self.max_concurrent))
                }
            })?;

        Ok(FetchPermit { _permit: permit })
    }

    /// Number of free slots right now.
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }

    /// Configured concurrency limit.
    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    /// Stop handing out permits. Waiting and future acquisitions fail;
    /// permits already held stay valid until dropped.
    pub fn close(&self) {
        tracing::info!("Closing fetch gate");
        self.semaphore.close();
    }
}

impl std::fmt::Debug for FetchGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchGate")
            .field("max_concurrent", &self.max_concurrent)
            .field("requests_per_minute", &self.requests_per_minute)
            .field("available", &self.available())
            .finish()
    }
}

impl Default for FetchGate {
    fn default() -> Self {
        Self::from_config(&ResolverConfig::default())
    }
}

/// RAII guard for one fetch slot.
///
/// The slot returns to the gate when this is dropped, whether the fetch
/// succeeded, failed or was cancelled.
#[derive(Debug)]
pub struct FetchPermit {
    _permit: tokio::sync::OwnedSemaphorePermit,
}
