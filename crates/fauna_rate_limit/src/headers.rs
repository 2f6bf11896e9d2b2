//! Response header helpers.

use reqwest::header::{HeaderMap, RETRY_AFTER};
use std::time::Duration;

/// Read a `Retry-After` header given in whole seconds.
///
/// Returns `None` when the header is absent or is not a non-negative integer
/// (HTTP-date values included); callers substitute their own default.
///
/// # Examples
///
/// ```
/// use fauna_rate_limit::parse_retry_after;
/// use reqwest::header::{HeaderMap, HeaderValue, RETRY_AFTER};
/// use std::time::Duration;
///
/// let mut headers = HeaderMap::new();
/// assert_eq!(parse_retry_after(&headers), None);
///
/// headers.insert(RETRY_AFTER, HeaderValue::from_static("2"));
/// assert_eq!(parse_retry_after(&headers), Some(Duration::from_secs(2)));
/// ```
pub fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}
