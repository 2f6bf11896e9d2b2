//! Outbound fetch throttling, retry policy and configuration.
//!
//! The resolver shares one [`FetchGate`] across every category so bursts of
//! requests from many guilds never put more than a handful of fetches in
//! flight. [`RetryPolicy`] describes how failed attempts are spaced, and
//! [`FaunaConfig`] carries every tunable the bot reads at startup.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod gate;
mod headers;
mod retry;

pub use config::{CredentialsConfig, DailyConfig, FaunaConfig, ResolverConfig, StorageConfig};
pub use error::{RateLimitError, RateLimitErrorKind};
pub use gate::{FetchGate, FetchPermit};
pub use headers::parse_retry_after;
pub use retry::RetryPolicy;
