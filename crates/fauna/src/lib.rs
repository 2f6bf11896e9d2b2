//! Fauna - animal image bot core
//!
//! Fauna resolves animal categories to image URLs and keeps the small amount
//! of state a chat bot needs, without depending on any chat platform.
//!
//! # Features
//!
//! - **Resolver**: cache, then live API with retry, then a static pool; never fails
//! - **Key-Value Store**: one JSON file per collection, atomic writes
//! - **Guild settings and user stats**: typed wrappers over the store
//! - **Daily scheduler**: one post per guild per day at a configured time
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use fauna::{FaunaConfig, Resolver};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let resolver = Resolver::from_config(&FaunaConfig::load()?)?;
//!     println!("{}", resolver.resolve("cat", None).await);
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `fauna_error` - Error types
//! - `fauna_core` - Animals, sources, fallback pools and facts
//! - `fauna_cache` - Per-category image cache
//! - `fauna_rate_limit` - Configuration, fetch gate and retry policy
//! - `fauna_storage` - JSON key-value store and its wrappers
//! - `fauna_resolver` - Fetch-cache-fallback resolver
//! - `fauna_bot` - Commands and the daily scheduler
//!
//! This crate (`fauna`) re-exports everything for convenience.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub use fauna_bot::*;
pub use fauna_cache::*;
pub use fauna_core::*;
pub use fauna_error::*;
pub use fauna_rate_limit::*;
pub use fauna_resolver::*;
pub use fauna_storage::{
    Collection, GUILD_SETTINGS, GuildDefaults, GuildSettings, GuildSettingsRecord, JsonStore,
    NO_FAVORITE, USER_STATS, UserStats, UserStatsRecord,
};

pub mod observability;
