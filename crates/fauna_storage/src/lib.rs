//! Flat JSON-file key-value storage for Fauna.
//!
//! A store is a directory holding one pretty-printed JSON object per
//! collection (`{data_dir}/{collection}.json`). Values are schema-free; the
//! [`GuildSettings`] and [`UserStats`] wrappers are the only layer that knows
//! what the records look like.
//!
//! Persistence failures never reach the caller: unreadable files read as
//! empty collections and failed writes are logged and dropped. Writers are not
//! coordinated, so concurrent updates to one collection are last-writer-wins.
//!
//! # Example
//!
//! ```rust
//! use fauna_storage::JsonStore;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! # let dir = tempfile::TempDir::new()?;
//! let store = JsonStore::new(dir.path())?;
//!
//! store.set("prefs", 42, "dark-mode").await;
//! assert_eq!(store.get::<String>("prefs", 42).await.as_deref(), Some("dark-mode"));
//!
//! assert_eq!(store.increment("counters", "fetches", 2).await, 2);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod guild;
mod stats;
mod store;

pub use fauna_error::{StorageError, StorageErrorKind};
pub use guild::{GUILD_SETTINGS, GuildDefaults, GuildSettings, GuildSettingsRecord};
pub use stats::{NO_FAVORITE, USER_STATS, UserStats, UserStatsRecord};
pub use store::{Collection, JsonStore};
