//! Platform-neutral command layer for the Fauna animal bot.
//!
//! This crate holds the pieces a chat adapter drives:
//! - **AnimalCommands**: on-demand image posts with per-user stats
//! - **DailyCommands**: per-guild daily post settings
//! - **DailyScheduler**: sends the daily post to every due guild
//!
//! Delivery is behind the [`DailyPublisher`] trait, so the scheduler never
//! knows which chat platform it is talking to.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod animals;
mod daily;
mod publisher;
mod scheduler;

pub use animals::AnimalCommands;
pub use daily::{DAILY_FOOTER, DailyCommands, daily_post, guild_defaults, parse_time};
pub use publisher::{DailyPublisher, LogPublisher};
pub use scheduler::{DailyScheduler, SchedulerMessage};
