//! Core data types for the Fauna animal image bot.
//!
//! This crate holds the static knowledge every other crate shares: the known
//! animal categories, where each one's images come from, the fallback pools
//! used when a live API is unavailable, and the fun-fact table.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod animal;
mod facts;
mod pool;
mod post;
mod source;

pub use animal::Animal;
pub use facts::{DEFAULT_FACT, random_fact};
pub use pool::{DEFAULT_IMAGE_URL, fallback_pool, static_image};
pub use post::{AnimalPost, AnimalPostBuilder, FOOTER};
pub use source::{ApiEndpoint, SourceKind};
