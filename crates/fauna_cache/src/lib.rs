//! Image URL caching with TTL support.
//!
//! The resolver keeps the last successfully fetched URL per category for a
//! short window, trading image variety for fewer outbound API calls.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod cache;

pub use cache::{CachedImage, ImageCache, ImageCacheConfig, ImageCacheConfigBuilder};
