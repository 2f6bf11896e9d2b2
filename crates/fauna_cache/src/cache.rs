//! Image cache implementation.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::Instant;

/// A cached image URL and when it was fetched.
#[derive(Debug, Clone, Getters)]
pub struct CachedImage {
    url: String,
    fetched_at: Instant,
}

impl CachedImage {
    /// Check if this entry is older than `ttl`.
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.fetched_at.elapsed() >= ttl
    }

    /// Get remaining time until expiration.
    pub fn time_remaining(&self, ttl: Duration) -> Option<Duration> {
        ttl.checked_sub(self.fetched_at.elapsed())
            .filter(|d| !d.is_zero())
    }
}

/// Configuration for the image cache.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_")]
pub struct ImageCacheConfig {
    /// How long a fetched URL is served from cache (seconds)
    #[serde(default = "default_cache_duration")]
    #[builder(default = "default_cache_duration()")]
    cache_duration: u64,

    /// Maximum number of categories held at once
    #[serde(default = "default_max_size")]
    #[builder(default = "default_max_size()")]
    max_size: usize,

    /// Whether caching is enabled
    #[serde(default = "default_enabled")]
    #[builder(default = "default_enabled()")]
    enabled: bool,
}

fn default_cache_duration() -> u64 {
    30
}

fn default_max_size() -> usize {
    64
}

fn default_enabled() -> bool {
    true
}

impl Default for ImageCacheConfig {
    fn default() -> Self {
        Self {
            cache_duration: default_cache_duration(),
            max_size: default_max_size(),
            enabled: default_enabled(),
        }
    }
}

impl ImageCacheConfig {
    /// Cache duration as a [`Duration`].
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.cache_duration)
    }
}

/// Per-category cache of resolved image URLs.
///
/// An entry is served only while it is younger than the configured cache
/// duration. Expired entries are treated as absent and dropped on the lookup
/// that finds them.
///
/// # Example
///
/// ```
/// use fauna_cache::{ImageCache, ImageCacheConfig};
///
/// let mut cache = ImageCache::new(ImageCacheConfig::default());
/// cache.insert("cat", "http://x/cat1.png");
///
/// assert_eq!(cache.get("cat").as_deref(), Some("http://x/cat1.png"));
/// assert_eq!(cache.get("dog"), None);
/// ```
#[derive(Debug)]
pub struct ImageCache {
    config: ImageCacheConfig,
    entries: HashMap<String, CachedImage>,
    access_order: Vec<String>,
}

impl ImageCache {
    /// Create a new image cache with configuration.
    pub fn new(config: ImageCacheConfig) -> Self {
        tracing::debug!(
            cache_duration = config.cache_duration,
            max_size = config.max_size,
            enabled = config.enabled,
            "Creating new ImageCache"
        );
        Self {
            config,
            entries: HashMap::new(),
            access_order: Vec::new(),
        }
    }

    /// Configuration this cache was built with.
    pub fn config(&self) -> &ImageCacheConfig {
        &self.config
    }

    /// Record a freshly fetched URL for `category`, replacing any older entry.
    #[tracing::instrument(skip(self, url), fields(category, cache_size = self.entries.len()))]
    pub fn insert(&mut self, category: &str, url: impl Into<String>) {
        if !self.config.enabled || self.config.max_size == 0 {
            tracing::debug!("Cache disabled, skipping insert");
            return;
        }

        if self.entries.len() >= self.config.max_size && !self.entries.contains_key(category) {
            self.evict_lru();
        }

        self.touch(category);
        self.entries.insert(
            category.to_string(),
            CachedImage {
                url: url.into(),
                fetched_at: Instant::now(),
            },
        );
        tracing::debug!("Inserted entry into cache");
    }

    /// Get the cached URL for `category`.
    ///
    /// Returns None if:
    /// - Entry doesn't exist
    /// - Entry is expired (it is removed)
    /// - Cache is disabled
    #[tracing::instrument(skip(self), fields(cache_size = self.entries.len()))]
    pub fn get(&mut self, category: &str) -> Option<String> {
        if !self.config.enabled {
            return None;
        }

        let ttl = self.config.ttl();
        let entry = self.entries.get(category)?;
        if entry.is_expired(ttl) {
            tracing::debug!("Cache entry expired, removing");
            self.remove(category);
            return None;
        }

        let url = entry.url.clone();
        tracing::debug!(time_remaining = ?entry.time_remaining(ttl), "Cache hit");
        self.touch(category);
        Some(url)
    }

    /// Remove expired entries from cache.
    pub fn cleanup_expired(&mut self) -> usize {
        let before = self.entries.len();
        let ttl = self.config.ttl();

        self.entries.retain(|_, entry| !entry.is_expired(ttl));
        let entries = &self.entries;
        self.access_order.retain(|k| entries.contains_key(k));

        let removed = before - self.entries.len();
        if removed > 0 {
            tracing::info!(
                removed,
                remaining = self.entries.len(),
                "Cleaned up expired cache entries"
            );
        }
        removed
    }

    /// Clear all cache entries.
    pub fn clear(&mut self) {
        let count = self.entries.len();
        self.entries.clear();
        self.access_order.clear();
        tracing::info!(cleared = count, "Cleared cache");
    }

    /// Get number of cached entries, expired or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn touch(&mut self, category: &str) {
        if let Some(pos) = self.access_order.iter().position(|k| k == category) {
            self.access_order.remove(pos);
        }
        self.access_order.push(category.to_string());
    }

    fn remove(&mut self, category: &str) {
        self.entries.remove(category);
        if let Some(pos) = self.access_order.iter().position(|k| k == category) {
            self.access_order.remove(pos);
        }
    }

    /// Evict least recently used entry.
    fn evict_lru(&mut self) {
        if !self.access_order.is_empty() {
            let key = self.access_order.remove(0);
            tracing::debug!(category = %key, "Evicting LRU entry");
            self.entries.remove(&key);
        }
    }
}

impl Default for ImageCache {
    fn default() -> Self {
        Self::new(ImageCacheConfig::default())
    }
}
