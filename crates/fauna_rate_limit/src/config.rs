//! Configuration for the bot.
//!
//! The configuration system layers, later sources winning:
//! - Bundled defaults (include_str! from fauna.toml)
//! - User overrides (~/.config/fauna/fauna.toml, then ./fauna.toml)
//! - `FAUNA__SECTION__KEY` environment variables

use config::{Config, Environment, File, FileFormat};
use fauna_error::{ConfigError, FaunaError, FaunaResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../fauna.toml");

/// Resolver tuning: timeouts, retries, cache and throttling.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Attempts per live fetch (zero is treated as one)
    pub retry_count: u32,
    /// How long a fetched URL is served from cache, in seconds
    pub cache_duration_secs: u64,
    /// Maximum number of cached categories
    pub cache_max_size: usize,
    /// Concurrent outbound fetches allowed process-wide (zero is treated as one)
    pub max_concurrent_requests: usize,
    /// Outbound fetches allowed per minute; 0 means no quota
    pub requests_per_minute: u32,
    /// Longest `Retry-After` honoured, in seconds
    pub retry_after_cap_secs: u64,
    /// `Retry-After` assumed when a 429 has none, in seconds
    pub default_retry_after_secs: u64,
    /// Wait after timeouts and bad responses, in milliseconds
    pub transport_backoff_ms: u64,
    /// Whether wildlife photo search is used for animals without their own API
    pub wildlife_enabled: bool,
    /// Observation search endpoint for wildlife photos
    pub wildlife_base_url: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 5,
            retry_count: 3,
            cache_duration_secs: 30,
            cache_max_size: 64,
            max_concurrent_requests: 5,
            requests_per_minute: 0,
            retry_after_cap_secs: 5,
            default_retry_after_secs: 60,
            transport_backoff_ms: 500,
            wildlife_enabled: true,
            wildlife_base_url: "https://api.inaturalist.org/v1/observations".to_string(),
        }
    }
}

/// API keys for endpoints that accept them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CredentialsConfig {
    /// thecatapi.com key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cat_api_key: Option<String>,
    /// thedogapi.com key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dog_api_key: Option<String>,
}

impl CredentialsConfig {
    /// Fill keys the configuration left unset, ignoring empty values.
    ///
    /// # Examples
    ///
    /// ```
    /// use fauna_rate_limit::CredentialsConfig;
    ///
    /// let mut creds = CredentialsConfig {
    ///     cat_api_key: Some("from-config".to_string()),
    ///     dog_api_key: None,
    /// };
    /// creds.fill_missing(Some("from-env".to_string()), Some("dog-env".to_string()));
    /// assert_eq!(creds.cat_api_key.as_deref(), Some("from-config"));
    /// assert_eq!(creds.dog_api_key.as_deref(), Some("dog-env"));
    /// ```
    pub fn fill_missing(&mut self, cat: Option<String>, dog: Option<String>) {
        fn fill(slot: &mut Option<String>, value: Option<String>) {
            if slot.as_deref().is_none_or(str::is_empty)
                && let Some(value) = value.filter(|v| !v.is_empty())
            {
                *slot = Some(value);
            }
        }
        fill(&mut self.cat_api_key, cat);
        fill(&mut self.dog_api_key, dog);
    }
}

/// Where collection files live.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding one JSON file per collection
    pub data_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: "data".to_string(),
        }
    }
}

/// Defaults for newly seen guilds and the scheduler tick.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DailyConfig {
    /// Default send hour (0-23)
    pub hour: u8,
    /// Default send minute (0-59)
    pub minute: u8,
    /// Default animal selection; empty means every animal
    pub animals: Vec<String>,
    /// Default command prefix stored with new guilds
    pub prefix: String,
    /// Seconds between scheduler ticks
    pub tick_secs: u64,
}

impl Default for DailyConfig {
    fn default() -> Self {
        Self {
            hour: 8,
            minute: 0,
            animals: Vec::new(),
            prefix: "!".to_string(),
            tick_secs: 60,
        }
    }
}

/// Top-level Fauna configuration.
///
/// # Example
///
/// ```no_run
/// use fauna_rate_limit::FaunaConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = FaunaConfig::load()?;
/// println!("Retrying each fetch {} times", config.resolver.retry_count);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct FaunaConfig {
    /// Resolver tuning
    pub resolver: ResolverConfig,
    /// API keys
    pub credentials: CredentialsConfig,
    /// Collection storage
    pub storage: StorageConfig,
    /// Daily post defaults
    pub daily: DailyConfig,
}

impl FaunaConfig {
    /// Load configuration from a specific file path on top of the bundled
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> FaunaResult<Self> {
        debug!("Loading configuration from file");

        Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                FaunaError::from(ConfigError::new(
                    path.as_ref().display().to_string(),
                    format!("unreadable: {}", e),
                ))
            })?
            .try_deserialize()
            .map_err(|e| {
                FaunaError::from(ConfigError::new(
                    path.as_ref().display().to_string(),
                    format!("does not match the expected settings: {}", e),
                ))
            })
    }

    /// Load configuration with precedence: environment > current dir > home
    /// dir > bundled default.
    ///
    /// User config files are optional and silently skipped if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if a present file or variable cannot be parsed.
    #[instrument]
    pub fn load() -> FaunaResult<Self> {
        debug!("Loading configuration with precedence: env > current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/fauna/fauna.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder
            .add_source(File::with_name("fauna").required(false))
            .add_source(
                Environment::with_prefix("FAUNA")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        builder
            .build()
            .map_err(|e| {
                FaunaError::from(ConfigError::new(
                    "layered sources",
                    format!("could not be merged: {}", e),
                ))
            })?
            .try_deserialize()
            .map_err(|e| {
                FaunaError::from(ConfigError::new(
                    "layered sources",
                    format!("do not match the expected settings: {}", e),
                ))
            })
    }

    /// The bundled defaults alone, without user files or environment.
    ///
    /// # Errors
    ///
    /// Returns an error only if the bundled file is malformed.
    pub fn bundled() -> FaunaResult<Self> {
        Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .build()
            .and_then(|config| config.try_deserialize())
            .map_err(|e| {
                FaunaError::from(ConfigError::new("bundled defaults", e.to_string()))
            })
    }
}
