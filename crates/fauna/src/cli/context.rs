//! Shared state built once per invocation.

use super::Cli;
use fauna::{
    AnimalCommands, DailyCommands, FaunaConfig, FaunaResult, GuildDefaults, GuildSettings,
    JsonStore, Resolver, UserStats, guild_defaults,
};
use std::sync::Arc;
use tracing::debug;

/// Legacy variable names for the API keys.
const CAT_KEY_VAR: &str = "CATS_API_KEY";
const DOG_KEY_VAR: &str = "DOGS_API_KEY";

/// Configuration, store and resolver for one CLI run.
pub struct App {
    config: FaunaConfig,
    store: JsonStore,
    resolver: Arc<Resolver>,
}

impl App {
    /// Load configuration and open the store.
    ///
    /// `--config` replaces the user and environment layers with one file;
    /// `--data-dir` overrides `storage.data_dir`.
    pub fn load(cli: &Cli) -> FaunaResult<Self> {
        let mut config = match &cli.config {
            Some(path) => FaunaConfig::from_file(path)?,
            None => FaunaConfig::load()?,
        };
        config.credentials.fill_missing(
            std::env::var(CAT_KEY_VAR).ok(),
            std::env::var(DOG_KEY_VAR).ok(),
        );
        if let Some(dir) = &cli.data_dir {
            config.storage.data_dir = dir.display().to_string();
        }
        debug!(data_dir = %config.storage.data_dir, "Configuration loaded");

        let store = JsonStore::new(&config.storage.data_dir)?;
        let resolver = Arc::new(Resolver::from_config(&config)?);
        Ok(Self {
            config,
            store,
            resolver,
        })
    }

    /// Loaded configuration.
    pub fn config(&self) -> &FaunaConfig {
        &self.config
    }

    /// Shared resolver.
    pub fn resolver(&self) -> &Arc<Resolver> {
        &self.resolver
    }

    /// Defaults for newly seen guilds.
    pub fn defaults(&self) -> GuildDefaults {
        guild_defaults(&self.config.daily)
    }

    /// Guild settings wrapper.
    pub fn guilds(&self) -> GuildSettings {
        GuildSettings::new(self.store.clone())
    }

    /// User stats wrapper.
    pub fn stats(&self) -> UserStats {
        UserStats::new(self.store.clone())
    }

    /// Image commands.
    pub fn animal_commands(&self) -> AnimalCommands {
        AnimalCommands::new(Arc::clone(&self.resolver), self.stats())
    }

    /// Daily settings commands.
    pub fn daily_commands(&self) -> DailyCommands {
        DailyCommands::new(self.guilds(), self.defaults(), Arc::clone(&self.resolver))
    }
}
