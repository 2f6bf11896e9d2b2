//! Tests that the facade crate wires the workspace together.

use fauna::{
    AnimalCommands, DailyCommands, FaunaConfig, GuildSettings, JsonStore, LogPublisher,
    Resolver, UserStats, guild_defaults,
};
use std::sync::Arc;
use tempfile::TempDir;

fn offline_config() -> FaunaConfig {
    let mut config = FaunaConfig::default();
    config.resolver.wildlife_enabled = false;
    config
}

#[tokio::test]
async fn test_static_animals_resolve_offline() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let store = JsonStore::new(dir.path())?;
    let resolver = Arc::new(Resolver::from_config(&offline_config())?);
    let commands = AnimalCommands::new(Arc::clone(&resolver), UserStats::new(store.clone()));

    let post = commands.fetch("9", "koala").await;
    assert!(fauna::fallback_pool(fauna::Animal::Koala).contains(&post.image_url().as_str()));
    assert_eq!(resolver.cached_len(), 0);
    Ok(())
}

#[tokio::test]
async fn test_guild_round_trip_through_files() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let config = offline_config();
    let resolver = Arc::new(Resolver::from_config(&config)?);

    let daily = DailyCommands::new(
        GuildSettings::new(JsonStore::new(dir.path())?),
        guild_defaults(&config.daily),
        Arc::clone(&resolver),
    );
    daily.set_channel("314", "2718").await;
    daily.set_animals("314", &["sloth"]).await?;
    daily.enable("314").await?;

    let post = daily.test("314", &LogPublisher).await?;
    assert_eq!(post.animal(), "sloth");

    let reopened = GuildSettings::new(JsonStore::new(dir.path())?);
    let record = reopened.settings_or_default("314").await;
    assert!(record.daily_enabled);
    assert_eq!(record.channel_id.as_deref(), Some("2718"));
    assert!(dir.path().join("guild_settings.json").exists());
    Ok(())
}
