//! Tests for the daily settings commands.

mod test_utils;

use fauna_bot::{DAILY_FOOTER, DailyCommands, guild_defaults};
use fauna_error::{CommandErrorKind, FaunaError, FaunaErrorKind};
use fauna_rate_limit::DailyConfig;
use fauna_storage::GuildDefaults;
use test_utils::{CatTransport, Fixture, RecordingPublisher, resolver};

fn commands(fixture: &Fixture) -> DailyCommands<CatTransport> {
    DailyCommands::new(
        fixture.guilds(),
        GuildDefaults::default(),
        resolver(&CatTransport::default()),
    )
}

fn command_kind(err: &FaunaError) -> Option<&CommandErrorKind> {
    match err.kind() {
        FaunaErrorKind::Command(e) => Some(e.kind()),
        _ => None,
    }
}

#[tokio::test]
async fn test_show_initializes_defaults() -> anyhow::Result<()> {
    let fixture = Fixture::new()?;
    let daily = commands(&fixture);

    let record = daily.show("500").await;

    assert!(!record.daily_enabled);
    assert_eq!(record.daily_time, "08:00");
    assert!(record.created_at.is_some());
    assert_eq!(fixture.guilds().guild_ids().await, vec!["500".to_string()]);
    Ok(())
}

#[tokio::test]
async fn test_enable_requires_channel() -> anyhow::Result<()> {
    let fixture = Fixture::new()?;
    let daily = commands(&fixture);

    let err = daily.enable("500").await.unwrap_err();
    assert_eq!(command_kind(&err), Some(&CommandErrorKind::ChannelNotSet));
    assert!(!daily.show("500").await.daily_enabled);

    daily.set_channel("500", "777").await;
    let record = daily.enable("500").await?;
    assert!(record.daily_enabled);
    assert_eq!(record.channel_id.as_deref(), Some("777"));

    assert!(!daily.disable("500").await.daily_enabled);
    Ok(())
}

#[tokio::test]
async fn test_set_time_validates() -> anyhow::Result<()> {
    let fixture = Fixture::new()?;
    let daily = commands(&fixture);

    let record = daily.set_time("500", "17:45").await?;
    assert_eq!((record.hour, record.minute), (17, 45));
    assert_eq!(record.daily_time, "17:45");

    for bad in ["24:00", "12:60", "noon", ""] {
        let err = daily.set_time("500", bad).await.unwrap_err();
        assert!(matches!(
            command_kind(&err),
            Some(CommandErrorKind::InvalidTime(input)) if input == bad
        ));
    }
    assert_eq!(daily.show("500").await.daily_time, "17:45");
    Ok(())
}

#[tokio::test]
async fn test_animal_selection() -> anyhow::Result<()> {
    let fixture = Fixture::new()?;
    let daily = commands(&fixture);

    assert!(daily.list_animals("500").await.is_empty());

    let selection = daily.set_animals("500", &[" Owl", "fox", "owl", ""]).await?;
    assert_eq!(selection, vec!["owl".to_string(), "fox".to_string()]);
    assert_eq!(daily.list_animals("500").await, selection);

    let err = daily.set_animals::<&str>("500", &[]).await.unwrap_err();
    assert_eq!(command_kind(&err), Some(&CommandErrorKind::NoAnimals));
    let err = daily.set_animals("500", &["  "]).await.unwrap_err();
    assert_eq!(command_kind(&err), Some(&CommandErrorKind::NoAnimals));
    assert_eq!(daily.list_animals("500").await, selection);

    assert!(daily.clear_animals("500").await.animal_types.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_test_post_leaves_last_sent_date() -> anyhow::Result<()> {
    let fixture = Fixture::new()?;
    let daily = commands(&fixture);
    let publisher = RecordingPublisher::default();

    let err = daily.test("500", &publisher).await.unwrap_err();
    assert_eq!(command_kind(&err), Some(&CommandErrorKind::ChannelNotSet));

    daily.set_channel("500", "777").await;
    daily.set_animals("500", &["panda"]).await?;
    let post = daily.test("500", &publisher).await?;

    assert_eq!(post.title(), "🐾 Daily Animal - Panda");
    assert_eq!(post.footer(), DAILY_FOOTER);

    let deliveries = publisher.deliveries();
    assert_eq!(deliveries.len(), 1);
    assert_eq!(deliveries[0].guild, "500");
    assert_eq!(deliveries[0].channel, "777");
    assert_eq!(daily.show("500").await.last_sent_date, None);
    Ok(())
}

#[tokio::test]
async fn test_publish_failure_surfaces() -> anyhow::Result<()> {
    let fixture = Fixture::new()?;
    let daily = commands(&fixture);
    let publisher = RecordingPublisher::rejecting("500");

    daily.set_channel("500", "777").await;
    let err = daily.test("500", &publisher).await.unwrap_err();
    assert!(matches!(command_kind(&err), Some(CommandErrorKind::Publish(_))));
    Ok(())
}

#[test]
fn test_guild_defaults_from_config() {
    let config = DailyConfig {
        hour: 6,
        minute: 15,
        animals: vec!["owl".to_string()],
        prefix: "?".to_string(),
        ..DailyConfig::default()
    };
    let record = guild_defaults(&config).record();
    assert_eq!(record.daily_time, "06:15");
    assert_eq!(record.animal_types, vec!["owl".to_string()]);
    assert_eq!(record.prefix, "?");
}
