//! Per-guild daily post settings commands.

use crate::DailyPublisher;
use crate::animals::display_name;
use fauna_core::{Animal, AnimalPost, random_fact};
use fauna_error::{CommandError, CommandErrorKind, FaunaResult};
use fauna_rate_limit::DailyConfig;
use fauna_resolver::{ImageTransport, ReqwestTransport, Resolver};
use fauna_storage::{GuildDefaults, GuildSettings, GuildSettingsRecord};
use rand::seq::SliceRandom;
use std::sync::Arc;
use tracing::{info, instrument};

/// Footer on daily posts.
pub const DAILY_FOOTER: &str = "AnimalVerse 🐾 Daily";

/// Defaults for newly seen guilds, taken from the `[daily]` config section.
pub fn guild_defaults(config: &DailyConfig) -> GuildDefaults {
    GuildDefaults::new(
        config.hour,
        config.minute,
        config.animals.clone(),
        config.prefix.clone(),
    )
}

/// Parse a 24-hour `HH:MM` time.
///
/// # Errors
///
/// Returns [`CommandErrorKind::InvalidTime`] unless the input is two
/// colon-separated numbers with hour 0-23 and minute 0-59.
///
/// # Examples
///
/// ```
/// use fauna_bot::parse_time;
///
/// assert_eq!(parse_time("09:30").unwrap(), (9, 30));
/// assert_eq!(parse_time("7:05").unwrap(), (7, 5));
/// assert!(parse_time("24:00").is_err());
/// assert!(parse_time("noon").is_err());
/// ```
pub fn parse_time(input: &str) -> FaunaResult<(u8, u8)> {
    let invalid = || CommandError::new(CommandErrorKind::InvalidTime(input.to_string()));

    let (hour, minute) = input.trim().split_once(':').ok_or_else(invalid)?;
    let hour: u8 = hour.parse().map_err(|_| invalid())?;
    let minute: u8 = minute.parse().map_err(|_| invalid())?;
    if hour > 23 || minute > 59 {
        return Err(invalid().into());
    }
    Ok((hour, minute))
}

/// Build the daily post for a guild.
///
/// The animal is drawn uniformly from the guild's selection, or from every
/// known animal when the selection is empty.
pub async fn daily_post<T: ImageTransport>(
    resolver: &Resolver<T>,
    record: &GuildSettingsRecord,
) -> AnimalPost {
    let animal = pick_animal(&record.animal_types);
    let image_url = resolver.resolve(&animal, None).await;
    AnimalPost::new(
        animal.as_str(),
        format!("🐾 Daily Animal - {}", display_name(&animal)),
        image_url,
        random_fact(&animal),
    )
    .with_footer(DAILY_FOOTER)
}

fn pick_animal(selection: &[String]) -> String {
    let mut rng = rand::thread_rng();
    if let Some(animal) = selection.choose(&mut rng) {
        return animal.clone();
    }
    Animal::all()
        .choose(&mut rng)
        .map(|animal| animal.as_str().to_string())
        .unwrap_or_else(|| Animal::Cat.as_str().to_string())
}

/// Settings commands for the daily post.
///
/// Every command first makes sure the guild has a settings record, so a
/// guild's first command sees the configured defaults.
#[derive(Debug)]
pub struct DailyCommands<T = ReqwestTransport> {
    guilds: GuildSettings,
    defaults: GuildDefaults,
    resolver: Arc<Resolver<T>>,
}

impl<T: ImageTransport> DailyCommands<T> {
    /// Creates the command set.
    pub fn new(guilds: GuildSettings, defaults: GuildDefaults, resolver: Arc<Resolver<T>>) -> Self {
        Self {
            guilds,
            defaults,
            resolver,
        }
    }

    /// The settings wrapper.
    pub fn guilds(&self) -> &GuildSettings {
        &self.guilds
    }

    /// Current settings for `guild`.
    pub async fn show(&self, guild: &str) -> GuildSettingsRecord {
        self.guilds.initialize_guild(guild, &self.defaults).await;
        self.guilds.settings_or_default(guild).await
    }

    /// Switch the daily post on.
    ///
    /// # Errors
    ///
    /// Returns [`CommandErrorKind::ChannelNotSet`] if no channel is set.
    #[instrument(skip(self))]
    pub async fn enable(&self, guild: &str) -> FaunaResult<GuildSettingsRecord> {
        let record = self.show(guild).await;
        if channel_of(&record).is_none() {
            return Err(CommandError::new(CommandErrorKind::ChannelNotSet).into());
        }
        let record = self.guilds.update(guild, |r| r.daily_enabled = true).await;
        info!(channel = ?record.channel_id, time = %record.daily_time, "Daily post enabled");
        Ok(record)
    }

    /// Switch the daily post off.
    #[instrument(skip(self))]
    pub async fn disable(&self, guild: &str) -> GuildSettingsRecord {
        self.show(guild).await;
        let record = self.guilds.update(guild, |r| r.daily_enabled = false).await;
        info!("Daily post disabled");
        record
    }

    /// Choose the channel daily posts go to.
    #[instrument(skip(self))]
    pub async fn set_channel(&self, guild: &str, channel: &str) -> GuildSettingsRecord {
        self.show(guild).await;
        let channel = channel.trim().to_string();
        self.guilds
            .update(guild, |r| r.channel_id = Some(channel))
            .await
    }

    /// Set the send time from a 24-hour `HH:MM` string.
    ///
    /// # Errors
    ///
    /// Returns [`CommandErrorKind::InvalidTime`] for malformed or out-of-range
    /// times; the stored time is left unchanged.
    #[instrument(skip(self))]
    pub async fn set_time(&self, guild: &str, time: &str) -> FaunaResult<GuildSettingsRecord> {
        let (hour, minute) = parse_time(time)?;
        self.show(guild).await;
        Ok(self.guilds.update(guild, |r| r.set_time(hour, minute)).await)
    }

    /// The guild's animal selection. Empty means every animal.
    pub async fn list_animals(&self, guild: &str) -> Vec<String> {
        self.show(guild).await.animal_types
    }

    /// Restrict daily posts to `animals`.
    ///
    /// Names are trimmed, lowercased and deduplicated.
    ///
    /// # Errors
    ///
    /// Returns [`CommandErrorKind::NoAnimals`] if no non-blank name is given.
    #[instrument(skip(self, animals))]
    pub async fn set_animals<S: AsRef<str>>(
        &self,
        guild: &str,
        animals: &[S],
    ) -> FaunaResult<Vec<String>> {
        let mut selection: Vec<String> = Vec::new();
        for name in animals {
            let name = name.as_ref().trim().to_lowercase();
            if !name.is_empty() && !selection.contains(&name) {
                selection.push(name);
            }
        }
        if selection.is_empty() {
            return Err(CommandError::new(CommandErrorKind::NoAnimals).into());
        }

        self.show(guild).await;
        let record = self
            .guilds
            .update(guild, |r| r.animal_types = selection)
            .await;
        info!(animals = ?record.animal_types, "Daily animals set");
        Ok(record.animal_types)
    }

    /// Go back to picking from every animal.
    #[instrument(skip(self))]
    pub async fn clear_animals(&self, guild: &str) -> GuildSettingsRecord {
        self.show(guild).await;
        self.guilds.update(guild, |r| r.animal_types.clear()).await
    }

    /// Send a daily post right now.
    ///
    /// Works whether or not the daily post is enabled and does not count as
    /// the day's post.
    ///
    /// # Errors
    ///
    /// Returns [`CommandErrorKind::ChannelNotSet`] if no channel is set, or
    /// whatever the publisher reports.
    #[instrument(skip(self, publisher))]
    pub async fn test<P: DailyPublisher + ?Sized>(
        &self,
        guild: &str,
        publisher: &P,
    ) -> FaunaResult<AnimalPost> {
        let record = self.show(guild).await;
        let Some(channel) = channel_of(&record) else {
            return Err(CommandError::new(CommandErrorKind::ChannelNotSet).into());
        };
        let post = daily_post(&self.resolver, &record).await;
        publisher.publish(guild, channel, &post).await?;
        info!(animal = %post.animal(), "Test post sent");
        Ok(post)
    }
}

/// The configured channel, ignoring blank ids.
pub(crate) fn channel_of(record: &GuildSettingsRecord) -> Option<&str> {
    record
        .channel_id
        .as_deref()
        .map(str::trim)
        .filter(|channel| !channel.is_empty())
}
