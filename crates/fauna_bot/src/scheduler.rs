//! Daily post scheduler.

use crate::DailyPublisher;
use crate::daily::{channel_of, daily_post};
use chrono::{NaiveDateTime, Timelike};
use fauna_error::FaunaResult;
use fauna_resolver::{ImageTransport, ReqwestTransport, Resolver};
use fauna_storage::{GuildDefaults, GuildSettings, GuildSettingsRecord};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Control messages for a running scheduler.
#[derive(Debug)]
pub enum SchedulerMessage {
    /// Run a tick now instead of waiting for the interval
    TickNow,
    /// Stop the scheduler
    Shutdown,
}

/// Sends each guild's daily post once a day at its configured time.
///
/// Times are compared against local wall-clock time at minute resolution,
/// so the tick interval must be a minute or less for no slot to be missed.
pub struct DailyScheduler<P, T = ReqwestTransport> {
    guilds: GuildSettings,
    defaults: GuildDefaults,
    resolver: Arc<Resolver<T>>,
    publisher: P,
    tick: Duration,
}

impl<P: DailyPublisher, T: ImageTransport> DailyScheduler<P, T> {
    /// Creates a scheduler that ticks every `tick` (at least one second).
    pub fn new(
        guilds: GuildSettings,
        defaults: GuildDefaults,
        resolver: Arc<Resolver<T>>,
        publisher: P,
        tick: Duration,
    ) -> Self {
        Self {
            guilds,
            defaults,
            resolver,
            publisher,
            tick: tick.max(Duration::from_secs(1)),
        }
    }

    /// The publisher posts go through.
    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    /// Whether `record` should get its daily post at `now`.
    ///
    /// True when the post is enabled with a channel, the hour and minute
    /// match, and nothing was sent yet on `now`'s date.
    pub fn is_due(record: &GuildSettingsRecord, now: NaiveDateTime) -> bool {
        if !record.daily_enabled || channel_of(record).is_none() {
            return false;
        }
        if u32::from(record.hour) != now.hour() || u32::from(record.minute) != now.minute() {
            return false;
        }
        let today = now.format(DATE_FORMAT).to_string();
        record.last_sent_date.as_deref() != Some(today.as_str())
    }

    /// Check every guild in `guilds` once and send the due posts.
    ///
    /// An empty slice means every guild with stored settings. Returns the
    /// number of posts sent. A failing guild is logged and skipped.
    #[instrument(skip(self, guilds), fields(guilds = guilds.len()))]
    pub async fn tick(&self, guilds: &[String], now: NaiveDateTime) -> usize {
        let guilds = if guilds.is_empty() {
            self.guilds.guild_ids().await
        } else {
            guilds.to_vec()
        };

        let mut sent = 0;
        for guild in &guilds {
            match self.tick_guild(guild, now).await {
                Ok(true) => sent += 1,
                Ok(false) => {}
                Err(e) => error!(guild = %guild, error = ?e, "Daily post failed"),
            }
        }
        debug!(sent, "Tick complete");
        sent
    }

    async fn tick_guild(&self, guild: &str, now: NaiveDateTime) -> FaunaResult<bool> {
        self.guilds.initialize_guild(guild, &self.defaults).await;
        let record = self.guilds.settings_or_default(guild).await;
        if !Self::is_due(&record, now) {
            return Ok(false);
        }
        let Some(channel) = channel_of(&record) else {
            return Ok(false);
        };

        let post = daily_post(&self.resolver, &record).await;
        self.publisher.publish(guild, channel, &post).await?;

        let today = now.format(DATE_FORMAT).to_string();
        self.guilds
            .update(guild, |r| r.last_sent_date = Some(today))
            .await;
        info!(guild, animal = %post.animal(), "Daily post sent");
        Ok(true)
    }

    /// Tick on the configured interval until told to stop.
    ///
    /// Stops on [`SchedulerMessage::Shutdown`] or when every sender is
    /// dropped.
    #[instrument(skip(self, guilds, rx))]
    pub async fn run(&self, guilds: Vec<String>, mut rx: mpsc::Receiver<SchedulerMessage>) {
        info!(tick_secs = self.tick.as_secs(), "Daily scheduler started");

        let mut interval = tokio::time::interval(self.tick);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    self.tick(&guilds, chrono::Local::now().naive_local()).await;
                }
                msg = rx.recv() => match msg {
                    Some(SchedulerMessage::TickNow) => {
                        self.tick(&guilds, chrono::Local::now().naive_local()).await;
                    }
                    Some(SchedulerMessage::Shutdown) | None => {
                        info!("Daily scheduler shutting down");
                        break;
                    }
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LogPublisher;
    use chrono::NaiveDate;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 14)
            .and_then(|d| d.and_hms_opt(hour, minute, 0))
            .unwrap()
    }

    fn enabled() -> GuildSettingsRecord {
        let mut record = GuildSettingsRecord {
            daily_enabled: true,
            channel_id: Some("42".into()),
            ..Default::default()
        };
        record.set_time(9, 30);
        record
    }

    type Scheduler = DailyScheduler<LogPublisher>;

    #[test]
    fn due_at_matching_minute() {
        assert!(Scheduler::is_due(&enabled(), at(9, 30)));
        assert!(!Scheduler::is_due(&enabled(), at(9, 31)));
        assert!(!Scheduler::is_due(&enabled(), at(10, 30)));
    }

    #[test]
    fn not_due_twice_a_day() {
        let mut record = enabled();
        record.last_sent_date = Some("2026-03-14".into());
        assert!(!Scheduler::is_due(&record, at(9, 30)));

        record.last_sent_date = Some("2026-03-13".into());
        assert!(Scheduler::is_due(&record, at(9, 30)));
    }

    #[test]
    fn needs_enabled_and_channel() {
        let mut record = enabled();
        record.daily_enabled = false;
        assert!(!Scheduler::is_due(&record, at(9, 30)));

        let mut record = enabled();
        record.channel_id = Some("  ".into());
        assert!(!Scheduler::is_due(&record, at(9, 30)));

        let mut record = enabled();
        record.channel_id = None;
        assert!(!Scheduler::is_due(&record, at(9, 30)));
    }
}
