//! Per-guild daily post settings.

use crate::JsonStore;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt::Display;

/// Collection holding one settings record per guild.
pub const GUILD_SETTINGS: &str = "guild_settings";

/// Record fields with the older names accepted for each.
const RECORD_FIELDS: &[(&str, &[&str])] = &[
    ("daily_enabled", &["daily_animal_enabled"]),
    ("channel_id", &["daily_animal_channel"]),
    ("hour", &["daily_animal_hour"]),
    ("minute", &["daily_animal_minute"]),
    ("daily_time", &["daily_animal_time"]),
    ("last_sent_date", &["last_daily_animal"]),
    ("animal_types", &[]),
    ("prefix", &[]),
    ("created_at", &[]),
];

fn is_record_field(name: &str) -> bool {
    RECORD_FIELDS
        .iter()
        .any(|(field, aliases)| *field == name || aliases.contains(&name))
}

/// Settings stored for one guild.
///
/// Every field has a default, so partially written records (for example
/// after [`GuildSettings::set_setting`] on a new guild) still decode. Field
/// names from older data files are accepted as aliases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuildSettingsRecord {
    /// Whether the daily post is switched on
    #[serde(alias = "daily_animal_enabled")]
    pub daily_enabled: bool,
    /// Channel the daily post goes to
    #[serde(alias = "daily_animal_channel", deserialize_with = "string_or_number")]
    pub channel_id: Option<String>,
    /// Send hour, 0-23
    #[serde(alias = "daily_animal_hour")]
    pub hour: u8,
    /// Send minute, 0-59
    #[serde(alias = "daily_animal_minute")]
    pub minute: u8,
    /// Send time as `HH:MM`, kept in step with `hour` and `minute`
    #[serde(alias = "daily_animal_time")]
    pub daily_time: String,
    /// Date (`YYYY-MM-DD`) of the last daily post
    #[serde(alias = "last_daily_animal")]
    pub last_sent_date: Option<String>,
    /// Animals to pick from; empty means all of them
    pub animal_types: Vec<String>,
    /// Command prefix
    pub prefix: String,
    /// RFC 3339 creation time
    pub created_at: Option<String>,
}

impl Default for GuildSettingsRecord {
    fn default() -> Self {
        GuildDefaults::default().record_without_timestamp()
    }
}

impl GuildSettingsRecord {
    /// Set the send time, keeping `daily_time` consistent.
    pub fn set_time(&mut self, hour: u8, minute: u8) {
        self.hour = hour;
        self.minute = minute;
        self.daily_time = format_time(hour, minute);
    }
}

fn format_time(hour: u8, minute: u8) -> String {
    format!("{hour:02}:{minute:02}")
}

// Older files stored channel ids as bare numbers
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected a channel id, found {other}"
        ))),
    }
}

/// Values written for a guild seen for the first time.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct GuildDefaults {
    hour: u8,
    minute: u8,
    animals: Vec<String>,
    prefix: String,
}

impl GuildDefaults {
    /// Create defaults. Out-of-range times are clamped to 23:59.
    pub fn new(hour: u8, minute: u8, animals: Vec<String>, prefix: impl Into<String>) -> Self {
        Self {
            hour: hour.min(23),
            minute: minute.min(59),
            animals,
            prefix: prefix.into(),
        }
    }

    fn record_without_timestamp(&self) -> GuildSettingsRecord {
        GuildSettingsRecord {
            daily_enabled: false,
            channel_id: None,
            hour: self.hour,
            minute: self.minute,
            daily_time: format_time(self.hour, self.minute),
            last_sent_date: None,
            animal_types: self.animals.clone(),
            prefix: self.prefix.clone(),
            created_at: None,
        }
    }

    /// Fresh record stamped with the current time.
    pub fn record(&self) -> GuildSettingsRecord {
        GuildSettingsRecord {
            created_at: Some(chrono::Utc::now().to_rfc3339()),
            ..self.record_without_timestamp()
        }
    }
}

impl Default for GuildDefaults {
    fn default() -> Self {
        Self::new(8, 0, Vec::new(), "!")
    }
}

/// Typed access to the `guild_settings` collection.
///
/// # Example
///
/// ```rust
/// use fauna_storage::{GuildDefaults, GuildSettings, JsonStore};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// # let dir = tempfile::TempDir::new()?;
/// let guilds = GuildSettings::new(JsonStore::new(dir.path())?);
///
/// guilds.initialize_guild(1234, &GuildDefaults::default()).await;
/// let record = guilds
///     .update(1234, |r| {
///         r.channel_id = Some("42".to_string());
///         r.daily_enabled = true;
///     })
///     .await;
/// assert_eq!(record.daily_time, "08:00");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct GuildSettings {
    store: JsonStore,
}

impl GuildSettings {
    /// Wrap a store.
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }

    /// Underlying store.
    pub fn store(&self) -> &JsonStore {
        &self.store
    }

    /// Settings for `guild`, if any were ever written.
    ///
    /// Fields that no longer decode (for example a hand-edited hour of 300)
    /// are logged and read as their defaults; the rest of the record is kept.
    pub async fn settings(&self, guild: impl Display) -> Option<GuildSettingsRecord> {
        let value = self.store.get_value(GUILD_SETTINGS, guild).await?;
        decode_record(value)
    }

    /// Settings for `guild`, or defaults when none exist.
    pub async fn settings_or_default(&self, guild: impl Display) -> GuildSettingsRecord {
        self.settings(guild).await.unwrap_or_default()
    }

    /// Replace the settings for `guild`.
    pub async fn save(&self, guild: impl Display, record: &GuildSettingsRecord) {
        self.store.set(GUILD_SETTINGS, guild, record).await;
    }

    /// Read, modify and write back the settings for `guild`.
    ///
    /// Record fields are rewritten from the modified record; keys the record
    /// does not know are left as stored. Returns the record as saved.
    #[tracing::instrument(skip(self, guild, f), fields(guild = %guild))]
    pub async fn update<F>(&self, guild: impl Display, f: F) -> GuildSettingsRecord
    where
        F: FnOnce(&mut GuildSettingsRecord),
    {
        let key = guild.to_string();
        let stored = self.store.get_value(GUILD_SETTINGS, &key).await;
        let mut record = stored
            .clone()
            .and_then(decode_record)
            .unwrap_or_default();
        f(&mut record);
        match merge_record(stored, &record) {
            Ok(merged) => self.store.set(GUILD_SETTINGS, &key, merged).await,
            Err(e) => tracing::error!(error = %e, "Guild settings cannot be stored as JSON"),
        }
        record
    }

    /// One field of the stored record, as raw JSON.
    pub async fn get_setting(&self, guild: impl Display, field: &str) -> Option<Value> {
        match self.store.get_value(GUILD_SETTINGS, guild).await? {
            Value::Object(mut fields) => fields.remove(field),
            _ => None,
        }
    }

    /// Set one field of the stored record, creating the record if needed.
    #[tracing::instrument(skip(self, guild, value), fields(guild = %guild))]
    pub async fn set_setting<T: Serialize>(&self, guild: impl Display, field: &str, value: T) {
        let key = guild.to_string();
        let value = match serde_json::to_value(value) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!(error = %e, "Setting cannot be stored as JSON");
                return;
            }
        };
        let mut fields = match self.store.get_value(GUILD_SETTINGS, &key).await {
            Some(Value::Object(fields)) => fields,
            _ => serde_json::Map::new(),
        };
        fields.insert(field.to_string(), value);
        self.store.set(GUILD_SETTINGS, &key, Value::Object(fields)).await;
    }

    /// Remove one field of the stored record. Returns whether it existed.
    #[tracing::instrument(skip(self, guild), fields(guild = %guild))]
    pub async fn delete_setting(&self, guild: impl Display, field: &str) -> bool {
        let key = guild.to_string();
        let Some(Value::Object(mut fields)) = self.store.get_value(GUILD_SETTINGS, &key).await
        else {
            return false;
        };
        if fields.remove(field).is_none() {
            return false;
        }
        self.store.set(GUILD_SETTINGS, &key, Value::Object(fields)).await;
        true
    }

    /// Write default settings for `guild` unless a record already exists.
    ///
    /// Returns whether a record was created. Repeated calls leave the
    /// existing record, including `created_at`, untouched.
    #[tracing::instrument(skip(self, guild, defaults), fields(guild = %guild))]
    pub async fn initialize_guild(&self, guild: impl Display, defaults: &GuildDefaults) -> bool {
        let key = guild.to_string();
        if self.store.exists(GUILD_SETTINGS, &key).await {
            return false;
        }
        self.save(&key, &defaults.record()).await;
        tracing::info!("Initialized guild settings");
        true
    }

    /// Ids of every guild with stored settings.
    pub async fn guild_ids(&self) -> Vec<String> {
        self.store.keys(GUILD_SETTINGS).await
    }
}

/// Decode a stored record, dropping only the fields that fail to decode.
fn decode_record(value: Value) -> Option<GuildSettingsRecord> {
    let Value::Object(fields) = value else {
        tracing::warn!("Stored guild settings are not an object");
        return None;
    };
    if let Ok(record) = serde_json::from_value(Value::Object(fields.clone())) {
        return Some(record);
    }

    let mut kept = Map::new();
    for (name, field) in fields {
        let single = Value::Object(Map::from_iter([(name.clone(), field.clone())]));
        match serde_json::from_value::<GuildSettingsRecord>(single) {
            Ok(_) => {
                kept.insert(name, field);
            }
            Err(e) => {
                tracing::warn!(field = %name, error = %e, "Ignoring undecodable guild setting")
            }
        }
    }
    // An old name next to its current one would be a duplicate field
    for (field, aliases) in RECORD_FIELDS {
        if kept.contains_key(*field) {
            kept.retain(|name, _| !aliases.contains(&name.as_str()));
        }
    }

    match serde_json::from_value(Value::Object(kept)) {
        Ok(record) => Some(record),
        Err(e) => {
            tracing::warn!(error = %e, "Stored guild settings cannot be decoded");
            None
        }
    }
}

/// Stored object with the record's fields replaced and other keys kept.
fn merge_record(
    stored: Option<Value>,
    record: &GuildSettingsRecord,
) -> Result<Value, serde_json::Error> {
    let mut merged = match stored {
        Some(Value::Object(fields)) => fields,
        _ => Map::new(),
    };
    merged.retain(|name, _| !is_record_field(name));
    if let Value::Object(fields) = serde_json::to_value(record)? {
        merged.extend(fields);
    }
    Ok(Value::Object(merged))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_field_names_decode() {
        let record: GuildSettingsRecord = serde_json::from_value(serde_json::json!({
            "daily_animal_enabled": true,
            "daily_animal_channel": 987654321,
            "daily_animal_hour": 7,
            "daily_animal_minute": 30,
            "daily_animal_time": "07:30",
            "last_daily_animal": "2024-05-01",
            "animal_types": ["cat"],
            "prefix": "?"
        }))
        .unwrap();

        assert!(record.daily_enabled);
        assert_eq!(record.channel_id.as_deref(), Some("987654321"));
        assert_eq!((record.hour, record.minute), (7, 30));
        assert_eq!(record.last_sent_date.as_deref(), Some("2024-05-01"));
    }

    #[test]
    fn bad_field_does_not_hide_the_rest() {
        let record = decode_record(serde_json::json!({
            "hour": 300,
            "channel_id": "42",
            "daily_animal_channel": "7",
            "created_at": "2024-01-01T00:00:00+00:00"
        }))
        .unwrap();

        assert_eq!(record.hour, 8);
        assert_eq!(record.channel_id.as_deref(), Some("42"));
        assert!(record.created_at.is_some());
    }

    #[test]
    fn merge_keeps_unknown_keys_and_drops_old_names() {
        let stored = serde_json::json!({"daily_animal_hour": 7, "note": "keep me"});
        let merged = merge_record(Some(stored), &GuildSettingsRecord::default()).unwrap();

        assert_eq!(merged["note"], "keep me");
        assert_eq!(merged["hour"], 8);
        assert!(merged.get("daily_animal_hour").is_none());
    }

    #[test]
    fn set_time_keeps_display_in_step() {
        let mut record = GuildSettingsRecord::default();
        record.set_time(9, 5);
        assert_eq!(record.daily_time, "09:05");
    }
}
