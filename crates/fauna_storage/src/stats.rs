//! Per-user command and animal counters.

use crate::JsonStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;

/// Collection holding one stats record per user.
pub const USER_STATS: &str = "user_stats";

/// Returned by [`UserStats::favorite_animal`] for users with no views.
pub const NO_FAVORITE: &str = "none";

/// Counters stored for one user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserStatsRecord {
    /// Invocations per command name
    pub commands: BTreeMap<String, u64>,
    /// Views per animal category
    pub favorite_animals: BTreeMap<String, u64>,
}

impl UserStatsRecord {
    /// Sum of all command counters.
    pub fn total_commands(&self) -> u64 {
        self.commands.values().sum()
    }

    /// Most viewed animal. Ties go to the alphabetically first name.
    ///
    /// # Examples
    ///
    /// ```
    /// use fauna_storage::UserStatsRecord;
    ///
    /// let mut record = UserStatsRecord::default();
    /// assert_eq!(record.favorite_animal(), None);
    ///
    /// record.favorite_animals.insert("owl".into(), 3);
    /// record.favorite_animals.insert("fox".into(), 3);
    /// assert_eq!(record.favorite_animal(), Some("fox"));
    /// ```
    pub fn favorite_animal(&self) -> Option<&str> {
        self.favorite_animals
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(name, _)| name.as_str())
    }
}

/// Typed access to the `user_stats` collection.
#[derive(Debug, Clone)]
pub struct UserStats {
    store: JsonStore,
}

impl UserStats {
    /// Wrap a store.
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }

    /// Counters for `user`; empty when the user has never been seen.
    pub async fn stats(&self, user: impl Display) -> UserStatsRecord {
        self.store.get_or(USER_STATS, user, UserStatsRecord::default()).await
    }

    /// Count one use of `command`. Returns the new count.
    #[tracing::instrument(skip(self, user), fields(user = %user))]
    pub async fn increment_command(&self, user: impl Display, command: &str) -> u64 {
        let key = user.to_string();
        let mut record = self.stats(&key).await;
        let count = record.commands.entry(command.to_string()).or_insert(0);
        *count += 1;
        let count = *count;
        self.store.set(USER_STATS, &key, &record).await;
        count
    }

    /// Count one view of `animal`. Returns the new count.
    #[tracing::instrument(skip(self, user), fields(user = %user))]
    pub async fn add_favorite_animal(&self, user: impl Display, animal: &str) -> u64 {
        let key = user.to_string();
        let mut record = self.stats(&key).await;
        let count = record
            .favorite_animals
            .entry(animal.to_string())
            .or_insert(0);
        *count += 1;
        let count = *count;
        self.store.set(USER_STATS, &key, &record).await;
        count
    }

    /// Most viewed animal, or [`NO_FAVORITE`] when there are no views.
    pub async fn favorite_animal(&self, user: impl Display) -> String {
        self.stats(user)
            .await
            .favorite_animal()
            .unwrap_or(NO_FAVORITE)
            .to_string()
    }

    /// Total commands run by `user`.
    pub async fn total_commands(&self, user: impl Display) -> u64 {
        self.stats(user).await.total_commands()
    }
}
