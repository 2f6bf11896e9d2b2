//! On-demand animal image commands.

use fauna_core::{Animal, AnimalPost, random_fact};
use fauna_resolver::{ImageTransport, ReqwestTransport, Resolver};
use fauna_storage::UserStats;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Command name recorded for the random-animal command.
const RANDOM_COMMAND: &str = "animal";

/// Image commands shared by every chat adapter.
///
/// Each successful command bumps the caller's command counter and their view
/// count for the animal shown.
#[derive(Debug)]
pub struct AnimalCommands<T = ReqwestTransport> {
    resolver: Arc<Resolver<T>>,
    stats: UserStats,
}

impl<T> Clone for AnimalCommands<T> {
    fn clone(&self) -> Self {
        Self {
            resolver: Arc::clone(&self.resolver),
            stats: self.stats.clone(),
        }
    }
}

impl<T: ImageTransport> AnimalCommands<T> {
    /// Creates the command set.
    pub fn new(resolver: Arc<Resolver<T>>, stats: UserStats) -> Self {
        Self { resolver, stats }
    }

    /// The shared resolver.
    pub fn resolver(&self) -> &Arc<Resolver<T>> {
        &self.resolver
    }

    /// The stats wrapper.
    pub fn stats(&self) -> &UserStats {
        &self.stats
    }

    /// Image post for `category`, on behalf of `user`.
    ///
    /// Unknown categories still produce a post, with the default image and
    /// fact.
    #[instrument(skip(self))]
    pub async fn fetch(&self, user: &str, category: &str) -> AnimalPost {
        self.fetch_with(user, category, None).await
    }

    /// Like [`fetch`](Self::fetch), with a caller-supplied API key.
    #[instrument(skip(self, credentials))]
    pub async fn fetch_with(
        &self,
        user: &str,
        category: &str,
        credentials: Option<&str>,
    ) -> AnimalPost {
        let animal = category.trim().to_lowercase();
        let post = build_post(&self.resolver, &animal, credentials).await;
        self.record(user, &animal, &animal).await;
        post
    }

    /// Image post for a random API-backed animal.
    #[instrument(skip(self))]
    pub async fn random(&self, user: &str) -> AnimalPost {
        let animal = self.resolver.random_api_category();
        debug!(animal = %animal, "Picked random animal");
        let post = build_post(&self.resolver, animal.as_str(), None).await;
        self.record(user, RANDOM_COMMAND, animal.as_str()).await;
        post
    }

    async fn record(&self, user: &str, command: &str, animal: &str) {
        self.stats.increment_command(user, command).await;
        self.stats.add_favorite_animal(user, animal).await;
    }
}

async fn build_post<T: ImageTransport>(
    resolver: &Resolver<T>,
    animal: &str,
    credentials: Option<&str>,
) -> AnimalPost {
    let image_url = resolver.resolve(animal, credentials).await;
    AnimalPost::new(
        animal,
        format!("🐾 {}", display_name(animal)),
        image_url,
        random_fact(animal),
    )
}

/// Capitalized name for titles, for known and unknown categories alike.
pub(crate) fn display_name(category: &str) -> String {
    match Animal::from_category(category) {
        Some(animal) => animal.title(),
        None => {
            let mut chars = category.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_capitalizes() {
        assert_eq!(display_name("owl"), "Owl");
        assert_eq!(display_name("unicorn"), "Unicorn");
        assert_eq!(display_name(""), "");
    }
}
