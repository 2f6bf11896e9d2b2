//! Test utilities for command and scheduler tests.
//!
//! Provides a fixed-response [`ImageTransport`] and publishers that record
//! or reject posts, so the bot layer runs without network or chat access.

#![allow(dead_code)]

use async_trait::async_trait;
use fauna_core::AnimalPost;
use fauna_error::{CommandError, CommandErrorKind, FaunaResult, TransportError};
use fauna_bot::DailyPublisher;
use fauna_rate_limit::FaunaConfig;
use fauna_resolver::{FetchRequest, ImageTransport, Resolver, TransportResponse};
use fauna_storage::{GuildSettings, JsonStore, UserStats};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Image every live fetch returns.
pub const CAT_URL: &str = "https://cdn.example.test/cat.png";

/// Transport answering every request with a cat-style body.
#[derive(Debug, Clone, Default)]
pub struct CatTransport {
    calls: Arc<AtomicUsize>,
}

impl CatTransport {
    /// Number of requests made so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageTransport for CatTransport {
    async fn get(&self, _request: &FetchRequest) -> Result<TransportResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(TransportResponse::ok(format!(r#"[{{"url":"{CAT_URL}"}}]"#)))
    }
}

/// Resolver over a [`CatTransport`] with a single attempt per fetch.
pub fn resolver(transport: &CatTransport) -> Arc<Resolver<CatTransport>> {
    let mut config = FaunaConfig::default();
    config.resolver.retry_count = 1;
    config.resolver.wildlife_enabled = false;
    Arc::new(Resolver::with_transport(transport.clone(), &config))
}

/// A store in a fresh temporary directory.
pub struct Fixture {
    pub dir: TempDir,
    pub store: JsonStore,
}

impl Fixture {
    pub fn new() -> anyhow::Result<Self> {
        let dir = TempDir::new()?;
        let store = JsonStore::new(dir.path())?;
        Ok(Self { dir, store })
    }

    pub fn guilds(&self) -> GuildSettings {
        GuildSettings::new(self.store.clone())
    }

    pub fn stats(&self) -> UserStats {
        UserStats::new(self.store.clone())
    }
}

/// One delivered post.
#[derive(Debug, Clone)]
pub struct Delivery {
    pub guild: String,
    pub channel: String,
    pub post: AnimalPost,
}

/// Publisher that keeps every post it is given.
///
/// Guilds listed in `reject` fail with a publish error instead.
#[derive(Debug, Clone, Default)]
pub struct RecordingPublisher {
    deliveries: Arc<Mutex<Vec<Delivery>>>,
    reject: Vec<String>,
}

impl RecordingPublisher {
    /// Fail every publish to `guild`.
    pub fn rejecting(guild: &str) -> Self {
        Self {
            reject: vec![guild.to_string()],
            ..Self::default()
        }
    }

    /// Everything published so far.
    pub fn deliveries(&self) -> Vec<Delivery> {
        self.deliveries.lock().unwrap().clone()
    }
}

#[async_trait]
impl DailyPublisher for RecordingPublisher {
    async fn publish(&self, guild: &str, channel: &str, post: &AnimalPost) -> FaunaResult<()> {
        if self.reject.iter().any(|g| g == guild) {
            return Err(CommandError::new(CommandErrorKind::Publish("channel gone".into())).into());
        }
        self.deliveries.lock().unwrap().push(Delivery {
            guild: guild.to_string(),
            channel: channel.to_string(),
            post: post.clone(),
        });
        Ok(())
    }
}
