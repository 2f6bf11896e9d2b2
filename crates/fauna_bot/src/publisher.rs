//! Delivery seam between the scheduler and a chat platform.

use async_trait::async_trait;
use fauna_core::AnimalPost;
use fauna_error::FaunaResult;
use std::sync::Arc;
use tracing::info;

/// Sends a finished post to a guild channel.
///
/// Adapters report delivery failures as
/// [`CommandErrorKind::Publish`](fauna_error::CommandErrorKind::Publish).
#[async_trait]
pub trait DailyPublisher: Send + Sync {
    /// Deliver `post` to `channel` in `guild`.
    async fn publish(&self, guild: &str, channel: &str, post: &AnimalPost) -> FaunaResult<()>;
}

#[async_trait]
impl<P: DailyPublisher + ?Sized> DailyPublisher for Arc<P> {
    async fn publish(&self, guild: &str, channel: &str, post: &AnimalPost) -> FaunaResult<()> {
        (**self).publish(guild, channel, post).await
    }
}

/// Publisher that writes posts to the log instead of a chat platform.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogPublisher;

#[async_trait]
impl DailyPublisher for LogPublisher {
    async fn publish(&self, guild: &str, channel: &str, post: &AnimalPost) -> FaunaResult<()> {
        info!(
            guild,
            channel,
            title = %post.title(),
            image_url = %post.image_url(),
            fact = %post.fact(),
            footer = %post.footer(),
            "Published post"
        );
        Ok(())
    }
}
