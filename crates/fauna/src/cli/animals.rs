//! Image and stats command handlers.

use super::{App, OutputFormat, print_json};
use fauna::{AnimalPost, FaunaResult, JsonError};
use serde_json::json;

/// Resolve one category for `user`.
pub async fn handle_fetch(
    app: &App,
    category: &str,
    user: &str,
    key: Option<&str>,
    format: OutputFormat,
) -> FaunaResult<()> {
    let post = app
        .animal_commands()
        .fetch_with(user, category, key)
        .await;
    print_post(&post, format)
}

/// Resolve a random API-backed animal for `user`.
pub async fn handle_random(app: &App, user: &str, format: OutputFormat) -> FaunaResult<()> {
    let post = app.animal_commands().random(user).await;
    print_post(&post, format)
}

/// Pick from the static pool.
pub fn handle_fallback(app: &App, category: &str, format: OutputFormat) -> FaunaResult<()> {
    let url = app.resolver().static_fallback(category);
    match format {
        OutputFormat::Json => print_json(&json!({ "category": category, "image_url": url })),
        OutputFormat::Human => {
            println!("{}", url);
            Ok(())
        }
    }
}

/// Show a user's counters.
pub async fn handle_stats(app: &App, user: &str, format: OutputFormat) -> FaunaResult<()> {
    let stats = app.stats();
    let record = stats.stats(user).await;
    let favorite = stats.favorite_animal(user).await;

    match format {
        OutputFormat::Json => {
            let mut value = serde_json::to_value(&record)
                .map_err(|e| JsonError::new("user stats", e.to_string()))?;
            value["user"] = json!(user);
            value["total_commands"] = json!(record.total_commands());
            value["favorite_animal"] = json!(favorite);
            print_json(&value)
        }
        OutputFormat::Human => {
            println!("User {}", user);
            println!("{:-<40}", "");
            println!("Total commands: {}", record.total_commands());
            println!("Favorite animal: {}", favorite);
            for (command, count) in &record.commands {
                println!("  {:<16} {}", command, count);
            }
            Ok(())
        }
    }
}

pub(super) fn print_post(post: &AnimalPost, format: OutputFormat) -> FaunaResult<()> {
    match format {
        OutputFormat::Json => {
            let value = serde_json::to_value(post)
                .map_err(|e| JsonError::new("animal post", e.to_string()))?;
            print_json(&value)
        }
        OutputFormat::Human => {
            println!("{}", post.title());
            println!("{}", post.image_url());
            println!("📚 Fun Fact: {}", post.fact());
            println!("{}", post.footer());
            Ok(())
        }
    }
}
