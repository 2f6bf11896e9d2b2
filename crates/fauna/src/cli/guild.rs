//! Guild settings command handlers.

use super::animals::print_post;
use super::{AnimalsCommands, App, GuildCommands, OutputFormat, print_json};
use fauna::{FaunaResult, GuildSettingsRecord, JsonError, LogPublisher};
use serde_json::json;

/// Handle one guild settings command.
pub async fn handle_guild_command(
    app: &App,
    guild: &str,
    cmd: GuildCommands,
    format: OutputFormat,
) -> FaunaResult<()> {
    let daily = app.daily_commands();

    match cmd {
        GuildCommands::Show => print_settings(guild, &daily.show(guild).await, format),
        GuildCommands::Enable => print_settings(guild, &daily.enable(guild).await?, format),
        GuildCommands::Disable => print_settings(guild, &daily.disable(guild).await, format),
        GuildCommands::Channel { id } => {
            print_settings(guild, &daily.set_channel(guild, &id).await, format)
        }
        GuildCommands::Time { time } => {
            print_settings(guild, &daily.set_time(guild, &time).await?, format)
        }
        GuildCommands::Animals { command } => {
            let animals = match command.unwrap_or(AnimalsCommands::List) {
                AnimalsCommands::List => daily.list_animals(guild).await,
                AnimalsCommands::Set { animals } => {
                    daily.set_animals(guild, animals.as_slice()).await?
                }
                AnimalsCommands::Clear => daily.clear_animals(guild).await.animal_types,
            };
            print_animals(&animals, format)
        }
        GuildCommands::Test => {
            let post = daily.test(guild, &LogPublisher).await?;
            print_post(&post, format)
        }
    }
}

fn print_settings(
    guild: &str,
    record: &GuildSettingsRecord,
    format: OutputFormat,
) -> FaunaResult<()> {
    match format {
        OutputFormat::Json => {
            let value = serde_json::to_value(record)
                .map_err(|e| JsonError::new("guild settings", e.to_string()))?;
            print_json(&json!({ "guild": guild, "settings": value }))
        }
        OutputFormat::Human => {
            println!("Daily animal settings for guild {}", guild);
            println!("{:-<40}", "");
            println!(
                "Status:  {}",
                if record.daily_enabled { "enabled" } else { "disabled" }
            );
            println!(
                "Channel: {}",
                record.channel_id.as_deref().unwrap_or("not set")
            );
            println!("Time:    {}", record.daily_time);
            println!("Animals: {}", describe_animals(&record.animal_types));
            println!(
                "Last:    {}",
                record.last_sent_date.as_deref().unwrap_or("never")
            );
            Ok(())
        }
    }
}

fn print_animals(animals: &[String], format: OutputFormat) -> FaunaResult<()> {
    match format {
        OutputFormat::Json => print_json(&json!({ "animals": animals })),
        OutputFormat::Human => {
            println!("{}", describe_animals(animals));
            Ok(())
        }
    }
}

fn describe_animals(animals: &[String]) -> String {
    if animals.is_empty() {
        "all animals".to_string()
    } else {
        animals.join(", ")
    }
}
