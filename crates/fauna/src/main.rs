//! Fauna CLI binary.
//!
//! This binary provides command-line access to Fauna's functionality:
//! - Resolve animal images through the cache, live APIs and static pools
//! - Manage per-guild daily post settings and user stats
//! - Run the daily scheduler

use clap::Parser;
use fauna::observability::{ObservabilityConfig, init_observability_with_config};

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{
        App, Cli, Commands, handle_fallback, handle_fetch, handle_guild_command, handle_random,
        handle_stats, run_daily,
    };

    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    init_observability_with_config(
        ObservabilityConfig::default()
            .with_log_level(log_level)
            .with_json_logs(cli.json_logs),
    )?;

    let app = App::load(&cli)?;
    let format = cli.format;

    match cli.command {
        Commands::Fetch {
            category,
            user,
            key,
        } => {
            handle_fetch(&app, &category, &user, key.as_deref(), format).await?;
        }

        Commands::Random { user } => {
            handle_random(&app, &user, format).await?;
        }

        Commands::Fallback { category } => {
            handle_fallback(&app, &category, format)?;
        }

        Commands::Guild { id, command } => {
            handle_guild_command(&app, &id, command, format).await?;
        }

        Commands::Stats { user } => {
            handle_stats(&app, &user, format).await?;
        }

        Commands::Daily { guilds, once } => {
            run_daily(&app, guilds, once).await?;
        }
    }

    Ok(())
}
