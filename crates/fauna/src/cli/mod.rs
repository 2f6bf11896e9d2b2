//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the fauna binary.

mod animals;
mod commands;
mod context;
mod daily;
mod guild;

pub use animals::{handle_fallback, handle_fetch, handle_random, handle_stats};
pub use commands::{AnimalsCommands, Cli, Commands, GuildCommands, OutputFormat};
pub use context::App;
pub use daily::run_daily;
pub use guild::handle_guild_command;

use fauna::{FaunaResult, JsonError};
use serde_json::Value;

/// Print `value` as pretty JSON on stdout.
fn print_json(value: &Value) -> FaunaResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| JsonError::new("command output", e.to_string()))?;
    println!("{}", json);
    Ok(())
}
