//! CLI command definitions.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Fauna - animal images with cache, retry and static fallback
#[derive(Parser, Debug)]
#[command(name = "fauna")]
#[command(about = "Animal images with cache, retry and static fallback, plus daily posts", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file layered over the bundled defaults
    #[arg(long, global = true, env = "FAUNA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding the collection files
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve an image for one animal category
    Fetch {
        /// Animal category, e.g. "cat" or "owl"
        category: String,

        /// User the request is counted for
        #[arg(long, default_value = "cli")]
        user: String,

        /// API key overriding the configured one
        #[arg(long)]
        key: Option<String>,
    },

    /// Resolve an image for a random API-backed animal
    Random {
        /// User the request is counted for
        #[arg(long, default_value = "cli")]
        user: String,
    },

    /// Pick from the static pool without any network call
    Fallback {
        /// Animal category
        category: String,
    },

    /// Daily post settings for one guild
    Guild {
        /// Guild id
        id: String,

        /// Settings command
        #[command(subcommand)]
        command: GuildCommands,
    },

    /// Show a user's command and animal counters
    Stats {
        /// User id
        user: String,
    },

    /// Run the daily scheduler
    Daily {
        /// Guilds to check; every stored guild when omitted
        #[arg(long = "guild")]
        guilds: Vec<String>,

        /// Check once and exit instead of looping
        #[arg(long)]
        once: bool,
    },
}

/// Guild settings subcommands
#[derive(Subcommand, Debug)]
pub enum GuildCommands {
    /// Show the current settings
    Show,

    /// Turn the daily post on
    Enable,

    /// Turn the daily post off
    Disable,

    /// Choose the daily post channel
    Channel {
        /// Channel id
        id: String,
    },

    /// Set the send time
    Time {
        /// 24-hour time, e.g. 09:30
        time: String,
    },

    /// Manage the animal selection
    Animals {
        /// Selection command; lists when omitted
        #[command(subcommand)]
        command: Option<AnimalsCommands>,
    },

    /// Send a daily post now
    Test,
}

/// Animal selection subcommands
#[derive(Subcommand, Debug)]
pub enum AnimalsCommands {
    /// List the selection
    List,

    /// Replace the selection
    Set {
        /// Animal names
        #[arg(required = true)]
        animals: Vec<String>,
    },

    /// Pick from every animal again
    Clear,
}

/// Output format options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable format
    Human,
    /// JSON format
    Json,
}
