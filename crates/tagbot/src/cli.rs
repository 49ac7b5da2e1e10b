//! Command-line interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Discord support-tag bot.
#[derive(Debug, Parser)]
#[command(name = "tagbot", version, about)]
pub struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit JSON log lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Connect to Discord and serve interactions
    Run {
        /// TOML file with session, listener, logging and seed settings
        #[arg(short, long, env = "TAGBOT_CONFIG")]
        config: Option<PathBuf>,
    },

    /// Print the registered commands and their requirements
    Commands,
}
