//! tagbot binary.

use clap::Parser;
use tagbot::{BotConfig, FileConfig, LoggingConfig, command_registry, describe, init_logging, run};

mod cli;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config } => {
            let file = match config {
                Some(path) => FileConfig::from_file(path)?,
                None => FileConfig::default(),
            };
            let logging = file.logging().clone().with_json(*file.logging().json() || cli.json_logs);
            init_logging(&logging, cli.verbose)?;

            let config = BotConfig::from_env()?.with_file(file);
            tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting tagbot");
            run(config).await?;
        }

        Commands::Commands => {
            let logging = LoggingConfig::default().with_json(cli.json_logs);
            init_logging(&logging, cli.verbose)?;

            for descriptor in command_registry()?.iter() {
                println!("{}", describe(descriptor));
            }
        }
    }

    Ok(())
}
