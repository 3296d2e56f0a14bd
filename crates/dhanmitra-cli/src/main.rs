//! DhanMitra CLI - Household finance advisor
//!
//! Usage:
//!   dhanmitra analyze --income 50000 --expenses 30000 --savings 100000 --age 25 --risk medium
//!   dhanmitra analyze --file profile.json --json
//!   dhanmitra serve --port 8000
//!   dhanmitra policy

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Analyze {
            profile,
            file,
            json,
        } => {
            let engine = commands::load_engine(cli.policy.as_deref())?;
            commands::cmd_analyze(&engine, file.as_deref(), &profile, json)
        }
        Commands::Serve {
            port,
            host,
            static_dir,
            allowed_origins,
        } => {
            let engine = commands::load_engine(cli.policy.as_deref())?;
            commands::cmd_serve(
                engine,
                &host,
                port,
                static_dir.as_deref(),
                allowed_origins,
            )
            .await
        }
        Commands::Policy { path } => commands::cmd_policy(cli.policy.as_deref(), path),
    }
}
