//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// DhanMitra - Smarter money decisions for your household
#[derive(Parser)]
#[command(name = "dhanmitra")]
#[command(about = "Budget health, emergency fund and investment planning", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Analysis policy file
    ///
    /// Defaults to ~/.local/share/dhanmitra/config/policy.toml when present,
    /// otherwise the built-in policy is used.
    #[arg(long, global = true, env = "DHANMITRA_POLICY")]
    pub policy: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a financial profile
    Analyze {
        #[command(flatten)]
        profile: ProfileArgs,

        /// JSON file with the profile (flags override its fields)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Print the raw JSON report instead of the formatted summary
        #[arg(long)]
        json: bool,
    },

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Directory containing the web UI build to serve
        #[arg(long)]
        static_dir: Option<PathBuf>,

        /// Allowed CORS origin, repeatable ("*" allows any origin)
        #[arg(
            long = "allow-origin",
            env = "DHANMITRA_ALLOWED_ORIGINS",
            value_delimiter = ','
        )]
        allowed_origins: Vec<String>,
    },

    /// Show the active analysis policy
    Policy {
        /// Only print which policy file is in use
        #[arg(long)]
        path: bool,
    },
}

/// Profile fields accepted as flags
#[derive(Args, Debug, Default, Clone)]
pub struct ProfileArgs {
    /// Monthly gross income
    #[arg(long, allow_negative_numbers = true)]
    pub income: Option<f64>,

    /// Monthly committed expenses
    #[arg(long, allow_negative_numbers = true)]
    pub expenses: Option<f64>,

    /// Current liquid savings balance
    #[arg(long, allow_negative_numbers = true)]
    pub savings: Option<f64>,

    /// Age in years (18-100)
    #[arg(long, allow_negative_numbers = true)]
    pub age: Option<i64>,

    /// Risk appetite: low, medium, high
    #[arg(long = "risk", visible_alias = "risk-appetite")]
    pub risk_appetite: Option<String>,
}
