//! Policy command implementation

use std::path::Path;

use anyhow::{Context, Result};
use dhanmitra_core::policy::{default_policy_path, resolve_policy_path};

use super::load_engine;

pub fn cmd_policy(policy_path: Option<&Path>, path_only: bool) -> Result<()> {
    let resolved = resolve_policy_path(policy_path)?;

    if path_only {
        match resolved {
            Some(path) => println!("{}", path.display()),
            None => {
                println!("(built-in policy)");
                if let Some(default_path) = default_policy_path() {
                    println!("Override by creating {}", default_path.display());
                }
            }
        }
        return Ok(());
    }

    let engine = load_engine(policy_path)?;
    let json = serde_json::to_string_pretty(engine.policy())
        .context("Failed to serialize policy")?;
    println!("{}", json);

    Ok(())
}
