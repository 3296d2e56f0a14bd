//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `analyze` - Run the analysis engine and render the report
//! - `policy` - Inspect the active analysis policy
//! - `serve` - Web server command

pub mod analyze;
pub mod policy;
pub mod serve;

// Re-export command functions for main.rs
pub use analyze::*;
pub use policy::*;
pub use serve::*;

use std::path::Path;

use anyhow::{Context, Result};
use dhanmitra_core::{AnalysisEngine, AnalysisPolicy};
use tracing::debug;

/// Load the policy once and build the engine shared by a command
pub fn load_engine(policy_path: Option<&Path>) -> Result<AnalysisEngine> {
    let policy = AnalysisPolicy::load(policy_path).context("Failed to load analysis policy")?;
    debug!(
        emergency_fund_months = ?(policy.emergency_fund.min_months, policy.emergency_fund.max_months),
        horizon_months = policy.emergency_fund.horizon_months,
        "Loaded analysis policy"
    );
    AnalysisEngine::new(policy).context("Invalid analysis policy")
}
