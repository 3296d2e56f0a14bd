//! Analysis policy: thresholds, fund sizing and risk-tier tables
//!
//! Every tunable number the engine uses lives here, loaded once into an
//! immutable [`AnalysisPolicy`] and passed explicitly to each calculator.
//!
//! ## Configuration Resolution
//!
//! Policy is loaded with a layered resolution:
//! 1. An explicit path (`--policy` / `DHANMITRA_POLICY`), which must exist
//! 2. Override in data dir (~/.local/share/dhanmitra/config/policy.toml)
//! 3. Embedded defaults (compiled into binary)
//!
//! Keys missing from a file fall back to [`AnalysisPolicy::default`].

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::RiskAppetite;

/// Embedded default policy (compiled into binary)
pub const DEFAULT_POLICY: &str = include_str!("../../../config/policy.toml");

/// Savings-ratio band boundaries, in percent. Lower bounds are inclusive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetPolicy {
    /// Ratio at which "Needs Improvement" becomes "Good"
    pub good_from: f64,
    /// Ratio inside the "Good" band from which the color turns green
    pub green_from: f64,
    /// Ratio at which "Good" becomes "Excellent"
    pub excellent_from: f64,
}

impl Default for BudgetPolicy {
    fn default() -> Self {
        Self {
            good_from: 10.0,
            green_from: 20.0,
            excellent_from: 30.0,
        }
    }
}

/// Emergency fund sizing, in months of expenses
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmergencyFundPolicy {
    pub min_months: f64,
    pub max_months: f64,
    /// Age from which the upper end of the range is widened
    pub senior_age: u32,
    pub senior_extra_months: f64,
    /// Months over which a shortfall is spread
    pub horizon_months: u32,
}

impl Default for EmergencyFundPolicy {
    fn default() -> Self {
        Self {
            min_months: 6.0,
            max_months: 9.0,
            senior_age: 45,
            senior_extra_months: 3.0,
            horizon_months: 12,
        }
    }
}

/// Bounds on the age-derived equity weight
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationPolicy {
    pub min_equity: u32,
    pub max_equity: u32,
}

impl Default for AllocationPolicy {
    fn default() -> Self {
        Self {
            min_equity: 10,
            max_equity: 90,
        }
    }
}

/// Policy for a single risk tier
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierPolicy {
    /// Profile name shown to the user (e.g. "Balanced")
    pub profile: String,
    /// Scales the age-derived equity weight
    pub equity_multiplier: f64,
    /// Share of the non-equity weight that goes to debt; the rest is gold/cash
    pub debt_share: f64,
    pub description: String,
    pub equity_instruments: String,
    pub debt_instruments: String,
    pub gold_instruments: String,
}

/// Tier policies keyed by risk appetite
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierTable {
    pub low: TierPolicy,
    pub medium: TierPolicy,
    pub high: TierPolicy,
}

impl TierTable {
    pub fn get(&self, risk: RiskAppetite) -> &TierPolicy {
        match risk {
            RiskAppetite::Low => &self.low,
            RiskAppetite::Medium => &self.medium,
            RiskAppetite::High => &self.high,
        }
    }

    fn get_mut(&mut self, risk: RiskAppetite) -> &mut TierPolicy {
        match risk {
            RiskAppetite::Low => &mut self.low,
            RiskAppetite::Medium => &mut self.medium,
            RiskAppetite::High => &mut self.high,
        }
    }
}

impl Default for TierTable {
    fn default() -> Self {
        Self {
            low: TierPolicy {
                profile: "Conservative".to_string(),
                equity_multiplier: 0.5,
                debt_share: 0.8,
                description: "Priority: capital protection. Most of the surplus sits in safe instruments with a small equity slice for mild growth.".to_string(),
                equity_instruments: "Large Cap Index Fund".to_string(),
                debt_instruments: "Fixed Deposits (FD), PPF, Liquid Funds".to_string(),
                gold_instruments: "Sovereign Gold Bonds, Savings Account Buffer".to_string(),
            },
            medium: TierPolicy {
                profile: "Balanced".to_string(),
                equity_multiplier: 0.8,
                debt_share: 0.75,
                description: "Priority: growth with stability. Equity and debt share the surplus, with a small hedge in gold.".to_string(),
                equity_instruments: "Nifty 50 Index Fund, Flexi-Cap Fund".to_string(),
                debt_instruments: "Corporate Bond Funds, PPF, Debt Mutual Funds".to_string(),
                gold_instruments: "Gold ETF, Sovereign Gold Bonds".to_string(),
            },
            high: TierPolicy {
                profile: "Aggressive".to_string(),
                equity_multiplier: 1.1,
                debt_share: 0.6,
                description: "Priority: long-term wealth. Equity dominates, with debt and gold kept for stability and buying dips.".to_string(),
                equity_instruments: "Mid & Small Cap Funds, Direct Equity, Nifty Next 50".to_string(),
                debt_instruments: "Short Duration Debt Funds, Liquid Funds (for dips)".to_string(),
                gold_instruments: "Gold ETF, Arbitrage Funds".to_string(),
            },
        }
    }
}

/// Complete, validated analysis policy
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnalysisPolicy {
    pub budget: BudgetPolicy,
    pub emergency_fund: EmergencyFundPolicy,
    pub allocation: AllocationPolicy,
    pub tiers: TierTable,
}

impl AnalysisPolicy {
    /// Load policy using the layered resolution described in the module docs
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        match resolve_policy_path(explicit_path)? {
            Some(path) => {
                debug!(path = %path.display(), "Loading policy override");
                Self::from_file(&path)
            }
            None => Self::from_toml(DEFAULT_POLICY),
        }
    }

    /// Load policy from a specific TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse policy from TOML content, layering it over the defaults
    pub fn from_toml(content: &str) -> Result<Self> {
        let raw: RawPolicy = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid policy TOML: {}", e)))?;

        let mut policy = Self::default();
        raw.apply(&mut policy);
        policy.validate()?;
        Ok(policy)
    }

    /// Check that thresholds are ordered and weights are usable
    pub fn validate(&self) -> Result<()> {
        let b = &self.budget;
        if !(0.0 <= b.good_from && b.good_from < b.excellent_from) {
            return Err(Error::Config(format!(
                "budget.good_from ({}) must be >= 0 and below budget.excellent_from ({})",
                b.good_from, b.excellent_from
            )));
        }
        if !(b.good_from <= b.green_from && b.green_from <= b.excellent_from) {
            return Err(Error::Config(format!(
                "budget.green_from ({}) must lie between good_from and excellent_from",
                b.green_from
            )));
        }

        let ef = &self.emergency_fund;
        if !(ef.min_months > 0.0 && ef.max_months >= ef.min_months) {
            return Err(Error::Config(format!(
                "emergency_fund months must satisfy 0 < min_months ({}) <= max_months ({})",
                ef.min_months, ef.max_months
            )));
        }
        if !(ef.senior_extra_months >= 0.0) {
            return Err(Error::Config(
                "emergency_fund.senior_extra_months must not be negative".to_string(),
            ));
        }
        if ef.horizon_months == 0 {
            return Err(Error::Config(
                "emergency_fund.horizon_months must be at least 1".to_string(),
            ));
        }

        let a = &self.allocation;
        if a.min_equity == 0 || a.min_equity > a.max_equity || a.max_equity > 100 {
            return Err(Error::Config(format!(
                "allocation equity bounds must satisfy 1 <= min_equity ({}) <= max_equity ({}) <= 100",
                a.min_equity, a.max_equity
            )));
        }

        for risk in RiskAppetite::all() {
            let tier = self.tiers.get(*risk);
            if !(tier.equity_multiplier.is_finite() && tier.equity_multiplier > 0.0) {
                return Err(Error::Config(format!(
                    "tiers.{}.equity_multiplier must be a positive number",
                    risk.config_key()
                )));
            }
            if !(0.0..=1.0).contains(&tier.debt_share) {
                return Err(Error::Config(format!(
                    "tiers.{}.debt_share must be between 0 and 1",
                    risk.config_key()
                )));
            }
        }

        Ok(())
    }
}

/// Default policy override path
pub fn default_policy_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("dhanmitra").join("config").join("policy.toml"))
}

/// Work out which policy file would be loaded, `None` meaning the embedded default
pub fn resolve_policy_path(explicit_path: Option<&Path>) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit_path {
        if !path.exists() {
            return Err(Error::Config(format!(
                "Policy file not found: {}",
                path.display()
            )));
        }
        return Ok(Some(path.to_path_buf()));
    }

    Ok(default_policy_path().filter(|p| p.exists()))
}

/// Raw policy structure for TOML parsing
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawPolicy {
    budget: Option<RawBudget>,
    emergency_fund: Option<RawEmergencyFund>,
    allocation: Option<RawAllocation>,
    tiers: Option<RawTiers>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawBudget {
    good_from: Option<f64>,
    green_from: Option<f64>,
    excellent_from: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawEmergencyFund {
    min_months: Option<f64>,
    max_months: Option<f64>,
    senior_age: Option<u32>,
    senior_extra_months: Option<f64>,
    horizon_months: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawAllocation {
    min_equity: Option<u32>,
    max_equity: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTiers {
    low: Option<RawTier>,
    medium: Option<RawTier>,
    high: Option<RawTier>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTier {
    profile: Option<String>,
    equity_multiplier: Option<f64>,
    debt_share: Option<f64>,
    description: Option<String>,
    equity_instruments: Option<String>,
    debt_instruments: Option<String>,
    gold_instruments: Option<String>,
}

impl RawPolicy {
    fn apply(self, policy: &mut AnalysisPolicy) {
        if let Some(budget) = self.budget {
            if let Some(v) = budget.good_from {
                policy.budget.good_from = v;
            }
            if let Some(v) = budget.green_from {
                policy.budget.green_from = v;
            }
            if let Some(v) = budget.excellent_from {
                policy.budget.excellent_from = v;
            }
        }

        if let Some(ef) = self.emergency_fund {
            if let Some(v) = ef.min_months {
                policy.emergency_fund.min_months = v;
            }
            if let Some(v) = ef.max_months {
                policy.emergency_fund.max_months = v;
            }
            if let Some(v) = ef.senior_age {
                policy.emergency_fund.senior_age = v;
            }
            if let Some(v) = ef.senior_extra_months {
                policy.emergency_fund.senior_extra_months = v;
            }
            if let Some(v) = ef.horizon_months {
                policy.emergency_fund.horizon_months = v;
            }
        }

        if let Some(alloc) = self.allocation {
            if let Some(v) = alloc.min_equity {
                policy.allocation.min_equity = v;
            }
            if let Some(v) = alloc.max_equity {
                policy.allocation.max_equity = v;
            }
        }

        if let Some(tiers) = self.tiers {
            let entries = [
                (RiskAppetite::Low, tiers.low),
                (RiskAppetite::Medium, tiers.medium),
                (RiskAppetite::High, tiers.high),
            ];
            for (risk, raw) in entries {
                if let Some(raw) = raw {
                    raw.apply(policy.tiers.get_mut(risk));
                }
            }
        }
    }
}

impl RawTier {
    fn apply(self, tier: &mut TierPolicy) {
        if let Some(v) = self.profile {
            tier.profile = v;
        }
        if let Some(v) = self.equity_multiplier {
            tier.equity_multiplier = v;
        }
        if let Some(v) = self.debt_share {
            tier.debt_share = v;
        }
        if let Some(v) = self.description {
            tier.description = v;
        }
        if let Some(v) = self.equity_instruments {
            tier.equity_instruments = v;
        }
        if let Some(v) = self.debt_instruments {
            tier.debt_instruments = v;
        }
        if let Some(v) = self.gold_instruments {
            tier.gold_instruments = v;
        }
    }
}
