//! Input data model for DhanMitra
//!
//! A [`FinancialProfile`] is the validated form of one analysis request. It is
//! built by the engine's validator and never mutated afterwards.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Youngest accepted age
pub const MIN_AGE: u32 = 18;

/// Oldest accepted age
pub const MAX_AGE: u32 = 100;

/// Largest accepted monetary amount, keeps every derived figure finite
pub const MAX_AMOUNT: f64 = 1e12;

/// Declared tolerance for investment risk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskAppetite {
    Low,
    Medium,
    High,
}

impl RiskAppetite {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskAppetite::Low => "Low",
            RiskAppetite::Medium => "Medium",
            RiskAppetite::High => "High",
        }
    }

    /// Key used for this tier in the policy file
    pub fn config_key(&self) -> &'static str {
        match self {
            RiskAppetite::Low => "low",
            RiskAppetite::Medium => "medium",
            RiskAppetite::High => "high",
        }
    }

    pub fn all() -> &'static [RiskAppetite] {
        &[RiskAppetite::Low, RiskAppetite::Medium, RiskAppetite::High]
    }
}

impl fmt::Display for RiskAppetite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RiskAppetite {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(RiskAppetite::Low),
            "medium" => Ok(RiskAppetite::Medium),
            "high" => Ok(RiskAppetite::High),
            _ => Err(format!("Unknown risk appetite: {}", s)),
        }
    }
}

/// A household's monthly financial profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialProfile {
    /// Monthly gross income
    pub income: f64,
    /// Monthly committed expenses
    pub expenses: f64,
    /// Current liquid savings balance
    pub savings: f64,
    pub age: u32,
    pub risk_appetite: RiskAppetite,
}

/// Values derived from a profile once and shared by every calculator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedMetrics {
    /// Monthly income the ratio is measured against
    pub income: f64,
    /// income - expenses, may be negative
    pub disposable_income: f64,
    /// Disposable income as a percentage of income, 0 when there is no income
    pub savings_ratio: f64,
    /// Disposable income clamped to zero
    pub savings_amount: f64,
}

impl DerivedMetrics {
    pub fn from_profile(profile: &FinancialProfile) -> Self {
        let disposable_income = profile.income - profile.expenses;
        let savings_ratio = if profile.income > 0.0 {
            round_to_minor_unit(disposable_income / profile.income * 100.0)
        } else {
            0.0
        };

        Self {
            income: profile.income,
            disposable_income,
            savings_ratio,
            savings_amount: disposable_income.max(0.0),
        }
    }
}

/// Round to two decimal places (the currency's minor unit)
///
/// Negative zero is normalised so it serializes as `0.0`.
pub fn round_to_minor_unit(value: f64) -> f64 {
    (value * 100.0).round() / 100.0 + 0.0
}
