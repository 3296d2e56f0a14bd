//! Report types produced by the analysis engine

use std::fmt;

use serde::{Deserialize, Serialize};

/// Traffic-light color for the budget status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusColor {
    Green,
    Orange,
    Red,
}

impl StatusColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusColor::Green => "green",
            StatusColor::Orange => "orange",
            StatusColor::Red => "red",
        }
    }
}

impl fmt::Display for StatusColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Assessment of current spending discipline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetAnalysis {
    pub status: String,
    pub color: StatusColor,
    pub advice: String,
    /// Disposable income as a percentage of income
    pub savings_ratio: f64,
    /// Disposable income clamped to zero
    pub savings_amount: f64,
}

/// Emergency fund target and the monthly contribution towards it
///
/// The string fields are locale-neutral renderings of the numeric ones;
/// presentation layers apply currency formatting from the numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsRecommendation {
    pub emergency_fund_range: String,
    pub emergency_fund_min: f64,
    pub emergency_fund_max: f64,
    pub target_monthly_savings: f64,
    pub target_monthly_savings_str: String,
    pub horizon_months: u32,
    pub note: String,
}

/// One asset class in an investment plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationItem {
    #[serde(rename = "type")]
    pub asset_class: String,
    pub percentage: u32,
    pub amount: f64,
    pub instruments: String,
    /// Display color (hex)
    pub color: String,
}

/// Risk-tiered split of the investable surplus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentPlan {
    pub profile: String,
    pub description: String,
    pub investable_surplus: f64,
    pub allocation: Vec<AllocationItem>,
    pub disclaimer: String,
}

impl InvestmentPlan {
    pub fn total_percentage(&self) -> u32 {
        self.allocation.iter().map(|item| item.percentage).sum()
    }
}

/// Combined report returned for one profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub budget: BudgetAnalysis,
    pub savings: SavingsRecommendation,
    pub investment_plan: InvestmentPlan,
}

/// Render an amount without currency symbol or grouping
///
/// Whole numbers drop the fraction (`180000`), anything else keeps two
/// decimals (`10416.67`).
pub fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}
