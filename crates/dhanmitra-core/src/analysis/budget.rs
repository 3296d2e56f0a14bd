//! Budget Analyzer
//!
//! Rates spending discipline from the savings ratio. The band boundaries come
//! from [`BudgetPolicy`]; each lower bound belongs to the band above it, so a
//! ratio of exactly 10 is "Good" and exactly 30 is "Excellent".

use crate::models::{round_to_minor_unit, DerivedMetrics};
use crate::policy::BudgetPolicy;

use super::types::{format_amount, BudgetAnalysis, StatusColor};

/// Savings-discipline band
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BudgetBand {
    /// Expenses exceed income
    Overspending,
    /// Saving less than `good_from` percent
    NeedsImprovement {
        /// Monthly amount that would reach `good_from` percent of income
        target_savings: f64,
    },
    /// Saving between `good_from` and `excellent_from` percent
    Good,
    /// Saving at least `excellent_from` percent
    Excellent,
}

impl BudgetBand {
    pub fn classify(metrics: &DerivedMetrics, policy: &BudgetPolicy) -> Self {
        if metrics.disposable_income < 0.0 {
            BudgetBand::Overspending
        } else if metrics.savings_ratio < policy.good_from {
            BudgetBand::NeedsImprovement {
                target_savings: round_to_minor_unit(metrics.income * policy.good_from / 100.0),
            }
        } else if metrics.savings_ratio < policy.excellent_from {
            BudgetBand::Good
        } else {
            BudgetBand::Excellent
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BudgetBand::Overspending => "Overspending",
            BudgetBand::NeedsImprovement { .. } => "Needs Improvement",
            BudgetBand::Good => "Good",
            BudgetBand::Excellent => "Excellent",
        }
    }

    /// Color for this band; "Good" turns green from `green_from` upwards
    pub fn color(&self, savings_ratio: f64, policy: &BudgetPolicy) -> StatusColor {
        match self {
            BudgetBand::Overspending => StatusColor::Red,
            BudgetBand::NeedsImprovement { .. } => StatusColor::Orange,
            BudgetBand::Good if savings_ratio >= policy.green_from => StatusColor::Green,
            BudgetBand::Good => StatusColor::Orange,
            BudgetBand::Excellent => StatusColor::Green,
        }
    }

    pub fn advice(&self, policy: &BudgetPolicy) -> String {
        match self {
            BudgetBand::Overspending => "You are spending more than you earn. Cut back on \
                 non-essential expenses immediately and avoid taking on new debt."
                .to_string(),
            BudgetBand::NeedsImprovement { target_savings } if *target_savings > 0.0 => format!(
                "Your savings buffer is thin. Reduce discretionary spending and aim to save \
                 at least {}% of your income (₹{} a month).",
                policy.good_from,
                format_amount(*target_savings)
            ),
            BudgetBand::NeedsImprovement { .. } => format!(
                "Your savings buffer is thin. Reduce discretionary spending and aim to save \
                 at least {}% of your income.",
                policy.good_from
            ),
            BudgetBand::Good => format!(
                "You are saving steadily, with room to grow. Pushing your savings rate \
                 towards {}% will speed up your goals.",
                policy.excellent_from
            ),
            BudgetBand::Excellent => "Great job! You are maintaining strong savings discipline. \
                 Keep putting the surplus to work."
                .to_string(),
        }
    }
}

/// Rate the household's spending discipline
pub fn analyze(metrics: &DerivedMetrics, policy: &BudgetPolicy) -> BudgetAnalysis {
    let band = BudgetBand::classify(metrics, policy);

    BudgetAnalysis {
        status: band.label().to_string(),
        color: band.color(metrics.savings_ratio, policy),
        advice: band.advice(policy),
        savings_ratio: metrics.savings_ratio,
        savings_amount: metrics.savings_amount,
    }
}
