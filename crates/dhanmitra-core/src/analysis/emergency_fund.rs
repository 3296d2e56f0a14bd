//! Emergency Fund Planner
//!
//! Sizes a cash buffer in months of expenses and the monthly contribution
//! needed to reach the middle of that range within the policy horizon.

use crate::models::round_to_minor_unit;
use crate::policy::EmergencyFundPolicy;

use super::types::{format_amount, SavingsRecommendation};

/// Months of expenses the fund should cover at the given age, as (min, max)
///
/// From `senior_age` onwards the upper end is widened by
/// `senior_extra_months`.
pub fn coverage_months(age: u32, policy: &EmergencyFundPolicy) -> (f64, f64) {
    let extra = if age >= policy.senior_age {
        policy.senior_extra_months
    } else {
        0.0
    };
    (policy.min_months, policy.max_months + extra)
}

/// Recommend an emergency fund and the monthly savings towards it
pub fn plan(
    expenses: f64,
    savings: f64,
    age: u32,
    policy: &EmergencyFundPolicy,
) -> SavingsRecommendation {
    let (min_months, max_months) = coverage_months(age, policy);
    let fund_min = round_to_minor_unit(expenses * min_months);
    let fund_max = round_to_minor_unit(expenses * max_months);
    let midpoint = (fund_min + fund_max) / 2.0;
    let horizon = policy.horizon_months;

    let needed = (midpoint - savings).max(0.0);
    let adequate = savings >= midpoint;

    let (monthly, monthly_str, note) = if adequate {
        (
            0.0,
            "0 per month (fund already adequate)".to_string(),
            format!(
                "Your current savings already cover the recommended {}-{} months of expenses. \
                 Keep this buffer in a liquid account and direct new surplus to investments.",
                format_amount(min_months),
                format_amount(max_months)
            ),
        )
    } else {
        let monthly = round_to_minor_unit(needed / f64::from(horizon)).max(0.0);
        (
            monthly,
            format!("{} per month over {} months", format_amount(monthly), horizon),
            format!(
                "Build an emergency fund covering {}-{} months of expenses before investing. \
                 You are {} short of the midpoint target.",
                format_amount(min_months),
                format_amount(max_months),
                format_amount(round_to_minor_unit(needed))
            ),
        )
    };

    SavingsRecommendation {
        emergency_fund_range: format!("{} - {}", format_amount(fund_min), format_amount(fund_max)),
        emergency_fund_min: fund_min,
        emergency_fund_max: fund_max,
        target_monthly_savings: monthly,
        target_monthly_savings_str: monthly_str,
        horizon_months: horizon,
        note,
    }
}
