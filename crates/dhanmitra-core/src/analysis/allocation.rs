//! Investment Allocator
//!
//! Splits the investable surplus across equity, debt and gold/cash. The
//! equity weight starts from an age rule (`100 - age`, clamped to the policy
//! bounds) and is scaled by the tier's multiplier; what is left goes to debt
//! and gold/cash by the tier's `debt_share`.

use crate::models::{round_to_minor_unit, RiskAppetite};
use crate::policy::{AllocationPolicy, TierPolicy, TierTable};

use super::types::{AllocationItem, InvestmentPlan};

/// Always attached to a plan, with or without an allocation
pub const DISCLAIMER: &str = "This is an educational plan and not professional financial \
     advice. Consult a registered financial advisor before investing.";

pub const NO_SURPLUS_DESCRIPTION: &str = "No surplus is available for investment after \
     expenses and your emergency-fund contribution. Focus on reducing expenses and building \
     your emergency fund first.";

/// Asset classes in allocation order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetClass {
    Equity,
    Debt,
    GoldCash,
}

impl AssetClass {
    pub fn label(&self) -> &'static str {
        match self {
            AssetClass::Equity => "Equity (Growth)",
            AssetClass::Debt => "Debt (Stability)",
            AssetClass::GoldCash => "Gold & Cash (Hedge)",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            AssetClass::Equity => "#9c27b0",
            AssetClass::Debt => "#0288d1",
            AssetClass::GoldCash => "#f9a825",
        }
    }

    pub fn instruments<'a>(&self, tier: &'a TierPolicy) -> &'a str {
        match self {
            AssetClass::Equity => &tier.equity_instruments,
            AssetClass::Debt => &tier.debt_instruments,
            AssetClass::GoldCash => &tier.gold_instruments,
        }
    }
}

/// Unrounded equity weight in percent
pub fn equity_weight(age: u32, tier: &TierPolicy, policy: &AllocationPolicy) -> f64 {
    let min = f64::from(policy.min_equity);
    let max = f64::from(policy.max_equity);
    let base = (100.0 - f64::from(age)).clamp(min, max);
    (base * tier.equity_multiplier).clamp(min, max)
}

/// Whole-percent weights per asset class, summing to exactly 100
pub fn target_weights(
    age: u32,
    tier: &TierPolicy,
    policy: &AllocationPolicy,
) -> Vec<(AssetClass, u32)> {
    let equity = equity_weight(age, tier, policy);
    let rest = 100.0 - equity;
    let debt = rest * tier.debt_share;
    let gold = rest - debt;

    let classes = [AssetClass::Equity, AssetClass::Debt, AssetClass::GoldCash];
    let percentages = reconcile_percentages(&[equity, debt, gold]);

    classes.into_iter().zip(percentages).collect()
}

/// Round weights to whole percents and push the rounding remainder onto the
/// largest bucket so the total is exactly 100.
///
/// `raw` must be non-negative and sum to 100.
pub(crate) fn reconcile_percentages(raw: &[f64]) -> Vec<u32> {
    let mut rounded: Vec<i64> = raw.iter().map(|w| w.round() as i64).collect();
    let drift = 100 - rounded.iter().sum::<i64>();

    let largest = raw
        .iter()
        .enumerate()
        .fold(0, |best, (i, w)| if *w > raw[best] { i } else { best });
    if let Some(bucket) = rounded.get_mut(largest) {
        *bucket += drift;
    }

    rounded.into_iter().map(|p| p.max(0) as u32).collect()
}

/// Build an investment plan for the surplus left after the emergency-fund
/// contribution
pub fn allocate(
    investable_surplus: f64,
    age: u32,
    risk: RiskAppetite,
    policy: &AllocationPolicy,
    tiers: &TierTable,
) -> InvestmentPlan {
    let tier = tiers.get(risk);

    if investable_surplus <= 0.0 {
        return InvestmentPlan {
            profile: tier.profile.clone(),
            description: NO_SURPLUS_DESCRIPTION.to_string(),
            investable_surplus: 0.0,
            allocation: Vec::new(),
            disclaimer: DISCLAIMER.to_string(),
        };
    }

    let allocation = target_weights(age, tier, policy)
        .into_iter()
        .filter(|(_, pct)| *pct > 0)
        .map(|(class, pct)| AllocationItem {
            asset_class: class.label().to_string(),
            percentage: pct,
            amount: round_to_minor_unit(investable_surplus * f64::from(pct) / 100.0),
            instruments: class.instruments(tier).to_string(),
            color: class.color().to_string(),
        })
        .collect();

    InvestmentPlan {
        profile: tier.profile.clone(),
        description: tier.description.clone(),
        investable_surplus,
        allocation,
        disclaimer: DISCLAIMER.to_string(),
    }
}
