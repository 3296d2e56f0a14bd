//! Analysis Engine - validates a raw profile and assembles the report

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, error};

use crate::error::{Error, Result};
use crate::models::{
    round_to_minor_unit, DerivedMetrics, FinancialProfile, RiskAppetite, MAX_AGE, MAX_AMOUNT,
    MIN_AGE,
};
use crate::policy::AnalysisPolicy;

use super::types::AnalysisReport;
use super::{allocation, budget, emergency_fund};

/// Stateless report generator over an immutable policy
///
/// Cloning is cheap and every clone shares the same policy, so one engine can
/// serve any number of concurrent requests.
#[derive(Debug, Clone)]
pub struct AnalysisEngine {
    policy: Arc<AnalysisPolicy>,
}

impl AnalysisEngine {
    /// Create an engine, rejecting an inconsistent policy
    pub fn new(policy: AnalysisPolicy) -> Result<Self> {
        policy.validate()?;
        Ok(Self {
            policy: Arc::new(policy),
        })
    }

    pub fn policy(&self) -> &AnalysisPolicy {
        &self.policy
    }

    /// Validate a raw JSON profile and produce the full report
    ///
    /// Fails with [`Error::Validation`] on bad input (no report is computed)
    /// and with [`Error::Internal`] if the assembled report breaks one of its
    /// invariants.
    pub fn generate_report(&self, raw: &Value) -> Result<AnalysisReport> {
        let profile = validate_profile(raw)?;
        self.analyze(&profile)
    }

    /// Produce the report for a profile that already passed [`validate_profile`]
    pub fn analyze(&self, profile: &FinancialProfile) -> Result<AnalysisReport> {
        let policy = &*self.policy;
        let metrics = DerivedMetrics::from_profile(profile);

        let budget = budget::analyze(&metrics, &policy.budget);
        let savings = emergency_fund::plan(
            profile.expenses,
            profile.savings,
            profile.age,
            &policy.emergency_fund,
        );

        // The emergency-fund contribution is set aside before anything is invested
        let investable_surplus =
            round_to_minor_unit(metrics.savings_amount - savings.target_monthly_savings);
        let investment_plan = allocation::allocate(
            investable_surplus,
            profile.age,
            profile.risk_appetite,
            &policy.allocation,
            &policy.tiers,
        );

        let report = AnalysisReport {
            budget,
            savings,
            investment_plan,
        };

        if let Err(e) = check_invariants(&report, &metrics, investable_surplus) {
            error!(error = %e, ?profile, "Analysis report failed invariant check");
            return Err(e);
        }

        debug!(
            status = %report.budget.status,
            savings_ratio = report.budget.savings_ratio,
            tier = %profile.risk_appetite,
            investable_surplus,
            items = report.investment_plan.allocation.len(),
            "Generated analysis report"
        );

        Ok(report)
    }
}

impl Default for AnalysisEngine {
    fn default() -> Self {
        Self {
            policy: Arc::new(AnalysisPolicy::default()),
        }
    }
}

/// Turn a raw JSON object into a validated profile
///
/// Fields are checked in order (income, expenses, savings, age,
/// risk_appetite) and the first problem is reported. Extra fields are
/// ignored.
pub fn validate_profile(raw: &Value) -> Result<FinancialProfile> {
    let obj = raw
        .as_object()
        .ok_or_else(|| Error::validation("body", "expected a JSON object"))?;

    let income = amount_field(obj, "income")?;
    let expenses = amount_field(obj, "expenses")?;
    let savings = amount_field(obj, "savings")?;
    let age = age_field(obj)?;
    let risk_appetite = risk_field(obj)?;

    Ok(FinancialProfile {
        income,
        expenses,
        savings,
        age,
        risk_appetite,
    })
}

fn required<'a>(obj: &'a Map<String, Value>, field: &str) -> Result<&'a Value> {
    match obj.get(field) {
        None | Some(Value::Null) => Err(Error::validation(field, "is required")),
        Some(value) => Ok(value),
    }
}

fn amount_field(obj: &Map<String, Value>, field: &str) -> Result<f64> {
    let value = required(obj, field)?
        .as_f64()
        .ok_or_else(|| Error::validation(field, "must be a number"))?;

    if value < 0.0 {
        return Err(Error::validation(field, "must not be negative"));
    }
    if value > MAX_AMOUNT {
        return Err(Error::validation(
            field,
            format!("must not exceed {}", MAX_AMOUNT),
        ));
    }
    Ok(value)
}

fn age_field(obj: &Map<String, Value>) -> Result<u32> {
    let value = required(obj, "age")?
        .as_f64()
        .ok_or_else(|| Error::validation("age", "must be a number"))?;

    if value.fract() != 0.0 {
        return Err(Error::validation("age", "must be a whole number"));
    }
    if value < f64::from(MIN_AGE) || value > f64::from(MAX_AGE) {
        return Err(Error::validation(
            "age",
            format!("must be between {} and {}", MIN_AGE, MAX_AGE),
        ));
    }
    Ok(value as u32)
}

fn risk_field(obj: &Map<String, Value>) -> Result<RiskAppetite> {
    const ALLOWED: &str = "must be one of Low, Medium, High";

    required(obj, "risk_appetite")?
        .as_str()
        .ok_or_else(|| Error::validation("risk_appetite", ALLOWED))?
        .parse()
        .map_err(|_| Error::validation("risk_appetite", ALLOWED))
}

/// Verify the structural guarantees of an assembled report
fn check_invariants(
    report: &AnalysisReport,
    metrics: &DerivedMetrics,
    investable_surplus: f64,
) -> Result<()> {
    if report.budget.savings_amount != metrics.disposable_income.max(0.0) {
        return Err(Error::Internal(format!(
            "savings_amount {} does not match disposable income {}",
            report.budget.savings_amount, metrics.disposable_income
        )));
    }

    let plan = &report.investment_plan;
    if plan.allocation.is_empty() != (investable_surplus <= 0.0) {
        return Err(Error::Internal(format!(
            "allocation has {} items for investable surplus {}",
            plan.allocation.len(),
            investable_surplus
        )));
    }
    if !plan.allocation.is_empty() && plan.total_percentage() != 100 {
        return Err(Error::Internal(format!(
            "allocation percentages sum to {}",
            plan.total_percentage()
        )));
    }
    if plan.allocation.iter().any(|item| !item.amount.is_finite()) {
        return Err(Error::Internal(
            "allocation amount is not finite".to_string(),
        ));
    }

    Ok(())
}
