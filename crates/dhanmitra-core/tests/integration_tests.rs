//! Integration tests for dhanmitra-core
//!
//! These tests exercise the full raw input → validation → report workflow.

use dhanmitra_core::{
    analysis::NO_SURPLUS_DESCRIPTION, models::round_to_minor_unit, AnalysisEngine,
    AnalysisPolicy, AnalysisReport, Error, StatusColor,
};
use serde_json::{json, Value};

fn profile(income: f64, expenses: f64, savings: f64, age: u32, risk: &str) -> Value {
    json!({
        "income": income,
        "expenses": expenses,
        "savings": savings,
        "age": age,
        "risk_appetite": risk,
    })
}

fn report(raw: Value) -> AnalysisReport {
    AnalysisEngine::default()
        .generate_report(&raw)
        .expect("profile should be valid")
}

/// A spread of valid profiles covering deficits, break-even and large surpluses
fn sample_profiles() -> Vec<Value> {
    let mut profiles = Vec::new();
    for income in [0.0, 15000.0, 42000.5, 80000.0, 250000.0] {
        for expenses in [0.0, 9999.99, 30000.0, 79000.0] {
            for savings in [0.0, 60000.0, 2_000_000.0] {
                for age in [18, 33, 45, 71, 100] {
                    for risk in ["Low", "Medium", "High"] {
                        profiles.push(profile(income, expenses, savings, age, risk));
                    }
                }
            }
        }
    }
    profiles
}

// =============================================================================
// Example Scenarios
// =============================================================================

#[test]
fn test_scenario_healthy_saver() {
    let report = report(profile(50000.0, 30000.0, 100000.0, 25, "Medium"));

    assert_eq!(report.budget.savings_ratio, 40.0);
    assert_eq!(report.budget.status, "Excellent");
    assert_eq!(report.budget.color, StatusColor::Green);
    assert_eq!(report.budget.savings_amount, 20000.0);

    assert_eq!(report.savings.emergency_fund_range, "180000 - 270000");
    assert_eq!(report.savings.emergency_fund_min, 180000.0);
    assert_eq!(report.savings.emergency_fund_max, 270000.0);

    let plan = &report.investment_plan;
    assert_eq!(plan.profile, "Balanced");
    assert!(!plan.allocation.is_empty());
    assert_eq!(plan.total_percentage(), 100);
}

#[test]
fn test_scenario_overspending() {
    let report = report(profile(30000.0, 35000.0, 5000.0, 40, "Low"));

    assert_eq!(report.budget.status, "Overspending");
    assert_eq!(report.budget.color, StatusColor::Red);
    assert_eq!(report.budget.savings_amount, 0.0);

    let plan = &report.investment_plan;
    assert!(plan.allocation.is_empty());
    assert_eq!(plan.description, NO_SURPLUS_DESCRIPTION);
    assert!(plan.disclaimer.contains("not professional financial advice"));
}

#[test]
fn test_scenario_zero_income() {
    let report = report(profile(0.0, 0.0, 0.0, 30, "High"));

    assert_eq!(report.budget.savings_ratio, 0.0);
    assert_eq!(report.budget.status, "Needs Improvement");
    assert!(report.investment_plan.allocation.is_empty());

    let report = self::report(profile(0.0, 12000.0, 0.0, 30, "High"));
    assert_eq!(report.budget.savings_ratio, 0.0);
    assert_eq!(report.budget.status, "Overspending");
}

// =============================================================================
// Properties
// =============================================================================

#[test]
fn test_savings_amount_is_clamped_disposable_income() {
    for raw in sample_profiles() {
        let income = raw["income"].as_f64().unwrap();
        let expenses = raw["expenses"].as_f64().unwrap();
        let report = report(raw);
        assert_eq!(report.budget.savings_amount, (income - expenses).max(0.0));
    }
}

#[test]
fn test_non_empty_allocations_sum_to_100() {
    for raw in sample_profiles() {
        let plan = report(raw).investment_plan;
        if !plan.allocation.is_empty() {
            assert_eq!(plan.total_percentage(), 100);
        }
    }
}

#[test]
fn test_allocation_empty_iff_no_surplus() {
    for raw in sample_profiles() {
        let report = report(raw);
        let surplus = round_to_minor_unit(
            report.budget.savings_amount - report.savings.target_monthly_savings,
        );
        assert_eq!(
            report.investment_plan.allocation.is_empty(),
            surplus <= 0.0,
            "surplus {}",
            surplus
        );
    }
}

#[test]
fn test_ratio_boundaries() {
    let at = |expenses: f64| report(profile(1000.0, expenses, 0.0, 30, "Medium")).budget;

    let below_ten = at(900.5);
    assert_eq!(below_ten.savings_ratio, 9.95);
    assert_eq!(below_ten.status, "Needs Improvement");

    let ten = at(900.0);
    assert_eq!(ten.savings_ratio, 10.0);
    assert_eq!(ten.status, "Good");
    assert_eq!(ten.color, StatusColor::Orange);

    let below_thirty = at(700.5);
    assert_eq!(below_thirty.savings_ratio, 29.95);
    assert_eq!(below_thirty.status, "Good");
    assert_eq!(below_thirty.color, StatusColor::Green);

    let thirty = at(700.0);
    assert_eq!(thirty.savings_ratio, 30.0);
    assert_eq!(thirty.status, "Excellent");
}

#[test]
fn test_identical_input_gives_identical_output() {
    let engine = AnalysisEngine::default();
    for raw in sample_profiles().into_iter().step_by(7) {
        let first = serde_json::to_vec(&engine.generate_report(&raw).unwrap()).unwrap();
        let second = serde_json::to_vec(&engine.generate_report(&raw).unwrap()).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_savings_ratio_monotonic_in_income() {
    let mut previous = f64::NEG_INFINITY;
    for step in 0..200 {
        let income = 1000.0 + step as f64 * 750.0;
        let ratio = report(profile(income, 20000.0, 0.0, 35, "Medium"))
            .budget
            .savings_ratio;
        assert!(ratio >= previous, "ratio fell at income {}", income);
        previous = ratio;
    }
}

#[test]
fn test_age_boundaries() {
    let engine = AnalysisEngine::default();

    for age in [18, 100] {
        assert!(engine
            .generate_report(&profile(50000.0, 30000.0, 0.0, age, "Low"))
            .is_ok());
    }
    for age in [17, 101] {
        let err = engine
            .generate_report(&profile(50000.0, 30000.0, 0.0, age, "Low"))
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.field(), Some("age"));
    }
}

#[test]
fn test_invalid_input_yields_no_report() {
    let err = AnalysisEngine::default()
        .generate_report(&json!({ "income": 50000, "expenses": 30000 }))
        .unwrap_err();

    match err {
        Error::Validation { field, .. } => assert_eq!(field, "savings"),
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[test]
fn test_report_json_shape() {
    let json = serde_json::to_value(report(profile(50000.0, 30000.0, 100000.0, 25, "Medium")))
        .unwrap();

    for key in ["status", "color", "advice", "savings_ratio", "savings_amount"] {
        assert!(json["budget"].get(key).is_some(), "budget.{}", key);
    }
    for key in ["emergency_fund_range", "target_monthly_savings_str", "note"] {
        assert!(json["savings"].get(key).is_some(), "savings.{}", key);
    }
    for key in ["profile", "description", "allocation", "disclaimer"] {
        assert!(json["investment_plan"].get(key).is_some(), "investment_plan.{}", key);
    }

    let item = &json["investment_plan"]["allocation"][0];
    for key in ["type", "percentage", "amount", "instruments", "color"] {
        assert!(item.get(key).is_some(), "allocation item {}", key);
    }
    assert_eq!(json["budget"]["color"], "green");
}

#[test]
fn test_custom_policy_changes_bands() {
    let policy = AnalysisPolicy::from_toml(
        r#"
        [budget]
        good_from = 5.0
        green_from = 5.0
        excellent_from = 50.0
        "#,
    )
    .unwrap();
    let engine = AnalysisEngine::new(policy).unwrap();

    let report = engine
        .generate_report(&profile(50000.0, 30000.0, 0.0, 25, "Medium"))
        .unwrap();
    assert_eq!(report.budget.status, "Good");
    assert_eq!(report.budget.color, StatusColor::Green);
}

#[test]
fn test_engine_shared_across_threads() {
    let engine = AnalysisEngine::default();
    let raw = profile(64000.0, 41000.0, 30000.0, 52, "High");
    let expected = engine.generate_report(&raw).unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let engine = engine.clone();
            let raw = raw.clone();
            std::thread::spawn(move || engine.generate_report(&raw).unwrap())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
