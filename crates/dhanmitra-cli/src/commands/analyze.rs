//! Analyze command implementation
//!
//! Collects a profile from a JSON file and/or flags, hands it to the engine
//! untouched (validation is the engine's job) and renders the report.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use dhanmitra_core::{AnalysisEngine, AnalysisReport};
use serde_json::{Map, Value};

use crate::cli::ProfileArgs;

/// Width of the allocation bars in characters
const BAR_WIDTH: usize = 20;

/// Merge a profile file with flag overrides into the raw engine input
pub fn build_profile_input(base: Option<Value>, args: &ProfileArgs) -> Result<Value> {
    let mut obj = match base {
        Some(Value::Object(map)) => map,
        Some(_) => anyhow::bail!("Profile file must contain a JSON object"),
        None => Map::new(),
    };

    if let Some(income) = args.income {
        obj.insert("income".to_string(), finite_amount("income", income)?);
    }
    if let Some(expenses) = args.expenses {
        obj.insert("expenses".to_string(), finite_amount("expenses", expenses)?);
    }
    if let Some(savings) = args.savings {
        obj.insert("savings".to_string(), finite_amount("savings", savings)?);
    }
    if let Some(age) = args.age {
        obj.insert("age".to_string(), Value::from(age));
    }
    if let Some(ref risk) = args.risk_appetite {
        obj.insert("risk_appetite".to_string(), Value::from(risk.as_str()));
    }

    Ok(Value::Object(obj))
}

/// Flag amount as JSON, rejecting NaN and infinity (JSON would encode them as null)
fn finite_amount(field: &str, value: f64) -> Result<Value> {
    if !value.is_finite() {
        anyhow::bail!("Invalid {}: must be a finite number", field);
    }
    Ok(Value::from(value))
}

/// Read a profile JSON file
pub fn read_profile_file(path: &Path) -> Result<Value> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Reading profile file: {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Parsing profile JSON in {}", path.display()))
}

pub fn cmd_analyze(
    engine: &AnalysisEngine,
    file: Option<&Path>,
    args: &ProfileArgs,
    json: bool,
) -> Result<()> {
    let base = file.map(read_profile_file).transpose()?;
    let input = build_profile_input(base, args)?;

    let report = engine.generate_report(&input)?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialize report")?
        );
    } else {
        println!("{}", render_report(&report));
    }

    Ok(())
}

/// Render a report for the terminal
pub fn render_report(report: &AnalysisReport) -> String {
    let mut lines = Vec::new();
    let budget = &report.budget;
    let savings = &report.savings;
    let plan = &report.investment_plan;

    lines.push(String::new());
    lines.push(format!("📊 Budget Health: {} ({})", budget.status, budget.color));
    lines.push(format!(
        "   Savings ratio: {:.2}%   Monthly surplus: {}",
        budget.savings_ratio,
        format_currency(budget.savings_amount)
    ));
    lines.push(format!("   {}", budget.advice));

    lines.push(String::new());
    lines.push("🛡️  Emergency Fund".to_string());
    lines.push(format!(
        "   Target range: {} - {}",
        format_currency(savings.emergency_fund_min),
        format_currency(savings.emergency_fund_max)
    ));
    if savings.target_monthly_savings > 0.0 {
        lines.push(format!(
            "   Set aside: {} per month over {} months",
            format_currency(savings.target_monthly_savings),
            savings.horizon_months
        ));
    } else {
        lines.push("   Set aside: nothing more needed".to_string());
    }
    lines.push(format!("   {}", savings.note));

    lines.push(String::new());
    lines.push(format!("📈 Investment Plan ({})", plan.profile));
    lines.push(format!("   {}", plan.description));
    if !plan.allocation.is_empty() {
        lines.push(format!(
            "   Investable surplus: {}",
            format_currency(plan.investable_surplus)
        ));
        lines.push("   ─────────────────────────────────────────────────────────────".to_string());
        for item in &plan.allocation {
            lines.push(format!(
                "   {:22} {:>3}% {} {:>14}",
                item.asset_class,
                item.percentage,
                progress_bar(item.percentage, BAR_WIDTH),
                format_currency(item.amount)
            ));
            lines.push(format!("      {}", item.instruments));
        }
    }

    lines.push(String::new());
    lines.push(format!("⚠️  {}", plan.disclaimer));

    lines.join("\n")
}

/// Format rupees with Indian digit grouping (₹1,80,000 / ₹10,416.67)
pub fn format_currency(value: f64) -> String {
    let paise = (value.abs() * 100.0).round() as u64;
    let whole = group_indian(&(paise / 100).to_string());
    let sign = if value < 0.0 && paise > 0 { "-" } else { "" };

    match paise % 100 {
        0 => format!("{}₹{}", sign, whole),
        fraction => format!("{}₹{}.{:02}", sign, whole, fraction),
    }
}

/// Group digits as thousands, then lakhs and crores
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

/// Text bar with one filled cell per `100 / width` percent
pub fn progress_bar(percentage: u32, width: usize) -> String {
    let filled = (percentage.min(100) as usize * width + 50) / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
