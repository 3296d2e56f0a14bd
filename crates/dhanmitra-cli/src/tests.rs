//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::io::Write;

use clap::Parser;
use dhanmitra_core::AnalysisEngine;
use serde_json::json;

use crate::cli::{Cli, Commands, ProfileArgs};
use crate::commands::{self, build_profile_input, format_currency, progress_bar, render_report};

fn full_args() -> ProfileArgs {
    ProfileArgs {
        income: Some(50000.0),
        expenses: Some(30000.0),
        savings: Some(100000.0),
        age: Some(25),
        risk_appetite: Some("Medium".to_string()),
    }
}

// ========== Formatting Tests ==========

#[test]
fn test_format_currency() {
    assert_eq!(format_currency(0.0), "₹0");
    assert_eq!(format_currency(999.0), "₹999");
    assert_eq!(format_currency(20000.0), "₹20,000");
    assert_eq!(format_currency(180000.0), "₹1,80,000");
    assert_eq!(format_currency(12345678.0), "₹1,23,45,678");
    assert_eq!(format_currency(10416.67), "₹10,416.67");
    assert_eq!(format_currency(958.3), "₹958.30");
    assert_eq!(format_currency(-1500.0), "-₹1,500");
}

#[test]
fn test_progress_bar() {
    assert_eq!(progress_bar(0, 10), "░░░░░░░░░░");
    assert_eq!(progress_bar(60, 10), "██████░░░░");
    assert_eq!(progress_bar(100, 10), "██████████");
    assert_eq!(progress_bar(250, 4), "████");
}

// ========== Input Building Tests ==========

#[test]
fn test_build_profile_input_from_flags() {
    let input = build_profile_input(None, &full_args()).unwrap();

    assert_eq!(input["income"], 50000.0);
    assert_eq!(input["age"], 25);
    assert_eq!(input["risk_appetite"], "Medium");
}

#[test]
fn test_flags_override_file_fields() {
    let base = json!({
        "income": 10000,
        "expenses": 8000,
        "savings": 0,
        "age": 60,
        "risk_appetite": "Low"
    });
    let args = ProfileArgs {
        age: Some(35),
        ..Default::default()
    };

    let input = build_profile_input(Some(base), &args).unwrap();
    assert_eq!(input["age"], 35);
    assert_eq!(input["income"], 10000);
    assert_eq!(input["risk_appetite"], "Low");
}

#[test]
fn test_build_profile_input_rejects_non_object_file() {
    assert!(build_profile_input(Some(json!([1, 2])), &ProfileArgs::default()).is_err());
}

#[test]
fn test_build_profile_input_rejects_non_finite_flags() {
    let args = ProfileArgs {
        income: Some(f64::NAN),
        ..full_args()
    };
    let err = build_profile_input(None, &args).unwrap_err();
    assert_eq!(err.to_string(), "Invalid income: must be a finite number");

    let args = ProfileArgs {
        savings: Some(f64::INFINITY),
        ..full_args()
    };
    let err = build_profile_input(None, &args).unwrap_err();
    assert!(err.to_string().contains("savings"));
}

#[test]
fn test_parse_nan_flag_is_rejected_before_engine() {
    let cli = Cli::try_parse_from(["dhanmitra", "analyze", "--income", "NaN"]).unwrap();

    match cli.command {
        Commands::Analyze { profile, .. } => {
            let err = build_profile_input(None, &profile).unwrap_err();
            assert!(err.to_string().contains("finite"));
        }
        _ => panic!("expected analyze command"),
    }
}

// ========== Command Tests ==========

#[test]
fn test_cmd_analyze_from_flags() {
    let engine = AnalysisEngine::default();
    assert!(commands::cmd_analyze(&engine, None, &full_args(), false).is_ok());
    assert!(commands::cmd_analyze(&engine, None, &full_args(), true).is_ok());
}

#[test]
fn test_cmd_analyze_reports_validation_errors() {
    let engine = AnalysisEngine::default();
    let args = ProfileArgs {
        age: Some(17),
        ..full_args()
    };

    let err = commands::cmd_analyze(&engine, None, &args, false).unwrap_err();
    assert!(err.to_string().contains("age"));
}

#[test]
fn test_cmd_analyze_missing_fields() {
    let engine = AnalysisEngine::default();
    let err = commands::cmd_analyze(&engine, None, &ProfileArgs::default(), false).unwrap_err();
    assert!(err.to_string().contains("income"));
}

#[test]
fn test_cmd_analyze_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"income": 30000, "expenses": 35000, "savings": 5000, "age": 40, "risk_appetite": "Low"}}"#
    )
    .unwrap();

    let engine = AnalysisEngine::default();
    let result = commands::cmd_analyze(&engine, Some(file.path()), &ProfileArgs::default(), true);
    assert!(result.is_ok());
}

#[test]
fn test_cmd_analyze_bad_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "not json").unwrap();

    let engine = AnalysisEngine::default();
    let err = commands::cmd_analyze(&engine, Some(file.path()), &ProfileArgs::default(), false)
        .unwrap_err();
    assert!(err.to_string().contains("Parsing profile JSON"));
}

#[test]
fn test_render_report() {
    let engine = AnalysisEngine::default();
    let input = build_profile_input(None, &full_args()).unwrap();
    let report = engine.generate_report(&input).unwrap();

    let text = render_report(&report);
    assert!(text.contains("Budget Health: Excellent (green)"));
    assert!(text.contains("₹1,80,000 - ₹2,70,000"));
    assert!(text.contains("Investment Plan (Balanced)"));
    assert!(text.contains("Equity (Growth)"));
    assert!(text.contains("not professional financial advice"));
}

#[test]
fn test_render_report_without_surplus() {
    let engine = AnalysisEngine::default();
    let args = ProfileArgs {
        expenses: Some(60000.0),
        ..full_args()
    };
    let report = engine
        .generate_report(&build_profile_input(None, &args).unwrap())
        .unwrap();

    let text = render_report(&report);
    assert!(text.contains("Overspending"));
    assert!(!text.contains("Investable surplus"));
}

#[test]
fn test_load_engine_with_policy_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[emergency_fund]\nhorizon_months = 24").unwrap();

    let engine = commands::load_engine(Some(file.path())).unwrap();
    assert_eq!(engine.policy().emergency_fund.horizon_months, 24);
}

#[test]
fn test_load_engine_rejects_bad_policy() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[budget]\ngood_from = 50.0").unwrap();

    assert!(commands::load_engine(Some(file.path())).is_err());
}

#[test]
fn test_cmd_policy() {
    assert!(commands::cmd_policy(None, false).is_ok());
    assert!(commands::cmd_policy(None, true).is_ok());
}

// ========== Argument Parsing Tests ==========

#[test]
fn test_parse_analyze_args() {
    let cli = Cli::try_parse_from([
        "dhanmitra",
        "analyze",
        "--income",
        "50000",
        "--expenses",
        "30000",
        "--savings",
        "0",
        "--age",
        "30",
        "--risk",
        "high",
        "--json",
    ])
    .unwrap();

    match cli.command {
        Commands::Analyze { profile, json, file } => {
            assert_eq!(profile.income, Some(50000.0));
            assert_eq!(profile.age, Some(30));
            assert_eq!(profile.risk_appetite.as_deref(), Some("high"));
            assert!(json);
            assert!(file.is_none());
        }
        _ => panic!("expected analyze command"),
    }
}

#[test]
fn test_parse_negative_amount_reaches_engine() {
    let cli = Cli::try_parse_from(["dhanmitra", "analyze", "--expenses", "-5"]).unwrap();

    match cli.command {
        Commands::Analyze { profile, .. } => assert_eq!(profile.expenses, Some(-5.0)),
        _ => panic!("expected analyze command"),
    }
}

#[test]
fn test_parse_serve_origins() {
    let cli = Cli::try_parse_from([
        "dhanmitra",
        "serve",
        "--allow-origin",
        "http://localhost:5173,http://127.0.0.1:5173",
    ])
    .unwrap();

    match cli.command {
        Commands::Serve {
            port,
            host,
            allowed_origins,
            ..
        } => {
            assert_eq!(port, 8000);
            assert_eq!(host, "127.0.0.1");
            assert_eq!(allowed_origins.len(), 2);
        }
        _ => panic!("expected serve command"),
    }
}
