//! Analysis Engine - Household Financial Report
//!
//! Turns a financial profile into a three-part report. Each part comes from
//! an independent, side-effect-free calculator:
//!
//! - **Budget Analyzer** - Rates spending discipline from the savings ratio
//! - **Emergency Fund Planner** - Sizes a cash buffer and a monthly contribution
//! - **Investment Allocator** - Splits the remaining surplus by risk and age
//!
//! The [`AnalysisEngine`] validates input, computes the derived metrics once,
//! runs the calculators and checks the assembled report.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dhanmitra_core::{AnalysisEngine, AnalysisPolicy};
//!
//! let engine = AnalysisEngine::new(AnalysisPolicy::load(None)?)?;
//! let report = engine.generate_report(&serde_json::json!({
//!     "income": 50000, "expenses": 30000, "savings": 100000,
//!     "age": 25, "risk_appetite": "Medium"
//! }))?;
//! ```

pub mod allocation;
pub mod budget;
pub mod emergency_fund;
pub mod engine;
pub mod types;

pub use allocation::{AssetClass, DISCLAIMER, NO_SURPLUS_DESCRIPTION};
pub use budget::BudgetBand;
pub use engine::{validate_profile, AnalysisEngine};
pub use types::{
    format_amount, AllocationItem, AnalysisReport, BudgetAnalysis, InvestmentPlan,
    SavingsRecommendation, StatusColor,
};
