//! DhanMitra Core Library
//!
//! Shared functionality for the DhanMitra household finance advisor:
//! - Financial profile model and validation
//! - Budget health, emergency fund and investment allocation calculators
//! - Analysis policy (thresholds and risk-tier tables) loaded from TOML

pub mod analysis;
pub mod error;
pub mod models;
pub mod policy;

pub use analysis::{
    AllocationItem, AnalysisEngine, AnalysisReport, BudgetAnalysis, BudgetBand, InvestmentPlan,
    SavingsRecommendation, StatusColor,
};
pub use error::{Error, Result};
pub use models::{DerivedMetrics, FinancialProfile, RiskAppetite};
pub use policy::{AnalysisPolicy, TierPolicy, TierTable};
