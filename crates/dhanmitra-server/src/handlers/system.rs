//! Health and policy introspection handlers

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::AppState;
use dhanmitra_core::AnalysisPolicy;

/// GET /health - Liveness check
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "app": "DhanMitra"
    }))
}

/// GET /policy - Thresholds and tier tables the engine is running with
pub async fn get_policy(State(state): State<Arc<AppState>>) -> Json<AnalysisPolicy> {
    Json(state.engine.policy().clone())
}
