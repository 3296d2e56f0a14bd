//! Analysis handlers

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    Json,
};
use tracing::warn;

use crate::{AppError, AppState, MAX_BODY_SIZE};
use dhanmitra_core::AnalysisReport;

/// POST /analyze - Generate a report for a financial profile
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<AnalysisReport>, AppError> {
    let bytes = axum::body::to_bytes(request.into_body(), MAX_BODY_SIZE)
        .await
        .map_err(|_| AppError::bad_request("Invalid request body"))?;
    let body: serde_json::Value =
        serde_json::from_slice(&bytes).map_err(|_| AppError::bad_request("Invalid JSON"))?;

    let report = state.engine.generate_report(&body).map_err(|e| {
        if let Some(field) = e.field() {
            warn!(field, error = %e, "Rejected analysis request");
        }
        AppError::from_engine(e)
    })?;

    Ok(Json(report))
}
