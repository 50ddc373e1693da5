use axum::extract::State;
use axum::response::Html;
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::Report;
use crate::render;
use crate::storage::{self, ReportSnapshot};

/// The latest report as JSON.
pub async fn latest(State(state): State<AppState>) -> Json<Report> {
    Json(state.report.as_ref().clone())
}

/// The latest report rendered as an HTML page.
pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render::html::page(&state.report))
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub snapshots: Vec<ReportSnapshot>,
}

/// All stored report snapshots, oldest first.
pub async fn history(State(state): State<AppState>) -> Result<Json<HistoryResponse>, ApiError> {
    let snapshots = storage::jsonl::read_report_snapshots(&state.storage)
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(Json(HistoryResponse { snapshots }))
}
