//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};

use crate::{
    domain::AlertBoard, infrastructure::dto::http::AlertSummaryDto, ui::state::AppState,
};

/// Debug endpoint to get the full board state (for testing purposes)
pub async fn debug_board_state(
    State(state): State<Arc<AppState>>,
) -> Result<Json<AlertBoard>, StatusCode> {
    let board = state
        .get_board_state_usecase
        .execute()
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok(Json(board))
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get summaries of active (pending / accepted) alerts
pub async fn get_active_alerts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<AlertSummaryDto>>, StatusCode> {
    let board = state
        .get_board_state_usecase
        .execute()
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    // Domain Model から DTO への変換
    let summaries: Vec<AlertSummaryDto> = board.alerts.into_iter().map(Into::into).collect();
    Ok(Json(summaries))
}

/// Get summaries of archived (resolved / rejected) alerts
pub async fn get_alert_history(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<AlertSummaryDto>>, StatusCode> {
    let board = state
        .get_board_state_usecase
        .execute()
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    let summaries: Vec<AlertSummaryDto> = board.history.into_iter().map(Into::into).collect();
    Ok(Json(summaries))
}
