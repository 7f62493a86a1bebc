//! Axum route handlers for the History API.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::history::{HistoryEntry, HistoryUpdate};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct HistoryQuery {
    pub user_id: Uuid,
    pub limit: Option<i64>,
}

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Deserialize)]
pub struct UpdateHistoryRequest {
    pub user_id: Uuid,
    #[serde(flatten)]
    pub update: HistoryUpdate,
}

/// GET /api/v1/history
pub async fn handle_list_history(
    State(state): State<AppState>,
    Query(params): Query<HistoryQuery>,
) -> Result<Json<Vec<HistoryEntry>>, AppError> {
    let page_size = state.config.history_page_size;
    let limit = params.limit.unwrap_or(page_size).clamp(1, page_size);
    let entries = state.history.list_recent(params.user_id, limit).await?;
    Ok(Json(entries))
}

/// PUT /api/v1/history/:id
pub async fn handle_update_history(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateHistoryRequest>,
) -> Result<Json<HistoryEntry>, AppError> {
    if req.update.prompt.trim().is_empty() {
        return Err(AppError::Validation("prompt cannot be empty".to_string()));
    }

    let entry = state
        .history
        .update(req.user_id, id, req.update)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("History entry {id} not found")))?;

    Ok(Json(entry))
}

/// DELETE /api/v1/history/:id
pub async fn handle_delete_history(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<StatusCode, AppError> {
    if !state.history.delete(params.user_id, id).await? {
        return Err(AppError::NotFound(format!("History entry {id} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}
