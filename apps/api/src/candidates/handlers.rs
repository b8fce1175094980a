use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::candidates::models::CandidateRecord;
use crate::errors::AppError;
use crate::state::AppState;

/// POST /api/candidates
pub async fn handle_create(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<CandidateRecord>), AppError> {
    let Json(payload) = payload?;
    let record = state.candidates.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/candidates
pub async fn handle_list(
    State(state): State<AppState>,
) -> Result<Json<Vec<CandidateRecord>>, AppError> {
    Ok(Json(state.candidates.list().await?))
}

/// GET /api/candidates/:id
pub async fn handle_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CandidateRecord>, AppError> {
    Ok(Json(state.candidates.get(&id).await?))
}

/// PUT /api/candidates/:id
pub async fn handle_update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<CandidateRecord>, AppError> {
    let Json(patch) = payload?;
    Ok(Json(state.candidates.update(&id, &patch).await?))
}

/// DELETE /api/candidates/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    state.candidates.delete(&id).await?;
    Ok(Json(json!({ "message": "Candidate deleted successfully" })))
}
