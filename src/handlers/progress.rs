// src/handlers/progress.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    error::AppError,
    models::progress::CreateProgressRequest,
    store::Storage,
    utils::extract::ValidatedJson,
};

/// Appends a progress row. Existing rows are never modified.
pub async fn record_progress(
    State(store): State<Arc<dyn Storage>>,
    ValidatedJson(payload): ValidatedJson<CreateProgressRequest>,
) -> Result<impl IntoResponse, AppError> {
    let progress = store.record_progress(payload).await?;
    Ok((StatusCode::CREATED, Json(progress)))
}

pub async fn list_user_progress(
    State(store): State<Arc<dyn Storage>>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let progress = store.list_progress_by_user(&user_id).await?;
    Ok(Json(progress))
}
