// src/handlers/tutorial.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    error::AppError,
    models::tutorial::{CreateTutorialRequest, SearchParams, TutorialListParams},
    store::Storage,
    utils::{extract::ValidatedJson, html::clean_html},
};

/// Lists tutorials, optionally filtered by course category or course ID.
pub async fn list_tutorials(
    State(store): State<Arc<dyn Storage>>,
    Query(params): Query<TutorialListParams>,
) -> Result<impl IntoResponse, AppError> {
    let tutorials = store.list_tutorials(params.into()).await?;
    Ok(Json(tutorials))
}

/// Retrieves a single tutorial by its slug.
pub async fn get_tutorial_by_slug(
    State(store): State<Arc<dyn Storage>>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let tutorial = store
        .get_tutorial_by_slug(&slug)
        .await?
        .ok_or(AppError::NotFound("Tutorial not found".to_string()))?;

    Ok(Json(tutorial))
}

pub async fn get_tutorial(
    State(store): State<Arc<dyn Storage>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let tutorial = store
        .get_tutorial(&id)
        .await?
        .ok_or(AppError::NotFound("Tutorial not found".to_string()))?;

    Ok(Json(tutorial))
}

/// Creates a tutorial.
///
/// * The owning course must exist.
/// * HTML content is sanitized before it is stored.
/// * Slugs are unique; a taken slug is rejected with 400.
pub async fn create_tutorial(
    State(store): State<Arc<dyn Storage>>,
    ValidatedJson(mut payload): ValidatedJson<CreateTutorialRequest>,
) -> Result<impl IntoResponse, AppError> {
    if store.get_course(&payload.course_id).await?.is_none() {
        return Err(AppError::BadRequest(format!(
            "Unknown course '{}'",
            payload.course_id
        )));
    }

    payload.content = clean_html(&payload.content);
    let tutorial = store.create_tutorial(payload).await?;
    tracing::info!("Tutorial created: {} ({})", tutorial.slug, tutorial.id);

    Ok((StatusCode::CREATED, Json(tutorial)))
}

/// Searches tutorial titles and content. Short or missing queries return `[]`.
pub async fn search(
    State(store): State<Arc<dyn Storage>>,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, AppError> {
    let results = match params.q {
        Some(q) => store.search_tutorials(&q).await?,
        None => Vec::new(),
    };

    Ok(Json(results))
}
