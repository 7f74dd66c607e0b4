// src/handlers/course.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    error::AppError,
    models::course::CreateCourseRequest,
    store::Storage,
    utils::extract::ValidatedJson,
};

/// Lists all courses, sorted by their catalogue order.
pub async fn list_courses(
    State(store): State<Arc<dyn Storage>>,
) -> Result<impl IntoResponse, AppError> {
    let courses = store.list_courses().await?;
    Ok(Json(courses))
}

/// Retrieves a single course by ID.
pub async fn get_course(
    State(store): State<Arc<dyn Storage>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let course = store
        .get_course(&id)
        .await?
        .ok_or(AppError::NotFound("Course not found".to_string()))?;

    Ok(Json(course))
}

/// Creates a course and returns it with its generated ID.
pub async fn create_course(
    State(store): State<Arc<dyn Storage>>,
    ValidatedJson(payload): ValidatedJson<CreateCourseRequest>,
) -> Result<impl IntoResponse, AppError> {
    let course = store.create_course(payload).await?;
    tracing::info!("Course created: {} ({})", course.title, course.id);

    Ok((StatusCode::CREATED, Json(course)))
}
