// src/handlers/quiz.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;

use crate::{
    assessment::{Assessment, Attempt},
    error::AppError,
    models::{
        attempt::{AttemptResultResponse, SubmitAttemptRequest},
        progress::CreateProgressRequest,
        quiz::{AssessmentListParams, CreateQuizRequest},
    },
    state::Submissions,
    store::Storage,
    utils::extract::ValidatedJson,
};

/// Lists quizzes, optionally for one course.
pub async fn list_quizzes(
    State(store): State<Arc<dyn Storage>>,
    Query(params): Query<AssessmentListParams>,
) -> Result<impl IntoResponse, AppError> {
    let quizzes = store.list_quizzes(params.course_id.as_deref()).await?;
    Ok(Json(quizzes))
}

/// Retrieves a quiz with its questions.
pub async fn get_quiz(
    State(store): State<Arc<dyn Storage>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let quiz = store
        .get_quiz(&id)
        .await?
        .ok_or(AppError::NotFound("Quiz not found".to_string()))?;

    Ok(Json(quiz))
}

pub async fn create_quiz(
    State(store): State<Arc<dyn Storage>>,
    ValidatedJson(payload): ValidatedJson<CreateQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    if store.get_course(&payload.course_id).await?.is_none() {
        return Err(AppError::BadRequest(format!(
            "Unknown course '{}'",
            payload.course_id
        )));
    }

    let quiz = store.create_quiz(payload).await?;
    Ok((StatusCode::CREATED, Json(quiz)))
}

/// Grades a finished quiz attempt.
///
/// * Replays the answer sheet through the assessment engine.
/// * Unless `timedOut` is set, every question must be answered.
/// * Appends a progress row for the user.
/// * Runs once per `attemptId`; repeats get the stored result back.
pub async fn submit_quiz(
    State(store): State<Arc<dyn Storage>>,
    State(submissions): State<Arc<Submissions>>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<SubmitAttemptRequest>,
) -> Result<impl IntoResponse, AppError> {
    let quiz = store
        .get_quiz(&id)
        .await?
        .ok_or(AppError::NotFound("Quiz not found".to_string()))?;

    let key = format!("quiz:{}:{}:{}", quiz.id, req.user_id, req.attempt_id);
    let recorded = submissions
        .submit_once(key, || async {
            let (attempt, outcome) =
                Attempt::replay(Arc::new(Assessment::from(&quiz)), &req.answers, req.timed_out)?;

            store
                .record_progress(CreateProgressRequest {
                    user_id: req.user_id.clone(),
                    tutorial_id: quiz.tutorial_id.clone(),
                    quiz_id: Some(quiz.id.clone()),
                    course_id: Some(quiz.course_id.clone()),
                    completed: outcome.passed,
                    score: Some(outcome.score),
                    completed_at: Some(Utc::now()),
                })
                .await?;

            tracing::info!(
                user_id = %req.user_id,
                quiz_id = %quiz.id,
                score = outcome.score,
                passed = outcome.passed,
                timed_out = req.timed_out,
                "Quiz submitted"
            );

            Ok::<_, AppError>(AttemptResultResponse {
                attempt_id: req.attempt_id.clone(),
                outcome,
                review: attempt.review().unwrap_or_default(),
                certificate: None,
            })
        })
        .await?;

    if !recorded.is_first() {
        tracing::info!(
            attempt_id = %req.attempt_id,
            quiz_id = %quiz.id,
            "Quiz attempt already submitted, returning stored result"
        );
    }

    Ok(Json(recorded.into_inner()))
}
