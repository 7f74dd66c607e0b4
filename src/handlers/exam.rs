// src/handlers/exam.rs

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
    certification::CertificateIssuer,
    error::AppError,
    models::{
        attempt::{AttemptResultResponse, SubmitAttemptRequest},
        exam::CreateExamRequest,
        progress::CreateProgressRequest,
        quiz::AssessmentListParams,
    },
    state::Submissions,
    store::Storage,
    utils::extract::ValidatedJson,
};

/// Lists certification exams, optionally for one course.
pub async fn list_exams(
    State(store): State<Arc<dyn Storage>>,
    Query(params): Query<AssessmentListParams>,
) -> Result<impl IntoResponse, AppError> {
    let exams = store.list_exams(params.course_id.as_deref()).await?;
    Ok(Json(exams))
}

pub async fn get_exam(
    State(store): State<Arc<dyn Storage>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let exam = store
        .get_exam(&id)
        .await?
        .ok_or(AppError::NotFound("Exam not found".to_string()))?;

    Ok(Json(exam))
}

pub async fn create_exam(
    State(store): State<Arc<dyn Storage>>,
    ValidatedJson(payload): ValidatedJson<CreateExamRequest>,
) -> Result<impl IntoResponse, AppError> {
    if store.get_course(&payload.course_id).await?.is_none() {
        return Err(AppError::BadRequest(format!(
            "Unknown course '{}'",
            payload.course_id
        )));
    }

    let exam = store.create_exam(payload).await?;
    Ok((StatusCode::CREATED, Json(exam)))
}

/// Submits a certification exam.
/// Logs a progress row and, if the score reaches the passing score, issues a certificate.
/// Runs once per `attemptId`, so a duplicate submit never issues a second certificate.
pub async fn submit_exam(
    State(store): State<Arc<dyn Storage>>,
    State(issuer): State<Arc<CertificateIssuer>>,
    State(submissions): State<Arc<Submissions>>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<SubmitAttemptRequest>,
) -> Result<impl IntoResponse, AppError> {
    let exam = store
        .get_exam(&id)
        .await?
        .ok_or(AppError::NotFound("Exam not found".to_string()))?;

    let key = format!("exam:{}:{}:{}", exam.id, req.user_id, req.attempt_id);
    let recorded = submissions
        .submit_once(key, || async {
            let (attempt, outcome) =
                Attempt::replay(Arc::new(Assessment::from(&exam)), &req.answers, req.timed_out)?;

            store
                .record_progress(CreateProgressRequest {
                    user_id: req.user_id.clone(),
                    course_id: Some(exam.course_id.clone()),
                    completed: outcome.passed,
                    score: Some(outcome.score),
                    completed_at: Some(Utc::now()),
                    ..Default::default()
                })
                .await?;

            let certificate = if outcome.passed {
                Some(
                    issuer
                        .issue(&req.user_id, &exam.course_id, &exam.id, outcome.score)
                        .await?,
                )
            } else {
                tracing::info!(
                    user_id = %req.user_id,
                    exam_id = %exam.id,
                    score = outcome.score,
                    required = exam.passing_score,
                    "Exam failed, no certificate issued"
                );
                None
            };

            Ok::<_, AppError>(AttemptResultResponse {
                attempt_id: req.attempt_id.clone(),
                outcome,
                review: attempt.review().unwrap_or_default(),
                certificate,
            })
        })
        .await?;

    if !recorded.is_first() {
        tracing::info!(
            attempt_id = %req.attempt_id,
            exam_id = %exam.id,
            "Exam attempt already submitted, returning stored result"
        );
    }

    Ok(Json(recorded.into_inner()))
}
