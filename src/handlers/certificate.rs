// src/handlers/certificate.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    certification::CertificateIssuer,
    error::AppError,
    models::certificate::CreateCertificateRequest,
    store::Storage,
    utils::extract::ValidatedJson,
};

/// Issues a certificate for an exam the caller has already graded as passed.
/// The exam must exist, belong to the given course, and the score must reach
/// its passing score.
pub async fn create_certificate(
    State(store): State<Arc<dyn Storage>>,
    State(issuer): State<Arc<CertificateIssuer>>,
    ValidatedJson(payload): ValidatedJson<CreateCertificateRequest>,
) -> Result<impl IntoResponse, AppError> {
    let exam = store
        .get_exam(&payload.exam_id)
        .await?
        .ok_or(AppError::NotFound("Exam not found".to_string()))?;

    if exam.course_id != payload.course_id {
        return Err(AppError::BadRequest(
            "Exam does not belong to the given course".to_string(),
        ));
    }

    if payload.score < exam.passing_score {
        return Err(AppError::BadRequest(format!(
            "Score {} is below the passing score of {}",
            payload.score, exam.passing_score
        )));
    }

    let certificate = issuer
        .issue(&payload.user_id, &exam.course_id, &exam.id, payload.score)
        .await?;

    Ok((StatusCode::CREATED, Json(certificate)))
}

pub async fn get_certificate(
    State(store): State<Arc<dyn Storage>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let certificate = store
        .get_certificate(&id)
        .await?
        .ok_or(AppError::NotFound("Certificate not found".to_string()))?;

    Ok(Json(certificate))
}

/// Looks up a certificate by the number printed on it.
pub async fn verify_certificate(
    State(store): State<Arc<dyn Storage>>,
    Path(number): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let certificate = store
        .get_certificate_by_number(&number.to_uppercase())
        .await?
        .ok_or(AppError::NotFound("Certificate not found".to_string()))?;

    Ok(Json(certificate))
}

/// Lists a user's certificates in issuance order.
pub async fn list_user_certificates(
    State(store): State<Arc<dyn Storage>>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let certificates = store.list_certificates_by_user(&user_id).await?;
    Ok(Json(certificates))
}
