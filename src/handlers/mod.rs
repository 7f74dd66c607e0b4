// src/handlers/mod.rs

pub mod certificate;
pub mod course;
pub mod exam;
pub mod progress;
pub mod quiz;
pub mod tutorial;

use axum::{Json, response::IntoResponse};

/// Liveness probe.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}
