// src/models/attempt.rs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    assessment::{Outcome, ReviewItem},
    models::certificate::Certificate,
};

/// DTO for submitting a finished quiz or exam attempt.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAttemptRequest {
    #[validate(length(min = 1, max = 128))]
    pub user_id: String,

    /// Client-generated id of this attempt, fixed from start to submit.
    /// Repeat submits with the same id return the first result unchanged.
    #[validate(length(min = 1, max = 128))]
    pub attempt_id: String,

    /// User's answers map.
    /// Key: question index (0-based)
    /// Value: selected option index
    #[serde(default)]
    pub answers: BTreeMap<usize, usize>,

    /// Set when the client's countdown expired; partial answer sets are accepted.
    #[serde(default)]
    pub timed_out: bool,
}

/// Result returned after grading an attempt.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptResultResponse {
    pub attempt_id: String,
    #[serde(flatten)]
    pub outcome: Outcome,
    pub review: Vec<ReviewItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate: Option<Certificate>,
}
