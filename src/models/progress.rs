// src/models/progress.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// One row of a user's learning log. Rows are appended, never updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProgress {
    pub id: String,
    pub user_id: String,
    pub tutorial_id: Option<String>,
    pub quiz_id: Option<String>,
    pub course_id: Option<String>,
    pub completed: bool,
    pub score: Option<u32>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// DTO for appending a progress row.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProgressRequest {
    #[validate(length(min = 1, max = 128))]
    pub user_id: String,
    #[validate(length(min = 1, max = 100))]
    pub tutorial_id: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub quiz_id: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub course_id: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[validate(range(max = 100))]
    pub score: Option<u32>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl CreateProgressRequest {
    pub fn into_progress(self, id: String) -> UserProgress {
        UserProgress {
            id,
            user_id: self.user_id,
            tutorial_id: self.tutorial_id,
            quiz_id: self.quiz_id,
            course_id: self.course_id,
            completed: self.completed,
            score: self.score,
            completed_at: self.completed_at,
        }
    }
}
