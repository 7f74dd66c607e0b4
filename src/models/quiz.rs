// src/models/quiz.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::question::{Question, deserialize_questions, validate_questions};

/// A short practice quiz, usually attached to a tutorial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: String,
    pub course_id: String,
    pub tutorial_id: Option<String>,
    pub title: String,

    #[serde(deserialize_with = "deserialize_questions")]
    pub questions: Vec<Question>,

    /// Minimum percentage needed to pass.
    pub passing_score: u32,

    /// Minutes allowed; `None` falls back to the engine default.
    pub time_limit: Option<u32>,

    pub order: i32,
}

/// DTO for creating a new quiz.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuizRequest {
    #[validate(length(min = 1, max = 100))]
    pub course_id: String,
    #[validate(length(min = 1, max = 100))]
    pub tutorial_id: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(deserialize_with = "deserialize_questions")]
    #[validate(custom(function = validate_questions))]
    pub questions: Vec<Question>,
    #[serde(default = "default_passing_score")]
    #[validate(range(max = 100))]
    pub passing_score: u32,
    #[serde(default = "default_time_limit")]
    #[validate(range(max = 1440))]
    pub time_limit: Option<u32>,
    #[serde(default)]
    pub order: i32,
}

fn default_passing_score() -> u32 {
    70
}

fn default_time_limit() -> Option<u32> {
    Some(30)
}

impl CreateQuizRequest {
    pub fn into_quiz(self, id: String) -> Quiz {
        Quiz {
            id,
            course_id: self.course_id,
            tutorial_id: self.tutorial_id,
            title: self.title,
            questions: self.questions,
            passing_score: self.passing_score,
            time_limit: self.time_limit,
            order: self.order,
        }
    }
}

/// Query parameters for listing quizzes or exams.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentListParams {
    pub course_id: Option<String>,
}
