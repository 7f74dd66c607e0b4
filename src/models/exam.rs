// src/models/exam.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::question::{Question, deserialize_questions, validate_questions};

/// A certification exam. Passing one issues a certificate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exam {
    pub id: String,
    pub course_id: String,
    pub title: String,
    pub description: String,

    #[serde(deserialize_with = "deserialize_questions")]
    pub questions: Vec<Question>,

    pub passing_score: u32,

    /// Minutes allowed.
    pub time_limit: u32,

    /// Client-side template key for rendering the certificate.
    pub certificate_template: Option<String>,
}

/// DTO for creating a new exam.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateExamRequest {
    #[validate(length(min = 1, max = 100))]
    pub course_id: String,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 5000))]
    pub description: String,
    #[serde(deserialize_with = "deserialize_questions")]
    #[validate(custom(function = validate_questions))]
    pub questions: Vec<Question>,
    #[serde(default = "default_passing_score")]
    #[validate(range(max = 100))]
    pub passing_score: u32,
    #[serde(default = "default_time_limit")]
    #[validate(range(min = 1, max = 1440))]
    pub time_limit: u32,
    #[validate(length(max = 100))]
    pub certificate_template: Option<String>,
}

fn default_passing_score() -> u32 {
    80
}

fn default_time_limit() -> u32 {
    120
}

impl CreateExamRequest {
    pub fn into_exam(self, id: String) -> Exam {
        Exam {
            id,
            course_id: self.course_id,
            title: self.title,
            description: self.description,
            questions: self.questions,
            passing_score: self.passing_score,
            time_limit: self.time_limit,
            certificate_template: self.certificate_template,
        }
    }
}
