// src/models/course.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A course groups tutorials, quizzes and an optional certification exam.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub title: String,
    pub description: String,

    /// Icon identifier used by the client (e.g., "fas fa-server").
    pub icon: String,

    /// Category slug (e.g., "frontend", "cloud").
    pub category: String,

    /// Accent colour as a CSS hex string.
    pub color: String,

    /// Position in the catalogue; listings sort ascending on this.
    pub order: i32,

    pub certificate_available: bool,
    pub exam_required: bool,

    /// Free text such as "8 weeks".
    pub duration: Option<String>,

    /// beginner, intermediate, advanced or professional.
    pub level: String,
}

/// DTO for creating a new course.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 5000))]
    pub description: String,
    #[validate(length(min = 1, max = 100))]
    pub icon: String,
    #[validate(length(min = 1, max = 50))]
    pub category: String,
    #[validate(length(min = 1, max = 20))]
    pub color: String,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub certificate_available: bool,
    #[serde(default)]
    pub exam_required: bool,
    #[validate(length(max = 50))]
    pub duration: Option<String>,
    #[serde(default = "default_level")]
    #[validate(custom(function = validate_level))]
    pub level: String,
}

fn default_level() -> String {
    "beginner".to_string()
}

fn validate_level(level: &str) -> Result<(), validator::ValidationError> {
    match level {
        "beginner" | "intermediate" | "advanced" | "professional" => Ok(()),
        _ => Err(validator::ValidationError::new("invalid_level")),
    }
}

impl CreateCourseRequest {
    /// Builds the stored record under the given id.
    pub fn into_course(self, id: String) -> Course {
        Course {
            id,
            title: self.title,
            description: self.description,
            icon: self.icon,
            category: self.category,
            color: self.color,
            order: self.order,
            certificate_available: self.certificate_available,
            exam_required: self.exam_required,
            duration: self.duration,
            level: self.level,
        }
    }
}
