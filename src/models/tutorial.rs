// src/models/tutorial.rs

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Lower-case words joined by single hyphens, e.g. "javascript-variables".
static SLUG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("slug pattern is valid"));

/// A tutorial page belonging to a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tutorial {
    pub id: String,
    pub course_id: String,
    pub title: String,

    /// URL-friendly unique key; tutorials are fetched by slug.
    pub slug: String,

    /// Sanitized HTML body.
    pub content: String,

    pub code_example: Option<String>,
    pub language: String,
    pub difficulty: String,

    /// Estimated reading time in minutes.
    pub read_time: i32,

    pub order: i32,

    /// Ids of the neighbouring tutorials, for prev/next navigation.
    pub next_tutorial: Option<String>,
    pub prev_tutorial: Option<String>,
}

/// DTO for creating a new tutorial.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTutorialRequest {
    #[validate(length(min = 1, max = 100))]
    pub course_id: String,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 200), custom(function = validate_slug))]
    pub slug: String,
    #[validate(length(min = 1, max = 100000))]
    pub content: String,
    #[validate(length(max = 20000))]
    pub code_example: Option<String>,
    #[serde(default = "default_language")]
    #[validate(length(min = 1, max = 30))]
    pub language: String,
    #[serde(default = "default_difficulty")]
    #[validate(length(min = 1, max = 30))]
    pub difficulty: String,
    #[serde(default = "default_read_time")]
    #[validate(range(min = 1, max = 600))]
    pub read_time: i32,
    #[serde(default)]
    pub order: i32,
    pub next_tutorial: Option<String>,
    pub prev_tutorial: Option<String>,
}

fn default_language() -> String {
    "javascript".to_string()
}

fn default_difficulty() -> String {
    "beginner".to_string()
}

fn default_read_time() -> i32 {
    10
}

fn validate_slug(slug: &str) -> Result<(), validator::ValidationError> {
    if !SLUG_PATTERN.is_match(slug) {
        return Err(validator::ValidationError::new("invalid_slug"));
    }
    Ok(())
}

impl CreateTutorialRequest {
    pub fn into_tutorial(self, id: String) -> Tutorial {
        Tutorial {
            id,
            course_id: self.course_id,
            title: self.title,
            slug: self.slug,
            content: self.content,
            code_example: self.code_example,
            language: self.language,
            difficulty: self.difficulty,
            read_time: self.read_time,
            order: self.order,
            next_tutorial: self.next_tutorial,
            prev_tutorial: self.prev_tutorial,
        }
    }
}

/// Query parameters for listing tutorials.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TutorialListParams {
    pub category: Option<String>,
    pub course_id: Option<String>,
}

/// Query parameters for the search endpoint.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_pattern() {
        assert!(validate_slug("javascript-variables").is_ok());
        assert!(validate_slug("sql101").is_ok());
        assert!(validate_slug("Bad Slug").is_err());
        assert!(validate_slug("trailing-").is_err());
        assert!(validate_slug("double--dash").is_err());
    }

    #[test]
    fn create_request_fills_defaults() {
        let req: CreateTutorialRequest = serde_json::from_value(serde_json::json!({
            "courseId": "frontend",
            "title": "Flexbox",
            "slug": "css-flexbox",
            "content": "<p>Flex</p>"
        }))
        .unwrap();

        assert!(req.validate().is_ok());
        assert_eq!(req.language, "javascript");
        assert_eq!(req.difficulty, "beginner");
        assert_eq!(req.read_time, 10);
        assert_eq!(req.order, 0);
    }
}
