// src/store/mod.rs

//! Content store: the only owner of persisted entities.

pub mod memory;
pub mod seed;

use async_trait::async_trait;

pub use memory::MemStorage;

use crate::{
    error::AppError,
    models::{
        certificate::{Certificate, NewCertificate},
        course::{Course, CreateCourseRequest},
        exam::{CreateExamRequest, Exam},
        progress::{CreateProgressRequest, UserProgress},
        quiz::{CreateQuizRequest, Quiz},
        tutorial::{CreateTutorialRequest, Tutorial, TutorialListParams},
    },
};

/// Which tutorials to list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TutorialFilter {
    All,
    /// Tutorials whose course has this category.
    Category(String),
    Course(String),
}

impl From<TutorialListParams> for TutorialFilter {
    /// Category takes precedence when both are given.
    fn from(params: TutorialListParams) -> Self {
        match (params.category, params.course_id) {
            (Some(category), _) if !category.is_empty() => TutorialFilter::Category(category),
            (_, Some(course_id)) if !course_id.is_empty() => TutorialFilter::Course(course_id),
            _ => TutorialFilter::All,
        }
    }
}

/// Create-and-read access to every collection. There is no update or delete:
/// records are written once, and progress "updates" are new rows.
///
/// `create_*` methods assign a fresh unique id. Lookups return `None` when the
/// id does not resolve; handlers turn that into `AppError::NotFound`.
#[async_trait]
pub trait Storage: Send + Sync {
    // Courses
    /// Sorted by `order` ascending; ties keep insertion order.
    async fn list_courses(&self) -> Result<Vec<Course>, AppError>;
    async fn get_course(&self, id: &str) -> Result<Option<Course>, AppError>;
    async fn create_course(&self, data: CreateCourseRequest) -> Result<Course, AppError>;

    // Tutorials
    /// Sorted by `order` ascending.
    async fn list_tutorials(&self, filter: TutorialFilter) -> Result<Vec<Tutorial>, AppError>;
    async fn get_tutorial(&self, id: &str) -> Result<Option<Tutorial>, AppError>;
    async fn get_tutorial_by_slug(&self, slug: &str) -> Result<Option<Tutorial>, AppError>;
    /// Fails with `BadRequest` when the slug is taken.
    async fn create_tutorial(&self, data: CreateTutorialRequest) -> Result<Tutorial, AppError>;
    /// Case-insensitive substring match on title or content.
    async fn search_tutorials(&self, query: &str) -> Result<Vec<Tutorial>, AppError>;

    // Quizzes
    async fn list_quizzes(&self, course_id: Option<&str>) -> Result<Vec<Quiz>, AppError>;
    async fn get_quiz(&self, id: &str) -> Result<Option<Quiz>, AppError>;
    async fn create_quiz(&self, data: CreateQuizRequest) -> Result<Quiz, AppError>;

    // Exams
    async fn list_exams(&self, course_id: Option<&str>) -> Result<Vec<Exam>, AppError>;
    async fn get_exam(&self, id: &str) -> Result<Option<Exam>, AppError>;
    async fn create_exam(&self, data: CreateExamRequest) -> Result<Exam, AppError>;

    // Certificates
    async fn get_certificate(&self, id: &str) -> Result<Option<Certificate>, AppError>;
    async fn get_certificate_by_number(&self, number: &str) -> Result<Option<Certificate>, AppError>;
    async fn create_certificate(&self, data: NewCertificate) -> Result<Certificate, AppError>;
    /// In issuance order.
    async fn list_certificates_by_user(&self, user_id: &str) -> Result<Vec<Certificate>, AppError>;

    // User progress
    async fn list_progress_by_user(&self, user_id: &str) -> Result<Vec<UserProgress>, AppError>;
    async fn record_progress(&self, data: CreateProgressRequest) -> Result<UserProgress, AppError>;
}
