// src/store/memory.rs

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Storage, TutorialFilter};
use crate::{
    config::SEARCH_MIN_QUERY_LEN,
    error::AppError,
    models::{
        certificate::{Certificate, NewCertificate},
        course::{Course, CreateCourseRequest},
        exam::{CreateExamRequest, Exam},
        progress::{CreateProgressRequest, UserProgress},
        quiz::{CreateQuizRequest, Quiz},
        tutorial::{CreateTutorialRequest, Tutorial},
    },
};

/// Anything stored in a [`Table`].
pub(crate) trait Record: Clone + Send + Sync {
    fn id(&self) -> &str;
}

macro_rules! impl_record {
    ($($ty:ty),* $(,)?) => {
        $(impl Record for $ty {
            fn id(&self) -> &str {
                &self.id
            }
        })*
    };
}

impl_record!(Course, Tutorial, Quiz, Exam, Certificate, UserProgress);

struct Rows<T> {
    items: Vec<T>,
    by_id: HashMap<String, usize>,
}

/// Insertion-ordered map of records keyed by id.
pub(crate) struct Table<T> {
    rows: RwLock<Rows<T>>,
}

impl<T: Record> Table<T> {
    fn new() -> Self {
        Self {
            rows: RwLock::new(Rows {
                items: Vec::new(),
                by_id: HashMap::new(),
            }),
        }
    }

    async fn all(&self) -> Vec<T> {
        self.rows.read().await.items.clone()
    }

    async fn get(&self, id: &str) -> Option<T> {
        let rows = self.rows.read().await;
        rows.by_id.get(id).map(|&i| rows.items[i].clone())
    }

    async fn find<F>(&self, predicate: F) -> Option<T>
    where
        F: Fn(&T) -> bool + Send,
    {
        self.rows.read().await.items.iter().find(|r| predicate(r)).cloned()
    }

    async fn filter<F>(&self, predicate: F) -> Vec<T>
    where
        F: Fn(&T) -> bool + Send,
    {
        self.rows
            .read()
            .await
            .items
            .iter()
            .filter(|r| predicate(r))
            .cloned()
            .collect()
    }

    /// Inserts `record`, replacing in place any row with the same id.
    pub(crate) async fn insert(&self, record: T) -> T {
        let mut rows = self.rows.write().await;
        Self::put(&mut rows, record.clone());
        record
    }

    /// Inserts `record` unless an existing row `clashes` with it.
    /// The check and the insert happen under one write lock.
    async fn insert_unless<F>(&self, record: T, clashes: F) -> Option<T>
    where
        F: Fn(&T) -> bool + Send,
    {
        let mut rows = self.rows.write().await;
        if rows.items.iter().any(|r| clashes(r)) {
            return None;
        }
        Self::put(&mut rows, record.clone());
        Some(record)
    }

    fn put(rows: &mut Rows<T>, record: T) {
        match rows.by_id.get(record.id()) {
            Some(&i) => rows.items[i] = record,
            None => {
                rows.by_id.insert(record.id().to_string(), rows.items.len());
                rows.items.push(record);
            }
        }
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// In-memory store. Everything is lost on restart.
///
/// Built once at startup and shared through the router state.
pub struct MemStorage {
    pub(crate) courses: Table<Course>,
    pub(crate) tutorials: Table<Tutorial>,
    pub(crate) quizzes: Table<Quiz>,
    pub(crate) exams: Table<Exam>,
    pub(crate) certificates: Table<Certificate>,
    pub(crate) progress: Table<UserProgress>,
}

impl Default for MemStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemStorage {
    pub fn new() -> Self {
        Self {
            courses: Table::new(),
            tutorials: Table::new(),
            quizzes: Table::new(),
            exams: Table::new(),
            certificates: Table::new(),
            progress: Table::new(),
        }
    }
}

#[async_trait]
impl Storage for MemStorage {
    async fn list_courses(&self) -> Result<Vec<Course>, AppError> {
        let mut courses = self.courses.all().await;
        // Stable sort keeps insertion order among equal `order` values.
        courses.sort_by_key(|c| c.order);
        Ok(courses)
    }

    async fn get_course(&self, id: &str) -> Result<Option<Course>, AppError> {
        Ok(self.courses.get(id).await)
    }

    async fn create_course(&self, data: CreateCourseRequest) -> Result<Course, AppError> {
        let course = self.courses.insert(data.into_course(new_id())).await;
        tracing::debug!(course_id = %course.id, "Course created");
        Ok(course)
    }

    async fn list_tutorials(&self, filter: TutorialFilter) -> Result<Vec<Tutorial>, AppError> {
        let mut tutorials = match filter {
            TutorialFilter::All => self.tutorials.all().await,
            TutorialFilter::Course(course_id) => {
                self.tutorials.filter(|t| t.course_id == course_id).await
            }
            TutorialFilter::Category(category) => {
                let course_ids: HashSet<String> = self
                    .courses
                    .filter(|c| c.category == category)
                    .await
                    .into_iter()
                    .map(|c| c.id)
                    .collect();
                self.tutorials
                    .filter(|t| course_ids.contains(&t.course_id))
                    .await
            }
        };
        tutorials.sort_by_key(|t| t.order);
        Ok(tutorials)
    }

    async fn get_tutorial(&self, id: &str) -> Result<Option<Tutorial>, AppError> {
        Ok(self.tutorials.get(id).await)
    }

    async fn get_tutorial_by_slug(&self, slug: &str) -> Result<Option<Tutorial>, AppError> {
        Ok(self.tutorials.find(|t| t.slug == slug).await)
    }

    async fn create_tutorial(&self, data: CreateTutorialRequest) -> Result<Tutorial, AppError> {
        let slug = data.slug.clone();
        self.tutorials
            .insert_unless(data.into_tutorial(new_id()), |t| t.slug == slug)
            .await
            .ok_or_else(|| AppError::BadRequest(format!("Tutorial slug '{}' already exists", slug)))
    }

    async fn search_tutorials(&self, query: &str) -> Result<Vec<Tutorial>, AppError> {
        let query = query.trim();
        if query.chars().count() < SEARCH_MIN_QUERY_LEN {
            return Ok(Vec::new());
        }

        let needle = query.to_lowercase();
        let mut hits = self
            .tutorials
            .filter(|t| {
                t.title.to_lowercase().contains(&needle)
                    || t.content.to_lowercase().contains(&needle)
            })
            .await;
        hits.sort_by_key(|t| t.order);
        Ok(hits)
    }

    async fn list_quizzes(&self, course_id: Option<&str>) -> Result<Vec<Quiz>, AppError> {
        let mut quizzes = match course_id {
            Some(course_id) => self.quizzes.filter(|q| q.course_id == course_id).await,
            None => self.quizzes.all().await,
        };
        quizzes.sort_by_key(|q| q.order);
        Ok(quizzes)
    }

    async fn get_quiz(&self, id: &str) -> Result<Option<Quiz>, AppError> {
        Ok(self.quizzes.get(id).await)
    }

    async fn create_quiz(&self, data: CreateQuizRequest) -> Result<Quiz, AppError> {
        Ok(self.quizzes.insert(data.into_quiz(new_id())).await)
    }

    async fn list_exams(&self, course_id: Option<&str>) -> Result<Vec<Exam>, AppError> {
        Ok(match course_id {
            Some(course_id) => self.exams.filter(|e| e.course_id == course_id).await,
            None => self.exams.all().await,
        })
    }

    async fn get_exam(&self, id: &str) -> Result<Option<Exam>, AppError> {
        Ok(self.exams.get(id).await)
    }

    async fn create_exam(&self, data: CreateExamRequest) -> Result<Exam, AppError> {
        Ok(self.exams.insert(data.into_exam(new_id())).await)
    }

    async fn get_certificate(&self, id: &str) -> Result<Option<Certificate>, AppError> {
        Ok(self.certificates.get(id).await)
    }

    async fn get_certificate_by_number(&self, number: &str) -> Result<Option<Certificate>, AppError> {
        Ok(self
            .certificates
            .find(|c| c.certificate_number == number)
            .await)
    }

    async fn create_certificate(&self, data: NewCertificate) -> Result<Certificate, AppError> {
        let number = data.certificate_number.clone();
        self.certificates
            .insert_unless(data.into_certificate(new_id()), |c| c.certificate_number == number)
            .await
            .ok_or_else(|| {
                AppError::InternalServerError(format!("Duplicate certificate number {}", number))
            })
    }

    async fn list_certificates_by_user(&self, user_id: &str) -> Result<Vec<Certificate>, AppError> {
        Ok(self.certificates.filter(|c| c.user_id == user_id).await)
    }

    async fn list_progress_by_user(&self, user_id: &str) -> Result<Vec<UserProgress>, AppError> {
        Ok(self.progress.filter(|p| p.user_id == user_id).await)
    }

    async fn record_progress(&self, data: CreateProgressRequest) -> Result<UserProgress, AppError> {
        Ok(self.progress.insert(data.into_progress(new_id())).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tutorial::TutorialListParams;

    fn course(title: &str, category: &str, order: i32) -> CreateCourseRequest {
        serde_json::from_value(serde_json::json!({
            "title": title,
            "description": "d",
            "icon": "fas fa-book",
            "category": category,
            "color": "#000000",
            "order": order
        }))
        .unwrap()
    }

    fn tutorial(course_id: &str, title: &str, slug: &str, content: &str, order: i32) -> CreateTutorialRequest {
        serde_json::from_value(serde_json::json!({
            "courseId": course_id,
            "title": title,
            "slug": slug,
            "content": content,
            "order": order
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn courses_sorted_by_order_ties_keep_insertion() {
        let store = MemStorage::new();
        store.create_course(course("C", "x", 2)).await.unwrap();
        store.create_course(course("A", "x", 1)).await.unwrap();
        store.create_course(course("B1", "x", 2)).await.unwrap();
        store.create_course(course("Z", "x", 0)).await.unwrap();

        let titles: Vec<String> = store
            .list_courses()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.title)
            .collect();
        assert_eq!(titles, ["Z", "A", "C", "B1"]);
    }

    #[tokio::test]
    async fn create_assigns_unique_ids() {
        let store = MemStorage::new();
        let a = store.create_course(course("A", "x", 1)).await.unwrap();
        let b = store.create_course(course("A", "x", 1)).await.unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(store.get_course(&a.id).await.unwrap(), Some(a));
        assert_eq!(store.get_course("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn tutorial_filters() {
        let store = MemStorage::new();
        let fe = store.create_course(course("Frontend", "frontend", 1)).await.unwrap();
        let be = store.create_course(course("Backend", "backend", 2)).await.unwrap();

        store.create_tutorial(tutorial(&fe.id, "CSS", "css", "c", 2)).await.unwrap();
        store.create_tutorial(tutorial(&fe.id, "HTML", "html", "h", 1)).await.unwrap();
        store.create_tutorial(tutorial(&be.id, "Python", "python", "p", 1)).await.unwrap();

        let all = store.list_tutorials(TutorialFilter::All).await.unwrap();
        assert_eq!(all.len(), 3);

        let frontend = store
            .list_tutorials(TutorialFilter::Category("frontend".into()))
            .await
            .unwrap();
        let titles: Vec<_> = frontend.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["HTML", "CSS"]);

        let backend = store.list_tutorials(TutorialFilter::Course(be.id.clone())).await.unwrap();
        assert_eq!(backend.len(), 1);
        assert_eq!(backend[0].slug, "python");

        let none = store
            .list_tutorials(TutorialFilter::Category("database".into()))
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn filter_precedence() {
        let both = TutorialListParams {
            category: Some("frontend".into()),
            course_id: Some("backend".into()),
        };
        assert_eq!(TutorialFilter::from(both), TutorialFilter::Category("frontend".into()));
        assert_eq!(TutorialFilter::from(TutorialListParams::default()), TutorialFilter::All);
    }

    #[tokio::test]
    async fn duplicate_slug_rejected() {
        let store = MemStorage::new();
        store.create_tutorial(tutorial("c", "One", "same", "x", 1)).await.unwrap();
        let err = store
            .create_tutorial(tutorial("c", "Two", "same", "y", 2))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        let found = store.get_tutorial_by_slug("same").await.unwrap().unwrap();
        assert_eq!(found.title, "One");
        assert_eq!(store.get_tutorial(&found.id).await.unwrap(), Some(found));
    }

    #[tokio::test]
    async fn search_is_case_insensitive_with_min_length() {
        let store = MemStorage::new();
        store
            .create_tutorial(tutorial("fe", "JavaScript Variables", "js-vars", "let and const", 3))
            .await
            .unwrap();
        store
            .create_tutorial(tutorial("be", "Python Introduction", "py", "Unlike java, python...", 1))
            .await
            .unwrap();

        let hits = store.search_tutorials("java").await.unwrap();
        let titles: Vec<_> = hits.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["Python Introduction", "JavaScript Variables"]);

        assert!(store.search_tutorials("xyz").await.unwrap().is_empty());
        assert!(store.search_tutorials("ja").await.unwrap().is_empty());
        assert!(store.search_tutorials("   ").await.unwrap().is_empty());
        assert_eq!(store.search_tutorials("CONST").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn progress_is_append_only() {
        let store = MemStorage::new();
        let row = |score| CreateProgressRequest {
            user_id: "u1".into(),
            quiz_id: Some("q".into()),
            completed: true,
            score: Some(score),
            ..Default::default()
        };
        let first = store.record_progress(row(40)).await.unwrap();
        let second = store.record_progress(row(90)).await.unwrap();
        assert_ne!(first.id, second.id);

        let rows = store.list_progress_by_user("u1").await.unwrap();
        assert_eq!(rows.iter().map(|r| r.score).collect::<Vec<_>>(), [Some(40), Some(90)]);
        assert!(store.list_progress_by_user("u2").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn concurrent_creates_do_not_collide() {
        let store = std::sync::Arc::new(MemStorage::new());
        let mut handles = Vec::new();
        for i in 0..50 {
            let store = std::sync::Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.create_course(course(&format!("c{i}"), "x", i)).await.unwrap()
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(store.list_courses().await.unwrap().len(), 50);
    }
}
