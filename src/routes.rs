// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{self, certificate, course, exam, progress, quiz, tutorial},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (content, assessments, certificates, progress).
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (store, certificate issuer, config).
pub fn create_router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    let course_routes = Router::new()
        .route("/", get(course::list_courses).post(course::create_course))
        .route("/{id}", get(course::get_course));

    let tutorial_routes = Router::new()
        .route("/", get(tutorial::list_tutorials).post(tutorial::create_tutorial))
        .route("/{slug}", get(tutorial::get_tutorial_by_slug))
        .route("/id/{id}", get(tutorial::get_tutorial));

    let quiz_routes = Router::new()
        .route("/", get(quiz::list_quizzes).post(quiz::create_quiz))
        .route("/{id}", get(quiz::get_quiz))
        .route("/{id}/submit", post(quiz::submit_quiz));

    let exam_routes = Router::new()
        .route("/", get(exam::list_exams).post(exam::create_exam))
        .route("/{id}", get(exam::get_exam))
        .route("/{id}/submit", post(exam::submit_exam));

    let certificate_routes = Router::new()
        .route("/", post(certificate::create_certificate))
        .route("/{number}", get(certificate::verify_certificate))
        .route("/id/{id}", get(certificate::get_certificate));

    let user_routes = Router::new()
        .route("/{user_id}/certificates", get(certificate::list_user_certificates))
        .route("/{user_id}/progress", get(progress::list_user_progress));

    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/search", get(tutorial::search))
        .route("/api/progress", post(progress::record_progress))
        .nest("/api/courses", course_routes)
        .nest("/api/tutorials", tutorial_routes)
        .nest("/api/quizzes", quiz_routes)
        .nest("/api/exams", exam_routes)
        .nest("/api/certificates", certificate_routes)
        .nest("/api/users", user_routes)
        // Global Middleware (applied from outside in)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
