// tests/api_tests.rs

use academy::{config::Config, routes, state::AppState};

/// Helper function to spawn the app on a random port for testing.
/// Returns the base URL (e.g., "http://127.0.0.1:12345").
async fn spawn_app() -> String {
    // 1. Create test configuration; the demo catalogue is seeded into a fresh store
    let config = Config {
        rust_log: "error".to_string(),
        seed_demo_content: true,
        ..Config::default()
    };

    // 2. Create the state and router
    let state = AppState::in_memory(config).await;
    let app = routes::create_router(state);

    // 3. Bind to port 0 to get a random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    // 4. Spawn the server in the background
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

fn course_payload(title: &str, order: i32) -> serde_json::Value {
    serde_json::json!({
        "title": title,
        "description": "Cloud computing from the ground up",
        "icon": "fas fa-cloud",
        "category": "cloud",
        "color": "#0EA5E9",
        "order": order
    })
}

#[tokio::test]
async fn health_check_404() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // Act
    let response = client
        .get(&format!("{}/random_path_that_does_not_exist", address))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn list_courses_sorted_by_order() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // Two new courses share order 2 with the seeded "backend"
    for title in ["Cloud A", "Cloud B"] {
        let response = client
            .post(&format!("{}/api/courses", address))
            .json(&course_payload(title, 2))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status().as_u16(), 201);
    }

    let courses: Vec<serde_json::Value> = client
        .get(&format!("{}/api/courses", address))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .unwrap();

    let titles: Vec<&str> = courses.iter().map(|c| c["title"].as_str().unwrap()).collect();
    assert_eq!(
        titles,
        [
            "Frontend Development",
            "Backend Development",
            "Cloud A",
            "Cloud B",
            "Database"
        ]
    );
}

#[tokio::test]
async fn create_and_fetch_course() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let created: serde_json::Value = client
        .post(&format!("{}/api/courses", address))
        .json(&course_payload("Cloud Practitioner", 4))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .unwrap();

    let id = created["id"].as_str().unwrap();
    assert_eq!(created["level"], "beginner");
    assert_eq!(created["certificateAvailable"], false);

    let fetched: serde_json::Value = client
        .get(&format!("{}/api/courses/{}", address, id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn create_course_fails_validation() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // Missing required fields
    let response = client
        .post(&format!("{}/api/courses", address))
        .json(&serde_json::json!({ "title": "No description" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 400);

    // Empty title
    let mut payload = course_payload("", 1);
    payload["title"] = serde_json::json!("");
    let response = client
        .post(&format!("{}/api/courses", address))
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn tutorials_filter_by_category_and_course() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let all: Vec<serde_json::Value> = client
        .get(&format!("{}/api/tutorials", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(all.len(), 5);

    let frontend: Vec<serde_json::Value> = client
        .get(&format!("{}/api/tutorials?category=frontend", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let slugs: Vec<&str> = frontend.iter().map(|t| t["slug"].as_str().unwrap()).collect();
    assert_eq!(
        slugs,
        ["html-introduction", "css-introduction", "javascript-variables"]
    );

    let database: Vec<serde_json::Value> = client
        .get(&format!("{}/api/tutorials?courseId=database", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(database.len(), 1);
    assert_eq!(database[0]["title"], "SQL Introduction");
}

#[tokio::test]
async fn tutorial_by_slug() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(&format!("{}/api/tutorials/javascript-variables", address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let tutorial: serde_json::Value = response.json().await.unwrap();
    assert_eq!(tutorial["id"], "js-variables");
    assert_eq!(tutorial["prevTutorial"], "css-intro");

    let by_id: serde_json::Value = client
        .get(&format!("{}/api/tutorials/id/js-variables", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(by_id, tutorial);

    let missing = client
        .get(&format!("{}/api/tutorials/no-such-tutorial", address))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status().as_u16(), 404);
    let body: serde_json::Value = missing.json().await.unwrap();
    assert_eq!(body["message"], "Tutorial not found");
}

#[tokio::test]
async fn create_tutorial_sanitizes_and_rejects_duplicate_slug() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let payload = serde_json::json!({
        "courseId": "frontend",
        "title": "DOM Events",
        "slug": "dom-events",
        "content": "<p>Click handlers</p><script>alert('x')</script>",
        "order": 4
    });

    let response = client
        .post(&format!("{}/api/tutorials", address))
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 201);
    let created: serde_json::Value = response.json().await.unwrap();
    assert_eq!(created["content"], "<p>Click handlers</p>");
    assert_eq!(created["language"], "javascript");

    let duplicate = client
        .post(&format!("{}/api/tutorials", address))
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(duplicate.status().as_u16(), 400);

    let unknown_course = client
        .post(&format!("{}/api/tutorials", address))
        .json(&serde_json::json!({
            "courseId": "astronomy",
            "title": "Stars",
            "slug": "stars",
            "content": "<p>Bright</p>"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(unknown_course.status().as_u16(), 400);
}

#[tokio::test]
async fn search_tutorials() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let search = |q: &'static str| {
        let client = client.clone();
        let url = format!("{}/api/search?q={}", address, q);
        async move {
            client
                .get(&url)
                .send()
                .await
                .unwrap()
                .json::<Vec<serde_json::Value>>()
                .await
                .unwrap()
        }
    };

    let hits = search("java").await;
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["title"], "JavaScript Variables");

    assert!(search("xyz").await.is_empty());
    assert!(search("js").await.is_empty());

    // Missing query parameter
    let none: Vec<serde_json::Value> = client
        .get(&format!("{}/api/search", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(none.is_empty());
}
