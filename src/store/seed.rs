// src/store/seed.rs

use super::MemStorage;
use crate::models::{
    course::Course,
    exam::Exam,
    question::Question,
    quiz::Quiz,
    tutorial::Tutorial,
};

fn course(id: &str, title: &str, description: &str, icon: &str, color: &str, order: i32) -> Course {
    Course {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        icon: icon.to_string(),
        category: id.to_string(),
        color: color.to_string(),
        order,
        certificate_available: id == "frontend",
        exam_required: false,
        duration: None,
        level: "beginner".to_string(),
    }
}

struct TutorialSeed {
    id: &'static str,
    course_id: &'static str,
    title: &'static str,
    slug: &'static str,
    content: &'static str,
    code_example: &'static str,
    language: &'static str,
    read_time: i32,
    order: i32,
    prev: Option<&'static str>,
    next: Option<&'static str>,
}

impl From<TutorialSeed> for Tutorial {
    fn from(seed: TutorialSeed) -> Self {
        Tutorial {
            id: seed.id.to_string(),
            course_id: seed.course_id.to_string(),
            title: seed.title.to_string(),
            slug: seed.slug.to_string(),
            content: seed.content.to_string(),
            code_example: Some(seed.code_example.to_string()),
            language: seed.language.to_string(),
            difficulty: "beginner".to_string(),
            read_time: seed.read_time,
            order: seed.order,
            next_tutorial: seed.next.map(str::to_string),
            prev_tutorial: seed.prev.map(str::to_string),
        }
    }
}

fn question(id: &str, text: &str, options: &[&str], correct_answer: usize, explanation: &str) -> Question {
    Question {
        id: id.to_string(),
        question: text.to_string(),
        options: options.iter().map(|o| o.to_string()).collect(),
        correct_answer,
        explanation: Some(explanation.to_string()),
    }
}

fn tutorials() -> Vec<TutorialSeed> {
    vec![
        TutorialSeed {
            id: "html-intro",
            course_id: "frontend",
            title: "HTML Introduction",
            slug: "html-introduction",
            content: "<h2>What is HTML?</h2><p>HTML (HyperText Markup Language) is the standard markup language for creating web pages. It describes the structure of a web page using elements and tags.</p>",
            code_example: "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n    <title>My First Web Page</title>\n</head>\n<body>\n    <h1>Hello, World!</h1>\n</body>\n</html>",
            language: "html",
            read_time: 10,
            order: 1,
            prev: None,
            next: Some("css-intro"),
        },
        TutorialSeed {
            id: "css-intro",
            course_id: "frontend",
            title: "CSS Introduction",
            slug: "css-introduction",
            content: "<h2>What is CSS?</h2><p>CSS (Cascading Style Sheets) is used to style and layout web pages. It describes how HTML elements should be displayed.</p>",
            code_example: "h1 {\n    color: #04AA6D;\n    text-align: center;\n}",
            language: "css",
            read_time: 12,
            order: 2,
            prev: Some("html-intro"),
            next: Some("js-variables"),
        },
        TutorialSeed {
            id: "js-variables",
            course_id: "frontend",
            title: "JavaScript Variables",
            slug: "javascript-variables",
            content: "<h2>JavaScript Variables</h2><p>Variables are containers for storing data values. JavaScript declares them with <code>var</code>, <code>let</code> and <code>const</code>.</p>",
            code_example: "let age = 25;\nconst PI = 3.14159;\nconsole.log(age, PI);",
            language: "javascript",
            read_time: 15,
            order: 3,
            prev: Some("css-intro"),
            next: Some("python-intro"),
        },
        TutorialSeed {
            id: "python-intro",
            course_id: "backend",
            title: "Python Introduction",
            slug: "python-introduction",
            content: "<h2>What is Python?</h2><p>Python is a popular programming language known for its simple, readable syntax.</p>",
            code_example: "def greet(name):\n    return f\"Hello, {name}!\"\n\nprint(greet(\"Alice\"))",
            language: "python",
            read_time: 12,
            order: 1,
            prev: Some("js-variables"),
            next: Some("sql-intro"),
        },
        TutorialSeed {
            id: "sql-intro",
            course_id: "database",
            title: "SQL Introduction",
            slug: "sql-introduction",
            content: "<h2>What is SQL?</h2><p>SQL (Structured Query Language) is used to store, query and change data in relational databases.</p>",
            code_example: "SELECT name, email FROM users WHERE age > 18;",
            language: "sql",
            read_time: 18,
            order: 1,
            prev: Some("python-intro"),
            next: None,
        },
    ]
}

fn javascript_quiz() -> Quiz {
    Quiz {
        id: "js-basics-quiz".to_string(),
        course_id: "frontend".to_string(),
        tutorial_id: Some("js-variables".to_string()),
        title: "JavaScript Variables Quiz".to_string(),
        questions: vec![
            question("1", "Which keyword declares a block-scoped constant?", &["var", "let", "const", "static"], 2,
                "`const` is block-scoped and cannot be reassigned."),
            question("2", "Which keyword declares a function-scoped variable?", &["var", "let", "const", "def"], 0,
                "`var` is scoped to the enclosing function."),
            question("3", "What does `typeof 42` return?", &["\"int\"", "\"number\"", "\"float\"", "\"integer\""], 1,
                "JavaScript has a single number type."),
        ],
        passing_score: 70,
        time_limit: Some(10),
        order: 1,
    }
}

fn frontend_exam() -> Exam {
    Exam {
        id: "frontend-cert-exam".to_string(),
        course_id: "frontend".to_string(),
        title: "Frontend Development Certification".to_string(),
        description: "Covers HTML structure, CSS styling and JavaScript fundamentals.".to_string(),
        questions: vec![
            question("1", "What does HTML stand for?",
                &["HyperText Markup Language", "High Tech Modern Language", "Hyperlink Text Management Language"], 0,
                "HTML is the HyperText Markup Language."),
            question("2", "Which element holds the visible page content?", &["<head>", "<body>", "<meta>"], 1,
                "Visible content lives in <body>."),
            question("3", "Which CSS property sets text colour?", &["font-color", "text-color", "color"], 2,
                "The property is simply `color`."),
            question("4", "Which keyword cannot be reassigned?", &["let", "var", "const"], 2,
                "`const` bindings cannot be reassigned."),
            question("5", "Which part of a CSS rule points at elements?", &["Selector", "Declaration", "Property"], 0,
                "Selectors choose the elements a rule applies to."),
        ],
        passing_score: 80,
        time_limit: 30,
        certificate_template: Some("professional".to_string()),
    }
}

impl MemStorage {
    /// Loads the demo catalogue under fixed ids.
    pub async fn seed_demo_content(&self) {
        let courses = [
            course("frontend", "Frontend Development", "Learn HTML, CSS, JavaScript and modern frameworks", "fas fa-laptop-code", "#3B82F6", 1),
            course("backend", "Backend Development", "Server-side programming and databases", "fas fa-server", "#10B981", 2),
            course("database", "Database", "SQL and NoSQL database management", "fas fa-database", "#8B5CF6", 3),
        ];
        for c in courses {
            self.courses.insert(c).await;
        }
        for t in tutorials() {
            self.tutorials.insert(t.into()).await;
        }
        self.quizzes.insert(javascript_quiz()).await;
        self.exams.insert(frontend_exam()).await;

        tracing::info!("Seeded demo content: 3 courses, 5 tutorials, 1 quiz, 1 exam");
    }
}
