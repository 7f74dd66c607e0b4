// src/config.rs

use std::env;
use dotenvy::dotenv;

/// Countdown used when a quiz has no time limit (30 minutes).
pub const DEFAULT_TIME_LIMIT_SECS: u64 = 1800;

/// Search queries shorter than this return nothing.
pub const SEARCH_MIN_QUERY_LEN: usize = 3;

/// Fixed prefix of every certificate number.
pub const CERTIFICATE_PREFIX: &str = "CERT-";

#[derive(Debug, Clone)]
pub struct Config {
    pub server_addr: String,
    pub rust_log: String,
    pub log_dir: String,
    pub seed_demo_content: bool,
    pub allowed_origins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_addr: "0.0.0.0:3000".to_string(),
            rust_log: "info".to_string(),
            log_dir: "logs".to_string(),
            seed_demo_content: true,
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let defaults = Self::default();

        let server_addr = env::var("SERVER_ADDR").unwrap_or(defaults.server_addr);

        let rust_log = env::var("RUST_LOG").unwrap_or(defaults.rust_log);

        let log_dir = env::var("LOG_DIR").unwrap_or(defaults.log_dir);

        let seed_demo_content = env::var("SEED_DEMO_CONTENT")
            .map(|v| parse_flag(&v))
            .unwrap_or(defaults.seed_demo_content);

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or(defaults.allowed_origins);

        Self {
            server_addr,
            rust_log,
            log_dir,
            seed_demo_content,
            allowed_origins,
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
