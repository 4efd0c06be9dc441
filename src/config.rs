// src/config.rs

use std::env;
use dotenvy::dotenv;

/// Upper bound on rows returned by the listing endpoints.
pub const LIST_LIMIT: i64 = 1000;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://quiz.db?mode=rwc";
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub rust_log: String,
    pub host: String,
    pub port: u16,
    pub log_dir: String,

    /// Allowed CORS origins. Empty means any origin.
    pub cors_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        let host = env::var("HOST")
            .unwrap_or_else(|_| "0.0.0.0".to_string());

        // Read before the subscriber exists, so a bad value falls back silently.
        let port = env::var("PORT")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let log_dir = env::var("LOG_DIR")
            .unwrap_or_else(|_| "logs".to_string());

        let cors_origins = parse_origins(&env::var("CORS_ORIGINS").unwrap_or_default());

        Self {
            database_url,
            rust_log,
            host,
            port,
            log_dir,
            cors_origins,
        }
    }

    /// Address string suitable for `TcpListener::bind`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Splits a comma separated origin list. A lone `*` is treated as "any".
fn parse_origins(raw: &str) -> Vec<String> {
    let origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    if origins.iter().any(|o| o == "*") {
        return Vec::new();
    }
    origins
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_origins_splits_and_trims() {
        let origins = parse_origins(" http://a.test , http://b.test,,");
        assert_eq!(origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn wildcard_means_any_origin() {
        assert!(parse_origins("http://a.test,*").is_empty());
        assert!(parse_origins("").is_empty());
    }

    #[test]
    fn bind_addr_joins_host_and_port() {
        let config = Config {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            rust_log: "info".to_string(),
            host: "127.0.0.1".to_string(),
            port: 8080,
            log_dir: "logs".to_string(),
            cors_origins: Vec::new(),
        };
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
    }
}
