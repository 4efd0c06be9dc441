// tests/common/mod.rs

use quiz_platform::{config::Config, state::AppState};
use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};

/// In-memory database with migrations applied.
/// A single connection keeps every query on the same in-memory database.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory SQLite");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to migrate database");

    pool
}

pub async fn test_state() -> AppState {
    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        rust_log: "error".to_string(),
        host: "127.0.0.1".to_string(),
        port: 0,
        log_dir: "logs".to_string(),
        cors_origins: Vec::new(),
    };

    AppState {
        pool: test_pool().await,
        config,
    }
}
