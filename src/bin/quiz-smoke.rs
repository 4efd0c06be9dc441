// src/bin/quiz-smoke.rs

//! Runs the end-to-end checks against a live server at `BACKEND_URL`.

use std::process::ExitCode;

use dotenvy::dotenv;
use quiz_platform::{client::QuizClient, smoke::SmokeRunner};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_BACKEND_URL: &str = "http://localhost:3000";

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false))
        .init();

    let backend_url =
        std::env::var("BACKEND_URL").unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string());

    let client = match QuizClient::new(&backend_url) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    tracing::info!("Testing API at: {}", client.api_base());

    let report = SmokeRunner::new(client).run_all().await;

    tracing::info!("Overall Result: {}/{} checks passed", report.passed(), report.total());
    if report.all_passed() {
        ExitCode::SUCCESS
    } else {
        for failure in report.failures() {
            tracing::error!("{} failed: {}", failure.name, failure.detail);
        }
        ExitCode::FAILURE
    }
}
