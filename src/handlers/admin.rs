// src/handlers/admin.rs

use axum::{Json, extract::State, response::IntoResponse};
use sqlx::SqlitePool;

use crate::{config::LIST_LIMIT, error::AppError, models::result::QuizResult};

/// Lists every stored result, newest first.
#[utoipa::path(
    get,
    path = "/api/admin/results",
    tag = "Admin",
    responses((status = 200, description = "All results", body = [QuizResult]))
)]
pub async fn list_results(State(pool): State<SqlitePool>) -> Result<impl IntoResponse, AppError> {
    let results = sqlx::query_as::<_, QuizResult>(
        r#"
        SELECT id, quiz_id, quiz_title, student_name, responses, score,
               total_questions, percentage, correct_answers, incorrect_answers,
               time_taken, completed_at, detailed_results
        FROM quiz_results
        ORDER BY completed_at DESC, rowid DESC
        LIMIT ?
        "#,
    )
    .bind(LIST_LIMIT)
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to list results: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(results))
}
