// src/handlers/result.rs

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use sqlx::SqlitePool;

use crate::{error::AppError, models::result::QuizResult};

/// Retrieves a single result by ID, with the full per-question breakdown.
#[utoipa::path(
    get,
    path = "/api/results/{id}",
    tag = "Results",
    params(("id" = String, Path, description = "Result id")),
    responses(
        (status = 200, description = "Result with answers and explanations", body = QuizResult),
        (status = 404, description = "Result not found")
    )
)]
pub async fn get_result(
    State(pool): State<SqlitePool>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let result = sqlx::query_as::<_, QuizResult>(
        r#"
        SELECT id, quiz_id, quiz_title, student_name, responses, score,
               total_questions, percentage, correct_answers, incorrect_answers,
               time_taken, completed_at, detailed_results
        FROM quiz_results
        WHERE id = ?
        "#,
    )
    .bind(&id)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::NotFound("Result not found".to_string()))?;

    Ok(Json(result))
}
