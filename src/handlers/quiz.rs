// src/handlers/quiz.rs

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    response::IntoResponse,
};
use chrono::Utc;
use sqlx::{SqlitePool, types::Json as SqlJson};
use uuid::Uuid;
use validator::Validate;

use crate::{
    config::LIST_LIMIT,
    error::AppError,
    models::{
        quiz::{CreateQuizRequest, Question, Quiz, QuizForAttempt, QuizSummary},
        result::{AttemptParams, AttemptSubmission, QuizResult},
    },
    scoring,
};

/// Loads an active quiz together with its questions, in creation order.
pub(crate) async fn fetch_active_quiz(pool: &SqlitePool, id: &str) -> Result<Quiz, AppError> {
    let mut quiz = sqlx::query_as::<_, Quiz>(
        r#"
        SELECT id, title, subject, description, created_by, created_at,
               time_limit, total_questions, is_active
        FROM quizzes
        WHERE id = ? AND is_active = TRUE
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::NotFound("Quiz not found".to_string()))?;

    quiz.questions = sqlx::query_as::<_, Question>(
        r#"
        SELECT id, question_text, question_type, options, correct_answer, explanation
        FROM questions
        WHERE quiz_id = ?
        ORDER BY position
        "#,
    )
    .bind(id)
    .fetch_all(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch questions for quiz {}: {:?}", id, e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(quiz)
}

/// Creates a quiz and its questions in one transaction.
///
/// Returns the full quiz, answer key included, so the author can keep the
/// generated question ids.
#[utoipa::path(
    post,
    path = "/api/quizzes",
    tag = "Quizzes",
    request_body = CreateQuizRequest,
    responses(
        (status = 200, description = "Quiz created", body = Quiz),
        (status = 400, description = "Malformed or invalid body")
    )
)]
pub async fn create_quiz(
    State(pool): State<SqlitePool>,
    payload: Result<Json<CreateQuizRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let quiz = Quiz::from_request(payload);

    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO quizzes
            (id, title, subject, description, created_by, created_at,
             time_limit, total_questions, is_active)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&quiz.id)
    .bind(&quiz.title)
    .bind(&quiz.subject)
    .bind(&quiz.description)
    .bind(&quiz.created_by)
    .bind(quiz.created_at)
    .bind(quiz.time_limit)
    .bind(quiz.total_questions)
    .bind(quiz.is_active)
    .execute(&mut *tx)
    .await
    .map_err(|e| {
        tracing::error!("Failed to insert quiz: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    for (position, q) in quiz.questions.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO questions
                (id, quiz_id, position, question_text, question_type,
                 options, correct_answer, explanation)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&q.id)
        .bind(&quiz.id)
        .bind(position as i64)
        .bind(&q.question_text)
        .bind(q.question_type)
        .bind(&q.options)
        .bind(&q.correct_answer)
        .bind(&q.explanation)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert question: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;
    }

    tx.commit().await?;

    tracing::info!(
        "Quiz '{}' created with {} questions ({})",
        quiz.title,
        quiz.total_questions,
        quiz.id
    );

    Ok(Json(quiz))
}

/// Lists active quizzes without their questions.
#[utoipa::path(
    get,
    path = "/api/quizzes",
    tag = "Quizzes",
    responses((status = 200, description = "Quiz summaries", body = [QuizSummary]))
)]
pub async fn list_quizzes(State(pool): State<SqlitePool>) -> Result<impl IntoResponse, AppError> {
    let quizzes = sqlx::query_as::<_, QuizSummary>(
        r#"
        SELECT id, title, subject, description, total_questions, time_limit, created_at
        FROM quizzes
        WHERE is_active = TRUE
        ORDER BY created_at, rowid
        LIMIT ?
        "#,
    )
    .bind(LIST_LIMIT)
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to list quizzes: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(quizzes))
}

/// Serves a quiz for taking: correct answers and explanations are left out.
#[utoipa::path(
    get,
    path = "/api/quizzes/{id}",
    tag = "Quizzes",
    params(("id" = String, Path, description = "Quiz id")),
    responses(
        (status = 200, description = "Quiz without answer key", body = QuizForAttempt),
        (status = 404, description = "Quiz not found")
    )
)]
pub async fn get_quiz(
    State(pool): State<SqlitePool>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let quiz = fetch_active_quiz(&pool, &id).await?;

    Ok(Json(quiz.for_attempt()))
}

/// Scores a submitted attempt and stores the result.
///
/// * Every quiz question appears once in `detailed_results`, answered or not.
/// * Responses for ids outside the quiz are kept in `responses` but never scored.
#[utoipa::path(
    post,
    path = "/api/quizzes/{id}/attempt",
    tag = "Quizzes",
    params(("id" = String, Path, description = "Quiz id"), AttemptParams),
    request_body = AttemptSubmission,
    responses(
        (status = 200, description = "Scored result", body = QuizResult),
        (status = 400, description = "Malformed or invalid body"),
        (status = 404, description = "Quiz not found")
    )
)]
pub async fn submit_attempt(
    State(pool): State<SqlitePool>,
    Path(id): Path<String>,
    Query(params): Query<AttemptParams>,
    payload: Result<Json<AttemptSubmission>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(attempt) = payload?;
    attempt.validate()?;

    let quiz = fetch_active_quiz(&pool, &id).await?;
    let evaluation = scoring::evaluate(&quiz, &attempt.responses);

    let result = QuizResult {
        id: Uuid::new_v4().to_string(),
        quiz_id: quiz.id,
        quiz_title: quiz.title,
        student_name: params.student_name,
        responses: SqlJson(attempt.responses),
        score: evaluation.score,
        total_questions: evaluation.total_questions,
        percentage: evaluation.percentage,
        correct_answers: evaluation.correct_answers,
        incorrect_answers: evaluation.incorrect_answers,
        time_taken: attempt.time_taken,
        completed_at: Utc::now(),
        detailed_results: SqlJson(evaluation.detailed_results),
    };

    sqlx::query(
        r#"
        INSERT INTO quiz_results
            (id, quiz_id, quiz_title, student_name, responses, score,
             total_questions, percentage, correct_answers, incorrect_answers,
             time_taken, completed_at, detailed_results)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&result.id)
    .bind(&result.quiz_id)
    .bind(&result.quiz_title)
    .bind(&result.student_name)
    .bind(&result.responses)
    .bind(result.score)
    .bind(result.total_questions)
    .bind(result.percentage)
    .bind(result.correct_answers)
    .bind(result.incorrect_answers)
    .bind(result.time_taken)
    .bind(result.completed_at)
    .bind(&result.detailed_results)
    .execute(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to store quiz result: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    tracing::info!(
        "Attempt on quiz {} scored {}/{} ({}%)",
        result.quiz_id,
        result.score,
        result.total_questions,
        result.percentage
    );

    Ok(Json(result))
}
