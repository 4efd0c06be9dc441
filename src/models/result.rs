// src/models/result.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, types::Json};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// One answer picked by a test-taker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct QuizResponse {
    pub question_id: String,
    pub selected_answer: String,
}

/// DTO for submitting a quiz attempt.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct AttemptSubmission {
    pub responses: Vec<QuizResponse>,

    /// Elapsed time in seconds.
    #[validate(range(min = 0))]
    pub time_taken: Option<i64>,
}

/// Query parameters accepted by the attempt endpoint.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AttemptParams {
    pub student_name: Option<String>,
}

/// Per-question line of a result. `selected_answer` is null when the
/// question went unanswered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DetailedResult {
    pub question_id: String,
    pub question_text: String,
    pub selected_answer: Option<String>,
    pub correct_answer: String,
    pub is_correct: bool,
    pub explanation: Option<String>,
}

/// Represents the 'quiz_results' table in the database.
/// Stores the scored outcome of one attempt.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, ToSchema)]
pub struct QuizResult {
    pub id: String,
    pub quiz_id: String,
    pub quiz_title: String,
    pub student_name: Option<String>,
    #[schema(value_type = Vec<QuizResponse>)]
    pub responses: Json<Vec<QuizResponse>>,
    pub score: i64,
    pub total_questions: i64,
    pub percentage: f64,
    pub correct_answers: i64,
    pub incorrect_answers: i64,
    pub time_taken: Option<i64>,
    pub completed_at: DateTime<Utc>,
    #[schema(value_type = Vec<DetailedResult>)]
    pub detailed_results: Json<Vec<DetailedResult>>,
}
