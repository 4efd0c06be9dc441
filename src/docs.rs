// src/docs.rs

use axum::Json;
use utoipa::OpenApi;

use crate::{
    handlers::{admin, health, quiz, result},
    models::{
        quiz::{
            CreateQuestionRequest, CreateQuizRequest, PublicQuestion, Question, QuestionType,
            Quiz, QuizForAttempt, QuizSummary,
        },
        result::{AttemptSubmission, DetailedResult, QuizResponse, QuizResult},
    },
};

/// OpenAPI description of the public HTTP surface.
#[derive(OpenApi)]
#[openapi(
    info(title = "Mini Quiz Platform API"),
    paths(
        health::root,
        quiz::create_quiz,
        quiz::list_quizzes,
        quiz::get_quiz,
        quiz::submit_attempt,
        result::get_result,
        admin::list_results,
    ),
    components(schemas(
        health::HealthStatus,
        QuestionType,
        Question,
        PublicQuestion,
        Quiz,
        QuizForAttempt,
        QuizSummary,
        CreateQuizRequest,
        CreateQuestionRequest,
        QuizResponse,
        AttemptSubmission,
        DetailedResult,
        QuizResult,
    )),
    tags(
        (name = "System", description = "Health check"),
        (name = "Quizzes", description = "Quiz authoring and attempts"),
        (name = "Results", description = "Scored attempts"),
        (name = "Admin", description = "Result review"),
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
