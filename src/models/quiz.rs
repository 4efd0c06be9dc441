// src/models/quiz.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{prelude::FromRow, types::Json};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Kind of question. Stored as snake_case text in the `questions` table.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum QuestionType {
    #[default]
    MultipleChoice,
    TrueFalse,
}

/// Represents the 'questions' table in the database, answer key included.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, ToSchema)]
pub struct Question {
    pub id: String,

    pub question_text: String,

    pub question_type: QuestionType,

    /// List of options (e.g., ["def", "func"]).
    /// Stored as a JSON array in the database.
    #[schema(value_type = Vec<String>)]
    pub options: Json<Vec<String>>,

    /// Exact text of the correct option.
    pub correct_answer: String,

    pub explanation: Option<String>,
}

/// Question as served to someone taking the quiz (excludes answer and explanation).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PublicQuestion {
    pub id: String,
    pub question_text: String,
    pub question_type: QuestionType,
    #[schema(value_type = Vec<String>)]
    pub options: Json<Vec<String>>,
}

impl From<&Question> for PublicQuestion {
    fn from(q: &Question) -> Self {
        Self {
            id: q.id.clone(),
            question_text: q.question_text.clone(),
            question_type: q.question_type,
            options: q.options.clone(),
        }
    }
}

/// Represents the 'quizzes' table. `questions` is loaded separately, in `position` order.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, ToSchema)]
pub struct Quiz {
    pub id: String,
    pub title: String,
    pub subject: String,
    pub description: Option<String>,

    #[sqlx(skip)]
    pub questions: Vec<Question>,

    pub created_by: String,
    pub created_at: DateTime<Utc>,

    /// Time limit in minutes.
    pub time_limit: Option<i64>,

    pub total_questions: i64,
    pub is_active: bool,
}

impl Quiz {
    /// Builds a new quiz from a validated creation request, assigning fresh ids.
    pub fn from_request(req: CreateQuizRequest) -> Self {
        let questions: Vec<Question> = req
            .questions
            .into_iter()
            .map(|q| Question {
                id: Uuid::new_v4().to_string(),
                question_text: q.question_text,
                question_type: q.question_type,
                options: Json(q.options),
                correct_answer: q.correct_answer,
                explanation: q.explanation,
            })
            .collect();

        Self {
            id: Uuid::new_v4().to_string(),
            title: req.title,
            subject: req.subject,
            description: req.description,
            total_questions: questions.len() as i64,
            questions,
            created_by: "admin".to_string(),
            created_at: Utc::now(),
            time_limit: req.time_limit,
            is_active: true,
        }
    }

    /// The view handed to a test-taker: no correct answers, no explanations.
    pub fn for_attempt(&self) -> QuizForAttempt {
        QuizForAttempt {
            id: self.id.clone(),
            title: self.title.clone(),
            subject: self.subject.clone(),
            description: self.description.clone(),
            questions: self.questions.iter().map(PublicQuestion::from).collect(),
            created_by: self.created_by.clone(),
            created_at: self.created_at,
            time_limit: self.time_limit,
            total_questions: self.total_questions,
            is_active: self.is_active,
        }
    }
}

/// DTO for serving a quiz to be attempted.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QuizForAttempt {
    pub id: String,
    pub title: String,
    pub subject: String,
    pub description: Option<String>,
    pub questions: Vec<PublicQuestion>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub time_limit: Option<i64>,
    pub total_questions: i64,
    pub is_active: bool,
}

/// Listing row. Carries no questions at all.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, ToSchema)]
pub struct QuizSummary {
    pub id: String,
    pub title: String,
    pub subject: String,
    pub description: Option<String>,
    pub total_questions: i64,
    pub time_limit: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// DTO for creating a new quiz.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateQuizRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 100))]
    pub subject: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[validate(nested)]
    pub questions: Vec<CreateQuestionRequest>,
    #[validate(range(min = 1))]
    pub time_limit: Option<i64>,
}

/// DTO for one question inside a quiz creation request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[validate(schema(function = validate_answer_in_options))]
pub struct CreateQuestionRequest {
    #[validate(length(min = 1, max = 1000))]
    pub question_text: String,
    #[serde(default)]
    pub question_type: QuestionType,
    #[validate(custom(function = validate_options))]
    pub options: Vec<String>,
    #[validate(length(min = 1, max = 500))]
    pub correct_answer: String,
    #[validate(length(max = 2000))]
    pub explanation: Option<String>,
}

fn validate_options(options: &[String]) -> Result<(), validator::ValidationError> {
    if options.is_empty() {
        return Err(validator::ValidationError::new("options_cannot_be_empty"));
    }
    for opt in options {
        if opt.is_empty() {
            return Err(validator::ValidationError::new("option_cannot_be_empty"));
        }
        if opt.chars().count() > 500 {
            return Err(validator::ValidationError::new("option_too_long"));
        }
    }
    Ok(())
}

fn validate_answer_in_options(
    q: &CreateQuestionRequest,
) -> Result<(), validator::ValidationError> {
    if !q.options.iter().any(|opt| opt == &q.correct_answer) {
        return Err(validator::ValidationError::new("correct_answer_not_in_options"));
    }
    Ok(())
}
