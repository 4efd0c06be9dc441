// src/smoke.rs

//! End-to-end checks against a running server.
//!
//! The checks share state: later ones reuse the quiz and result created by
//! earlier ones, so [`SmokeRunner::run_all`] runs them in a fixed order.

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

use crate::{
    client::{ClientError, QuizClient},
    models::{
        quiz::{CreateQuestionRequest, CreateQuizRequest, QuestionType},
        result::{AttemptSubmission, QuizResponse},
    },
    scoring,
};

#[derive(Debug, Error)]
pub enum SmokeError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("{0}")]
    Assertion(String),

    /// An earlier check that this one depends on did not run or failed.
    #[error("no {0} available from an earlier check")]
    MissingPrerequisite(&'static str),
}

#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub name: &'static str,
    pub passed: bool,
    pub detail: String,
}

#[derive(Debug, Clone, Default)]
pub struct SmokeReport {
    pub outcomes: Vec<CheckOutcome>,
}

impl SmokeReport {
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed).count()
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn all_passed(&self) -> bool {
        self.passed() == self.total()
    }

    pub fn failures(&self) -> impl Iterator<Item = &CheckOutcome> {
        self.outcomes.iter().filter(|o| !o.passed)
    }
}

fn ensure(cond: bool, msg: impl Into<String>) -> Result<(), SmokeError> {
    if cond {
        Ok(())
    } else {
        Err(SmokeError::Assertion(msg.into()))
    }
}

fn require_keys(value: &Value, keys: &[&str], what: &str) -> Result<(), SmokeError> {
    for key in keys {
        ensure(value.get(key).is_some(), format!("{} is missing '{}'", what, key))?;
    }
    Ok(())
}

/// The three-question quiz the attempt checks are written against.
pub fn sample_quiz() -> CreateQuizRequest {
    let q = |text: &str, options: [&str; 4], answer: &str, explanation: &str| {
        CreateQuestionRequest {
            question_text: text.to_string(),
            question_type: QuestionType::MultipleChoice,
            options: options.iter().map(|s| s.to_string()).collect(),
            correct_answer: answer.to_string(),
            explanation: Some(explanation.to_string()),
        }
    };

    CreateQuizRequest {
        title: "Introduction to Python Programming".to_string(),
        subject: "Computer Science".to_string(),
        description: Some("Basic concepts and syntax of Python programming language".to_string()),
        time_limit: Some(30),
        questions: vec![
            q(
                "What is the correct way to create a list in Python?",
                ["list = []", "list = {}", "list = ()", "list = <>"],
                "list = []",
                "Square brackets [] are used to create lists in Python",
            ),
            q(
                "Which keyword is used to define a function in Python?",
                ["function", "def", "func", "define"],
                "def",
                "The 'def' keyword is used to define functions in Python",
            ),
            q(
                "What does the len() function return?",
                [
                    "The length of an object",
                    "The type of an object",
                    "The value of an object",
                    "The memory address",
                ],
                "The length of an object",
                "len() returns the number of items in an object like string, list, tuple, etc.",
            ),
        ],
    }
}

pub struct SmokeRunner {
    client: QuizClient,
    created_quiz_id: Option<String>,
    created_result_id: Option<String>,
}

impl SmokeRunner {
    pub fn new(client: QuizClient) -> Self {
        Self {
            client,
            created_quiz_id: None,
            created_result_id: None,
        }
    }

    /// Runs every check in dependency order and collects the outcomes.
    pub async fn run_all(&mut self) -> SmokeReport {
        let mut report = SmokeReport::default();

        let result = self.health_check().await;
        record(&mut report, "health_check", result);
        let result = self.create_quiz().await;
        record(&mut report, "create_quiz", result);
        let result = self.list_quizzes().await;
        record(&mut report, "list_quizzes", result);
        let result = self.get_quiz_for_taking().await;
        record(&mut report, "get_quiz_for_taking", result);
        let result = self.submit_quiz_attempt().await;
        record(&mut report, "submit_quiz_attempt", result);
        let result = self.get_quiz_result().await;
        record(&mut report, "get_quiz_result", result);
        let result = self.get_all_results_admin().await;
        record(&mut report, "get_all_results_admin", result);

        // Edge cases
        let result = self.invalid_quiz_retrieval().await;
        record(&mut report, "invalid_quiz_retrieval", result);
        let result = self.empty_quiz_attempt().await;
        record(&mut report, "empty_quiz_attempt", result);

        report
    }

    fn quiz_id(&self) -> Result<&str, SmokeError> {
        self.created_quiz_id
            .as_deref()
            .ok_or(SmokeError::MissingPrerequisite("quiz id"))
    }

    pub async fn health_check(&self) -> Result<String, SmokeError> {
        let health = self.client.health().await?;
        ensure(!health.message.is_empty(), "health message is empty")?;
        Ok(format!("API is running: {}", health.message))
    }

    pub async fn create_quiz(&mut self) -> Result<String, SmokeError> {
        let request = sample_quiz();
        let quiz = self.client.create_quiz(&request).await?;

        ensure(
            quiz.total_questions == request.questions.len() as i64,
            format!(
                "total_questions is {}, expected {}",
                quiz.total_questions,
                request.questions.len()
            ),
        )?;
        ensure(
            quiz.questions.len() == request.questions.len(),
            "question count mismatch",
        )?;

        let detail = format!("Quiz created with ID: {}", quiz.id);
        self.created_quiz_id = Some(quiz.id);
        Ok(detail)
    }

    pub async fn list_quizzes(&self) -> Result<String, SmokeError> {
        let quiz_id = self.quiz_id()?;
        let raw = self.client.get_raw("quizzes").await?;
        ensure(raw.status == StatusCode::OK, format!("status {}", raw.status))?;

        let quizzes = raw
            .body
            .as_array()
            .ok_or_else(|| SmokeError::Assertion("response is not a list".to_string()))?;

        ensure(
            quizzes.iter().all(|q| q.get("questions").is_none()),
            "questions should not be included in quiz listing",
        )?;
        ensure(
            quizzes.iter().any(|q| q["id"] == quiz_id),
            "created quiz not found in listing",
        )?;

        Ok(format!("Found {} quizzes, questions properly hidden", quizzes.len()))
    }

    pub async fn get_quiz_for_taking(&self) -> Result<String, SmokeError> {
        let quiz_id = self.quiz_id()?;
        let raw = self.client.get_raw(&format!("quizzes/{}", quiz_id)).await?;
        ensure(raw.status == StatusCode::OK, format!("status {}", raw.status))?;
        require_keys(&raw.body, &["id", "title", "subject", "questions"], "quiz")?;

        let questions = raw.body["questions"]
            .as_array()
            .ok_or_else(|| SmokeError::Assertion("questions is not a list".to_string()))?;

        for question in questions {
            ensure(
                question.get("correct_answer").is_none() && question.get("explanation").is_none(),
                "correct answers not properly hidden",
            )?;
            require_keys(
                question,
                &["id", "question_text", "question_type", "options"],
                "question",
            )?;
        }

        Ok("Quiz retrieved with answers properly hidden".to_string())
    }

    /// Answers questions one and two correctly and question three wrongly.
    pub async fn submit_quiz_attempt(&mut self) -> Result<String, SmokeError> {
        let quiz_id = self.quiz_id()?.to_string();
        let quiz = self.client.get_quiz(&quiz_id).await?;

        let responses = quiz
            .questions
            .iter()
            .enumerate()
            .map(|(i, q)| QuizResponse {
                question_id: q.id.clone(),
                selected_answer: match i {
                    0 => "list = []",
                    1 => "def",
                    _ => "The type of an object",
                }
                .to_string(),
            })
            .collect();

        let attempt = AttemptSubmission {
            responses,
            time_taken: Some(1200),
        };
        let result = self.client.submit_attempt(&quiz_id, &attempt, None).await?;

        let expected_percentage = scoring::percentage(2, 3);
        ensure(
            result.score == 2
                && result.correct_answers == 2
                && result.incorrect_answers == 1
                && result.percentage == expected_percentage,
            format!(
                "scoring calculation error, got {}/{} ({}%)",
                result.score, result.total_questions, result.percentage
            ),
        )?;
        ensure(
            result.detailed_results.len() == 3,
            "detailed results count mismatch",
        )?;

        let detail = format!(
            "Score: {}/{} ({}%)",
            result.score, result.total_questions, result.percentage
        );
        self.created_result_id = Some(result.id);
        Ok(detail)
    }

    pub async fn get_quiz_result(&self) -> Result<String, SmokeError> {
        let result_id = self
            .created_result_id
            .as_deref()
            .ok_or(SmokeError::MissingPrerequisite("result id"))?;

        let raw = self.client.get_raw(&format!("results/{}", result_id)).await?;
        ensure(raw.status == StatusCode::OK, format!("status {}", raw.status))?;
        require_keys(
            &raw.body,
            &["id", "quiz_id", "quiz_title", "score", "percentage", "detailed_results"],
            "result",
        )?;

        let details = raw.body["detailed_results"]
            .as_array()
            .ok_or_else(|| SmokeError::Assertion("detailed_results is not a list".to_string()))?;
        for detail in details {
            require_keys(detail, &["correct_answer", "explanation"], "detailed result")?;
        }

        Ok("Result retrieved with complete details".to_string())
    }

    pub async fn get_all_results_admin(&self) -> Result<String, SmokeError> {
        let result_id = self
            .created_result_id
            .as_deref()
            .ok_or(SmokeError::MissingPrerequisite("result id"))?;

        let results = self.client.list_results().await?;
        ensure(
            results.iter().any(|r| r.id == result_id),
            "created result not found in admin results",
        )?;

        Ok(format!("Found {} results", results.len()))
    }

    pub async fn invalid_quiz_retrieval(&self) -> Result<String, SmokeError> {
        let raw = self.client.get_raw("quizzes/non-existent-quiz-id").await?;
        ensure(
            raw.status == StatusCode::NOT_FOUND,
            format!("expected 404, got {}", raw.status),
        )?;
        Ok("Properly returns 404 for invalid quiz ID".to_string())
    }

    pub async fn empty_quiz_attempt(&self) -> Result<String, SmokeError> {
        let quiz_id = self.quiz_id()?;
        let attempt = AttemptSubmission {
            responses: Vec::new(),
            time_taken: Some(60),
        };
        let result = self.client.submit_attempt(quiz_id, &attempt, None).await?;

        ensure(
            result.score == 0
                && result.percentage == 0.0
                && result.incorrect_answers == result.total_questions,
            "empty attempt scoring incorrect",
        )?;
        Ok("Empty attempt handled correctly".to_string())
    }
}

fn record(report: &mut SmokeReport, name: &'static str, result: Result<String, SmokeError>) {
    let outcome = match result {
        Ok(detail) => {
            tracing::info!("PASS {}: {}", name, detail);
            CheckOutcome {
                name,
                passed: true,
                detail,
            }
        }
        Err(e) => {
            tracing::error!("FAIL {}: {}", name, e);
            CheckOutcome {
                name,
                passed: false,
                detail: e.to_string(),
            }
        }
    };
    report.outcomes.push(outcome);
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn sample_quiz_is_valid() {
        assert!(sample_quiz().validate().is_ok());
    }

    #[test]
    fn report_counts_failures() {
        let mut report = SmokeReport::default();
        record(&mut report, "a", Ok("fine".to_string()));
        record(
            &mut report,
            "b",
            Err(SmokeError::Assertion("broken".to_string())),
        );

        assert_eq!(report.total(), 2);
        assert_eq!(report.passed(), 1);
        assert!(!report.all_passed());
        assert_eq!(report.failures().next().map(|o| o.name), Some("b"));
    }
}
