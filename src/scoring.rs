// src/scoring.rs

//! Scores an attempt against a quiz's answer key.

use std::collections::HashMap;

use crate::models::{
    quiz::Quiz,
    result::{DetailedResult, QuizResponse},
};

/// Outcome of scoring one attempt, before it is persisted as a `QuizResult`.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub score: i64,
    pub total_questions: i64,
    pub percentage: f64,
    pub correct_answers: i64,
    pub incorrect_answers: i64,
    pub detailed_results: Vec<DetailedResult>,
}

/// Scores `responses` against every question of `quiz`, in quiz order.
///
/// Answers are compared by exact string equality. A question with no
/// response, and a response naming a question that is not in the quiz, both
/// count as "no answer". When several responses target the same question the
/// last one wins.
pub fn evaluate(quiz: &Quiz, responses: &[QuizResponse]) -> Evaluation {
    // Later inserts overwrite earlier ones.
    let answers: HashMap<&str, &str> = responses
        .iter()
        .map(|r| (r.question_id.as_str(), r.selected_answer.as_str()))
        .collect();

    let detailed_results: Vec<DetailedResult> = quiz
        .questions
        .iter()
        .map(|q| {
            let selected = answers.get(q.id.as_str()).copied();
            DetailedResult {
                question_id: q.id.clone(),
                question_text: q.question_text.clone(),
                selected_answer: selected.map(str::to_string),
                correct_answer: q.correct_answer.clone(),
                is_correct: selected == Some(q.correct_answer.as_str()),
                explanation: q.explanation.clone(),
            }
        })
        .collect();

    let total_questions = detailed_results.len() as i64;
    let score = detailed_results.iter().filter(|d| d.is_correct).count() as i64;

    Evaluation {
        score,
        total_questions,
        percentage: percentage(score, total_questions),
        correct_answers: score,
        incorrect_answers: total_questions - score,
        detailed_results,
    }
}

/// `score / total * 100` rounded to two decimals; zero for an empty quiz.
pub fn percentage(score: i64, total: i64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let raw = score as f64 / total as f64 * 100.0;
    (raw * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::quiz::{CreateQuestionRequest, CreateQuizRequest, QuestionType};

    fn q(text: &str, options: &[&str], answer: &str) -> CreateQuestionRequest {
        CreateQuestionRequest {
            question_text: text.to_string(),
            question_type: QuestionType::MultipleChoice,
            options: options.iter().map(|s| s.to_string()).collect(),
            correct_answer: answer.to_string(),
            explanation: Some(format!("The answer is {}", answer)),
        }
    }

    fn python_quiz() -> Quiz {
        Quiz::from_request(CreateQuizRequest {
            title: "Introduction to Python Programming".to_string(),
            subject: "Computer Science".to_string(),
            description: None,
            time_limit: Some(30),
            questions: vec![
                q("Create a list?", &["list = []", "list = {}"], "list = []"),
                q("Define a function?", &["function", "def"], "def"),
                q(
                    "What does len() return?",
                    &["The length of an object", "The type of an object"],
                    "The length of an object",
                ),
            ],
        })
    }

    fn answer(quiz: &Quiz, index: usize, selected: &str) -> QuizResponse {
        QuizResponse {
            question_id: quiz.questions[index].id.clone(),
            selected_answer: selected.to_string(),
        }
    }

    #[test]
    fn two_of_three_correct() {
        let quiz = python_quiz();
        let responses = vec![
            answer(&quiz, 0, "list = []"),
            answer(&quiz, 1, "def"),
            answer(&quiz, 2, "The type of an object"),
        ];

        let eval = evaluate(&quiz, &responses);
        assert_eq!(eval.score, 2);
        assert_eq!(eval.correct_answers, 2);
        assert_eq!(eval.incorrect_answers, 1);
        assert_eq!(eval.total_questions, 3);
        assert_eq!(eval.percentage, 66.67);
        assert_eq!(eval.detailed_results.len(), 3);
        assert!(!eval.detailed_results[2].is_correct);
        assert_eq!(
            eval.detailed_results[2].correct_answer,
            "The length of an object"
        );
    }

    #[test]
    fn empty_responses_score_zero() {
        let quiz = python_quiz();
        let eval = evaluate(&quiz, &[]);

        assert_eq!(eval.score, 0);
        assert_eq!(eval.percentage, 0.0);
        assert_eq!(eval.incorrect_answers, 3);
        assert_eq!(eval.detailed_results.len(), 3);
        assert!(eval.detailed_results.iter().all(|d| d.selected_answer.is_none()));
    }

    #[test]
    fn unknown_question_id_is_ignored() {
        let quiz = python_quiz();
        let responses = vec![
            QuizResponse {
                question_id: "not-in-this-quiz".to_string(),
                selected_answer: "def".to_string(),
            },
            answer(&quiz, 1, "def"),
        ];

        let eval = evaluate(&quiz, &responses);
        assert_eq!(eval.score, 1);
        assert_eq!(eval.detailed_results.len(), 3);
        assert!(
            eval.detailed_results
                .iter()
                .all(|d| d.question_id != "not-in-this-quiz")
        );
    }

    #[test]
    fn duplicate_responses_last_one_wins() {
        let quiz = python_quiz();

        let wrong_then_right = vec![answer(&quiz, 1, "function"), answer(&quiz, 1, "def")];
        let eval = evaluate(&quiz, &wrong_then_right);
        assert_eq!(eval.score, 1);
        assert_eq!(eval.detailed_results[1].selected_answer.as_deref(), Some("def"));

        let right_then_wrong = vec![answer(&quiz, 1, "def"), answer(&quiz, 1, "function")];
        let eval = evaluate(&quiz, &right_then_wrong);
        assert_eq!(eval.score, 0);
        assert_eq!(
            eval.detailed_results[1].selected_answer.as_deref(),
            Some("function")
        );
    }

    #[test]
    fn comparison_is_exact() {
        let quiz = python_quiz();
        let responses = vec![answer(&quiz, 1, "Def"), answer(&quiz, 0, "list = [] ")];

        assert_eq!(evaluate(&quiz, &responses).score, 0);
    }

    #[test]
    fn empty_quiz_has_zero_percentage() {
        let mut quiz = python_quiz();
        quiz.questions.clear();

        let eval = evaluate(&quiz, &[]);
        assert_eq!(eval.total_questions, 0);
        assert_eq!(eval.percentage, 0.0);
        assert_eq!(eval.incorrect_answers, 0);
    }

    #[test]
    fn detail_keeps_explanations() {
        let quiz = python_quiz();
        let eval = evaluate(&quiz, &[answer(&quiz, 0, "list = []")]);

        for (detail, question) in eval.detailed_results.iter().zip(&quiz.questions) {
            assert_eq!(detail.question_id, question.id);
            assert_eq!(detail.explanation, question.explanation);
        }
    }

    #[test]
    fn percentage_rounds_to_two_decimals() {
        assert_eq!(percentage(1, 3), 33.33);
        assert_eq!(percentage(2, 3), 66.67);
        assert_eq!(percentage(1, 8), 12.5);
        assert_eq!(percentage(5, 5), 100.0);
        assert_eq!(percentage(0, 0), 0.0);
    }

    #[test]
    fn counts_always_add_up() {
        let quiz = python_quiz();
        for k in 0..=3 {
            let responses: Vec<QuizResponse> = quiz
                .questions
                .iter()
                .take(k)
                .map(|q| QuizResponse {
                    question_id: q.id.clone(),
                    selected_answer: q.correct_answer.clone(),
                })
                .collect();

            let eval = evaluate(&quiz, &responses);
            assert_eq!(eval.score, k as i64);
            assert_eq!(eval.correct_answers + eval.incorrect_answers, 3);
            assert_eq!(eval.percentage, percentage(k as i64, 3));
        }
    }
}
