//! Quiz content models: quizzes, questions, answers, and their DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use quizhub_core::catalog::NewQuestion;
use quizhub_core::types::{DbId, Timestamp};

/// A row from the `quizzes` table.
///
/// `number_of_questions` is a denormalized count; every catalog mutation
/// updates it in the same transaction as the question rows, so it always
/// equals the live count of owned questions.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Quiz {
    pub id: DbId,
    pub company_id: DbId,
    pub title: String,
    pub description: String,
    pub passing_frequency: i32,
    pub number_of_questions: i32,
    pub created_at: Timestamp,
}

/// A row from the `questions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Question {
    pub id: DbId,
    pub quiz_id: DbId,
    pub question: String,
}

/// A row from the `answers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Answer {
    pub id: DbId,
    pub question_id: DbId,
    pub answer: String,
    pub is_correct: bool,
}

/// DTO for creating a new quiz, including its initial question list.
/// Question payloads are validated by `quizhub_core::catalog` before any
/// row is written.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateQuiz {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub passing_frequency: i32,
    pub questions: Vec<NewQuestion>,
}

/// A question with its answer options, as returned by detail queries.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionWithAnswers {
    pub id: DbId,
    pub question: String,
    pub answers: Vec<Answer>,
}

/// Full quiz detail: the quiz row plus its questions and answer options.
#[derive(Debug, Clone, Serialize)]
pub struct QuizDetail {
    #[serde(flatten)]
    pub quiz: Quiz,
    pub questions: Vec<QuestionWithAnswers>,
}
