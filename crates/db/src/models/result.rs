//! Performance ledger models: rolling aggregates, attempt history, and the
//! row shapes returned by the reporting queries.

use serde::Serialize;
use sqlx::FromRow;

use quizhub_core::types::{DbId, Timestamp};

/// A row from the `general_results` table: one per (user, company), holding
/// the rolling GPA over all of that user's attempts in the company.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GeneralResult {
    pub id: DbId,
    pub user_id: DbId,
    pub company_id: DbId,
    pub gpa: f64,
    pub update_date: Timestamp,
}

/// A row from the `quiz_results` table: one immutable record per attempt.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuizResult {
    pub id: DbId,
    pub quiz_id: DbId,
    pub general_result_id: DbId,
    pub correct_answers: i32,
    pub gpa: f64,
    pub date_of_passage: Timestamp,
}

/// Input for recording one quiz attempt. The correct count and per-attempt
/// GPA come from the scoring engine; the repository recomputes the rolling
/// aggregate inside its own transaction.
#[derive(Debug, Clone)]
pub struct NewAttempt {
    pub user_id: DbId,
    pub company_id: DbId,
    pub quiz_id: DbId,
    pub correct_answers: i32,
    pub gpa: f64,
}

/// Outcome of recording an attempt: the appended history row plus the
/// recomputed rolling GPA.
#[derive(Debug, Clone)]
pub struct AttemptOutcome {
    pub quiz_result: QuizResult,
    pub general_gpa: f64,
}

/// Rolling GPA of one user within a company.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserGpa {
    pub user_id: DbId,
    pub gpa: f64,
}

/// One attempt of a user on a quiz, for the per-(user, quiz) report.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserQuizGpa {
    pub quiz_id: DbId,
    pub gpa: f64,
    pub date_of_passage: Timestamp,
}

/// A company worker with the time of their most recent submission, or null
/// if they have never taken a quiz.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WorkerLastTest {
    pub user_id: DbId,
    pub last_test_at: Option<Timestamp>,
}

/// The caller's own rolling GPA in one company.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CompanyGpa {
    pub company_id: DbId,
    pub gpa: f64,
}

/// One of the caller's own past attempts.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AttemptTime {
    pub quiz_id: DbId,
    pub date_of_passage: Timestamp,
}
