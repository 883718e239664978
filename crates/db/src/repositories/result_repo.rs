//! Repository for the performance ledger (`general_results`,
//! `quiz_results`).

use sqlx::PgPool;

use quizhub_core::types::{DbId, Timestamp};

use crate::models::result::{
    AttemptOutcome, AttemptTime, CompanyGpa, GeneralResult, NewAttempt, QuizResult, UserGpa,
    UserQuizGpa, WorkerLastTest,
};

/// Column list shared across general_results queries.
const GENERAL_COLUMNS: &str = "id, user_id, company_id, gpa, update_date";

/// Column list shared across quiz_results queries.
const RESULT_COLUMNS: &str =
    "id, quiz_id, general_result_id, correct_answers, gpa, date_of_passage";

/// Provides ledger operations for quiz attempts and rolling aggregates.
pub struct ResultRepo;

impl ResultRepo {
    /// Record one quiz attempt and recompute the user's rolling GPA for the
    /// company, all in one transaction.
    ///
    /// The general_results row is created on first submission and locked
    /// with `FOR UPDATE` after that, so concurrent submissions for the same
    /// (user, company) serialize instead of losing updates. The rolling GPA
    /// is cumulative -- sum of correct answers over the sum of each
    /// attempted quiz's *current* question count -- not an average of
    /// per-attempt GPAs.
    pub async fn record_attempt(
        pool: &PgPool,
        input: &NewAttempt,
    ) -> Result<AttemptOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query(
            "INSERT INTO general_results (user_id, company_id)
             VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_general_results_user_company DO NOTHING",
        )
        .bind(input.user_id)
        .bind(input.company_id)
        .execute(&mut *tx)
        .await?;

        let lock_query = format!(
            "SELECT {GENERAL_COLUMNS} FROM general_results
             WHERE user_id = $1 AND company_id = $2
             FOR UPDATE"
        );
        let general = sqlx::query_as::<_, GeneralResult>(&lock_query)
            .bind(input.user_id)
            .bind(input.company_id)
            .fetch_one(&mut *tx)
            .await?;

        let insert_query = format!(
            "INSERT INTO quiz_results (quiz_id, general_result_id, correct_answers, gpa)
             VALUES ($1, $2, $3, $4)
             RETURNING {RESULT_COLUMNS}"
        );
        let quiz_result = sqlx::query_as::<_, QuizResult>(&insert_query)
            .bind(input.quiz_id)
            .bind(general.id)
            .bind(input.correct_answers)
            .bind(input.gpa)
            .fetch_one(&mut *tx)
            .await?;

        let (total_correct, total_questions): (i64, i64) = sqlx::query_as(
            "SELECT COALESCE(SUM(qr.correct_answers), 0),
                    COALESCE(SUM(q.number_of_questions), 0)
             FROM quiz_results qr
             JOIN quizzes q ON q.id = qr.quiz_id
             WHERE qr.general_result_id = $1",
        )
        .bind(general.id)
        .fetch_one(&mut *tx)
        .await?;

        // Every attempt references a quiz with at least one question, so
        // the denominator is positive whenever any attempt exists.
        let general_gpa = if total_questions > 0 {
            total_correct as f64 / total_questions as f64
        } else {
            0.0
        };

        sqlx::query("UPDATE general_results SET gpa = $2, update_date = NOW() WHERE id = $1")
            .bind(general.id)
            .bind(general_gpa)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(AttemptOutcome {
            quiz_result,
            general_gpa,
        })
    }

    /// Find the rolling aggregate for a (user, company) pair.
    pub async fn find_general(
        pool: &PgPool,
        user_id: DbId,
        company_id: DbId,
    ) -> Result<Option<GeneralResult>, sqlx::Error> {
        let query = format!(
            "SELECT {GENERAL_COLUMNS} FROM general_results
             WHERE user_id = $1 AND company_id = $2"
        );
        sqlx::query_as::<_, GeneralResult>(&query)
            .bind(user_id)
            .bind(company_id)
            .fetch_optional(pool)
            .await
    }

    /// Rolling GPA per user across a company, restricted to aggregates
    /// updated at or after `since` (inclusive lower bound).
    pub async fn company_user_gpas(
        pool: &PgPool,
        company_id: DbId,
        since: Timestamp,
    ) -> Result<Vec<UserGpa>, sqlx::Error> {
        sqlx::query_as(
            "SELECT user_id, gpa FROM general_results
             WHERE company_id = $1 AND update_date >= $2
             ORDER BY user_id ASC",
        )
        .bind(company_id)
        .bind(since)
        .fetch_all(pool)
        .await
    }

    /// Per-quiz attempt GPAs for one user in a company, restricted to
    /// aggregates updated at or after `since` (inclusive lower bound).
    pub async fn user_quiz_gpas(
        pool: &PgPool,
        company_id: DbId,
        user_id: DbId,
        since: Timestamp,
    ) -> Result<Vec<UserQuizGpa>, sqlx::Error> {
        sqlx::query_as(
            "SELECT qr.quiz_id, qr.gpa, qr.date_of_passage
             FROM quiz_results qr
             JOIN general_results gr ON gr.id = qr.general_result_id
             WHERE gr.company_id = $1 AND gr.user_id = $2 AND gr.update_date >= $3
             ORDER BY qr.date_of_passage ASC",
        )
        .bind(company_id)
        .bind(user_id)
        .bind(since)
        .fetch_all(pool)
        .await
    }

    /// Every worker of a company with the time of their most recent
    /// submission; null for workers who have never taken a quiz.
    pub async fn worker_last_tests(
        pool: &PgPool,
        company_id: DbId,
    ) -> Result<Vec<WorkerLastTest>, sqlx::Error> {
        sqlx::query_as(
            "SELECT w.user_id, gr.update_date AS last_test_at
             FROM workers w
             LEFT JOIN general_results gr
                ON gr.user_id = w.user_id AND gr.company_id = w.company_id
             WHERE w.company_id = $1
             ORDER BY w.id ASC",
        )
        .bind(company_id)
        .fetch_all(pool)
        .await
    }

    /// The caller's own rolling GPA per company, restricted to aggregates
    /// updated at or after `since` (inclusive lower bound).
    pub async fn my_gpas(
        pool: &PgPool,
        user_id: DbId,
        since: Timestamp,
    ) -> Result<Vec<CompanyGpa>, sqlx::Error> {
        sqlx::query_as(
            "SELECT company_id, gpa FROM general_results
             WHERE user_id = $1 AND update_date >= $2
             ORDER BY company_id ASC",
        )
        .bind(user_id)
        .bind(since)
        .fetch_all(pool)
        .await
    }

    /// The caller's full attempt history across all companies.
    pub async fn my_attempts(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<AttemptTime>, sqlx::Error> {
        sqlx::query_as(
            "SELECT qr.quiz_id, qr.date_of_passage
             FROM quiz_results qr
             JOIN general_results gr ON gr.id = qr.general_result_id
             WHERE gr.user_id = $1
             ORDER BY qr.date_of_passage ASC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}
