//! Repository for the `workers` table.

use sqlx::PgPool;

use quizhub_core::types::DbId;

use crate::models::worker::Worker;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, company_id, role, created_at";

/// Provides roster operations for workers.
pub struct WorkerRepo;

impl WorkerRepo {
    /// Enroll a user in a company with the given role, returning the
    /// created row. The `uq_workers_user_company` constraint rejects a
    /// second membership for the same pair.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        company_id: DbId,
        role: &str,
    ) -> Result<Worker, sqlx::Error> {
        let query = format!(
            "INSERT INTO workers (user_id, company_id, role)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Worker>(&query)
            .bind(user_id)
            .bind(company_id)
            .bind(role)
            .fetch_one(pool)
            .await
    }

    /// Find a user's membership row in a company.
    pub async fn find(
        pool: &PgPool,
        company_id: DbId,
        user_id: DbId,
    ) -> Result<Option<Worker>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM workers WHERE company_id = $1 AND user_id = $2"
        );
        sqlx::query_as::<_, Worker>(&query)
            .bind(company_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch just a user's role in a company, `None` when not a member.
    /// This is the snapshot the authorization predicates decide over.
    pub async fn find_role(
        pool: &PgPool,
        company_id: DbId,
        user_id: DbId,
    ) -> Result<Option<String>, sqlx::Error> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT role FROM workers WHERE company_id = $1 AND user_id = $2")
                .bind(company_id)
                .bind(user_id)
                .fetch_optional(pool)
                .await?;
        Ok(row.map(|(role,)| role))
    }

    /// List a company's workers ordered by enrollment.
    pub async fn list_by_company(
        pool: &PgPool,
        company_id: DbId,
    ) -> Result<Vec<Worker>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM workers WHERE company_id = $1 ORDER BY id ASC"
        );
        sqlx::query_as::<_, Worker>(&query)
            .bind(company_id)
            .fetch_all(pool)
            .await
    }

    /// Change a worker's role. Returns `None` if the user has no membership
    /// row in the company.
    pub async fn update_role(
        pool: &PgPool,
        company_id: DbId,
        user_id: DbId,
        role: &str,
    ) -> Result<Option<Worker>, sqlx::Error> {
        let query = format!(
            "UPDATE workers SET role = $3
             WHERE company_id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Worker>(&query)
            .bind(company_id)
            .bind(user_id)
            .bind(role)
            .fetch_optional(pool)
            .await
    }

    /// Remove a user from a company's roster. Returns `true` if a row was
    /// removed.
    pub async fn delete(
        pool: &PgPool,
        company_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM workers WHERE company_id = $1 AND user_id = $2")
            .bind(company_id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
