//! Repository for the `companies` table.

use sqlx::PgPool;

use quizhub_core::roles::ROLE_OWNER;
use quizhub_core::types::DbId;

use crate::models::company::{Company, CreateCompany, UpdateCompanyInfo};
use crate::repositories::{clamp_limit, clamp_offset};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, hidden, created_at";

/// Provides CRUD operations for companies.
pub struct CompanyRepo;

impl CompanyRepo {
    /// Insert a new company and enroll its creator as the owner worker, in
    /// one transaction. A company never exists without exactly one owner.
    pub async fn create(
        pool: &PgPool,
        input: &CreateCompany,
        owner_user_id: DbId,
    ) -> Result<Company, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert_query = format!(
            "INSERT INTO companies (title, description)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        let company = sqlx::query_as::<_, Company>(&insert_query)
            .bind(&input.title)
            .bind(&input.description)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("INSERT INTO workers (user_id, company_id, role) VALUES ($1, $2, $3)")
            .bind(owner_user_id)
            .bind(company.id)
            .bind(ROLE_OWNER)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(company)
    }

    /// Find a company by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Company>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM companies WHERE id = $1");
        sqlx::query_as::<_, Company>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List companies visible in the public directory (hidden = false),
    /// ordered by ID ascending.
    pub async fn list_public(
        pool: &PgPool,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Company>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM companies
             WHERE hidden = FALSE
             ORDER BY id ASC
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Company>(&query)
            .bind(clamp_limit(limit))
            .bind(clamp_offset(offset))
            .fetch_all(pool)
            .await
    }

    /// List the companies a user is a worker of, in any role.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Company>, sqlx::Error> {
        let query = "SELECT c.id, c.title, c.description, c.hidden, c.created_at
             FROM companies c
             JOIN workers w ON w.company_id = c.id
             WHERE w.user_id = $1
             ORDER BY c.id ASC";
        sqlx::query_as::<_, Company>(query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Update a company's title/description. Only non-`None` fields in
    /// `input` are applied. Returns `None` if no row with the given `id`
    /// exists.
    pub async fn update_info(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCompanyInfo,
    ) -> Result<Option<Company>, sqlx::Error> {
        let query = format!(
            "UPDATE companies SET
                title = COALESCE($2, title),
                description = COALESCE($3, description)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Company>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Toggle a company's directory visibility. Returns `None` if no row
    /// with the given `id` exists.
    pub async fn set_hidden(
        pool: &PgPool,
        id: DbId,
        hidden: bool,
    ) -> Result<Option<Company>, sqlx::Error> {
        let query = format!(
            "UPDATE companies SET hidden = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Company>(&query)
            .bind(id)
            .bind(hidden)
            .fetch_optional(pool)
            .await
    }

    /// Delete a company by ID. Workers, requests, quizzes, and results
    /// cascade at the schema level. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM companies WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
