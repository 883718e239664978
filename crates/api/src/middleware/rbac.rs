//! Company-scoped role-based access control guards.
//!
//! Roles live per (user, company) in the `workers` table, so unlike a
//! global-role system these cannot be extractors -- the company id is only
//! known inside the handler. Each guard checks company existence first
//! (404), then fetches the actor's role snapshot and delegates the decision
//! to the pure predicates in `quizhub_core::authz` (403). Guards never
//! mutate state.

use sqlx::PgPool;

use quizhub_core::authz;
use quizhub_core::error::CoreError;
use quizhub_core::types::DbId;
use quizhub_db::models::company::Company;
use quizhub_db::repositories::{CompanyRepo, WorkerRepo};

use crate::error::{AppError, AppResult};

/// Fetch a company or fail with 404.
pub async fn require_company(pool: &PgPool, company_id: DbId) -> AppResult<Company> {
    CompanyRepo::find_by_id(pool, company_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Company",
            id: company_id,
        }))
}

/// Require the actor to be a member of the company, in any role.
pub async fn require_member(pool: &PgPool, company_id: DbId, user_id: DbId) -> AppResult<()> {
    require_company(pool, company_id).await?;
    let role = WorkerRepo::find_role(pool, company_id, user_id).await?;
    authz::ensure_member(role.as_deref())?;
    Ok(())
}

/// Require the actor to be the owner of the company.
pub async fn require_owner(pool: &PgPool, company_id: DbId, user_id: DbId) -> AppResult<()> {
    require_company(pool, company_id).await?;
    let role = WorkerRepo::find_role(pool, company_id, user_id).await?;
    authz::ensure_owner(role.as_deref())?;
    Ok(())
}

/// Require the actor to be the owner or an admin of the company.
pub async fn require_owner_or_admin(
    pool: &PgPool,
    company_id: DbId,
    user_id: DbId,
) -> AppResult<()> {
    require_company(pool, company_id).await?;
    let role = WorkerRepo::find_role(pool, company_id, user_id).await?;
    authz::ensure_owner_or_admin(role.as_deref())?;
    Ok(())
}
