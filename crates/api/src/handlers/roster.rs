//! Handlers for a company's worker roster: listing, role changes, removal.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use quizhub_core::authz;
use quizhub_core::error::CoreError;
use quizhub_core::roles::{is_assignable_role, ROLE_OWNER};
use quizhub_core::types::DbId;
use quizhub_db::models::worker::Worker;
use quizhub_db::repositories::WorkerRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac;
use crate::state::AppState;

/// Request body for `PUT /companies/{id}/workers/{user_id}/role`.
#[derive(Debug, Deserialize)]
pub struct ChangeRoleRequest {
    pub role: String,
}

/// GET /api/v1/companies/{id}/workers
///
/// Roster listing; any member of the company may read it.
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(company_id): Path<DbId>,
) -> AppResult<Json<Vec<Worker>>> {
    rbac::require_member(&state.pool, company_id, auth.user_id).await?;

    let workers = WorkerRepo::list_by_company(&state.pool, company_id).await?;
    Ok(Json(workers))
}

/// PUT /api/v1/companies/{id}/workers/{user_id}/role
///
/// Assign or revoke the admin role. Owner only. The owner row itself can
/// never be re-roled, which keeps exactly one owner per company.
pub async fn change_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((company_id, user_id)): Path<(DbId, DbId)>,
    Json(input): Json<ChangeRoleRequest>,
) -> AppResult<Json<Worker>> {
    if !is_assignable_role(&input.role) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Role must be 'admin' or 'staff', got '{}'",
            input.role
        ))));
    }

    rbac::require_owner(&state.pool, company_id, auth.user_id).await?;

    let worker = WorkerRepo::find(&state.pool, company_id, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Worker",
            id: user_id,
        }))?;

    if worker.role == ROLE_OWNER {
        return Err(AppError::Core(CoreError::Validation(
            "The owner's role cannot be changed".into(),
        )));
    }

    let worker = WorkerRepo::update_role(&state.pool, company_id, user_id, &input.role)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Worker",
            id: user_id,
        }))?;
    Ok(Json(worker))
}

/// DELETE /api/v1/companies/{id}/workers/{user_id}
///
/// Remove a worker from the roster. Owner only; the acting owner cannot
/// remove themselves, so a company never loses its owner.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((company_id, user_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    authz::ensure_distinct_user(auth.user_id, user_id, "delete")?;

    rbac::require_owner(&state.pool, company_id, auth.user_id).await?;

    let deleted = WorkerRepo::delete(&state.pool, company_id, user_id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Worker",
            id: user_id,
        }))
    }
}
