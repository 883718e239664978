//! Handlers for the `/companies` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use quizhub_core::error::CoreError;
use quizhub_core::types::DbId;
use quizhub_db::models::company::{Company, CreateCompany, UpdateCompanyInfo};
use quizhub_db::repositories::CompanyRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac;
use crate::query::PaginationParams;
use crate::state::AppState;

/// Request body for `PUT /companies/{id}/visibility`.
#[derive(Debug, Deserialize)]
pub struct VisibilityRequest {
    pub hidden: bool,
}

/// GET /api/v1/companies
///
/// Public company directory (hidden companies excluded).
pub async fn list_public(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Vec<Company>>> {
    let companies = CompanyRepo::list_public(&state.pool, params.limit, params.offset).await?;
    Ok(Json(companies))
}

/// GET /api/v1/companies/mine
///
/// Companies the caller is a worker of, in any role.
pub async fn mine(State(state): State<AppState>, auth: AuthUser) -> AppResult<Json<Vec<Company>>> {
    let companies = CompanyRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(companies))
}

/// POST /api/v1/companies
///
/// Create a company; the caller becomes its owner.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateCompany>,
) -> AppResult<(StatusCode, Json<Company>)> {
    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Company title must not be empty".into(),
        )));
    }

    let company = CompanyRepo::create(&state.pool, &input, auth.user_id).await?;
    Ok((StatusCode::CREATED, Json(company)))
}

/// GET /api/v1/companies/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Company>> {
    let company = rbac::require_company(&state.pool, id).await?;
    Ok(Json(company))
}

/// PUT /api/v1/companies/{id}
///
/// Update title/description. Owner only.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCompanyInfo>,
) -> AppResult<Json<Company>> {
    if input.title.is_none() && input.description.is_none() {
        return Err(AppError::Core(CoreError::Validation(
            "There is not enough data to update".into(),
        )));
    }

    rbac::require_owner(&state.pool, id, auth.user_id).await?;

    let company = CompanyRepo::update_info(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Company",
            id,
        }))?;
    Ok(Json(company))
}

/// PUT /api/v1/companies/{id}/visibility
///
/// Toggle directory visibility. Owner only.
pub async fn set_visibility(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<VisibilityRequest>,
) -> AppResult<Json<Company>> {
    rbac::require_owner(&state.pool, id, auth.user_id).await?;

    let company = CompanyRepo::set_hidden(&state.pool, id, input.hidden)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Company",
            id,
        }))?;
    Ok(Json(company))
}

/// DELETE /api/v1/companies/{id}
///
/// Delete the company and everything it owns. Owner only.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    rbac::require_owner(&state.pool, id, auth.user_id).await?;

    let deleted = CompanyRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Company",
            id,
        }))
    }
}
