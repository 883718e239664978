//! Handlers for the `/users` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use quizhub_core::error::CoreError;
use quizhub_core::types::DbId;
use quizhub_db::models::user::{UpdateUserProfile, UserResponse};
use quizhub_db::repositories::UserRepo;

use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::state::AppState;

/// Request body for `PUT /users/me/password`.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub password: String,
}

/// GET /api/v1/users
pub async fn list(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = UserRepo::list(&state.pool, params.limit, params.offset).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// GET /api/v1/users/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(user.into()))
}

/// PUT /api/v1/users/me
///
/// Update the caller's own profile. At least one field must be present.
pub async fn update_me(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<UpdateUserProfile>,
) -> AppResult<Json<UserResponse>> {
    if input.first_name.is_none() && input.last_name.is_none() {
        return Err(AppError::Core(CoreError::Validation(
            "There is not enough data to update".into(),
        )));
    }

    let user = UserRepo::update_profile(&state.pool, auth.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;
    Ok(Json(user.into()))
}

/// PUT /api/v1/users/me/password
///
/// Change the caller's password. The new password must differ from the old
/// one.
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<ChangePasswordRequest>,
) -> AppResult<StatusCode> {
    validate_password_strength(&input.password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    if let Some(current_hash) = user.password_hash.as_deref() {
        let unchanged = verify_password(&input.password, current_hash)
            .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
        if unchanged {
            return Err(AppError::Core(CoreError::Validation(
                "The new password matches the old one".into(),
            )));
        }
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    UserRepo::update_password_hash(&state.pool, auth.user_id, &password_hash).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/users/me
pub async fn delete_me(State(state): State<AppState>, auth: AuthUser) -> AppResult<StatusCode> {
    let deleted = UserRepo::delete(&state.pool, auth.user_id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))
    }
}
