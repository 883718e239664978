//! Handlers for the membership handshake: company-issued invites and
//! user-issued join applications.
//!
//! Both travel through the `requests` table; the direction records who
//! initiated. Accepting either enrolls the user as a staff worker.
//! Resolved requests are terminal.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use quizhub_core::authz;
use quizhub_core::error::CoreError;
use quizhub_core::requests::{
    ensure_pending, FROM_COMPANY, FROM_USER, STATUS_ACCEPTED, STATUS_REJECTED,
};
use quizhub_core::types::DbId;
use quizhub_db::models::request::{MembershipRequest, PendingApplication, PendingInvite};
use quizhub_db::repositories::{RequestRepo, UserRepo, WorkerRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac;
use crate::state::AppState;

/// Request body for `POST /companies/{id}/invites`.
#[derive(Debug, Deserialize)]
pub struct CreateInviteRequest {
    pub user_id: DbId,
}

// ---------------------------------------------------------------------------
// Invites (company -> user)
// ---------------------------------------------------------------------------

/// POST /api/v1/companies/{id}/invites
///
/// Invite a user to the company. Owner only.
pub async fn create_invite(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(company_id): Path<DbId>,
    Json(input): Json<CreateInviteRequest>,
) -> AppResult<(StatusCode, Json<MembershipRequest>)> {
    authz::ensure_distinct_user(auth.user_id, input.user_id, "invite")?;

    rbac::require_owner(&state.pool, company_id, auth.user_id).await?;

    if UserRepo::find_by_id(&state.pool, input.user_id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: input.user_id,
        }));
    }

    ensure_not_enrolled_or_invited(&state, input.user_id, company_id, FROM_COMPANY).await?;

    let invite =
        RequestRepo::create(&state.pool, input.user_id, company_id, FROM_COMPANY).await?;
    Ok((StatusCode::CREATED, Json(invite)))
}

/// GET /api/v1/invites
///
/// The caller's pending invites.
pub async fn my_invites(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<Vec<PendingInvite>>> {
    let invites = RequestRepo::pending_invites_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(invites))
}

/// POST /api/v1/invites/{id}/accept
pub async fn accept_invite(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<MembershipRequest>> {
    resolve_invite(&state, auth, id, STATUS_ACCEPTED).await
}

/// POST /api/v1/invites/{id}/decline
pub async fn decline_invite(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<MembershipRequest>> {
    resolve_invite(&state, auth, id, STATUS_REJECTED).await
}

// ---------------------------------------------------------------------------
// Applications (user -> company)
// ---------------------------------------------------------------------------

/// POST /api/v1/companies/{id}/applications
///
/// Apply to join a company.
pub async fn apply(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(company_id): Path<DbId>,
) -> AppResult<(StatusCode, Json<MembershipRequest>)> {
    rbac::require_company(&state.pool, company_id).await?;

    ensure_not_enrolled_or_invited(&state, auth.user_id, company_id, FROM_USER).await?;

    let request = RequestRepo::create(&state.pool, auth.user_id, company_id, FROM_USER).await?;
    Ok((StatusCode::CREATED, Json(request)))
}

/// GET /api/v1/applications
///
/// Pending applications across every company the caller owns.
pub async fn pending_applications(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<Vec<PendingApplication>>> {
    let applications =
        RequestRepo::pending_applications_for_owner(&state.pool, auth.user_id).await?;
    Ok(Json(applications))
}

/// POST /api/v1/applications/{id}/accept
pub async fn accept_application(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<MembershipRequest>> {
    resolve_application(&state, auth, id, STATUS_ACCEPTED).await
}

/// POST /api/v1/applications/{id}/decline
pub async fn decline_application(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<MembershipRequest>> {
    resolve_application(&state, auth, id, STATUS_REJECTED).await
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Reject the handshake when the user is already enrolled or already has an
/// active request in the same direction. The original pending request stays
/// untouched.
async fn ensure_not_enrolled_or_invited(
    state: &AppState,
    user_id: DbId,
    company_id: DbId,
    direction: &str,
) -> AppResult<()> {
    if WorkerRepo::find(&state.pool, company_id, user_id)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "The user is already an employee of the company".into(),
        )));
    }

    if RequestRepo::find_pending(&state.pool, user_id, company_id, direction)
        .await?
        .is_some()
    {
        let message = match direction {
            FROM_COMPANY => "The user is already invited",
            _ => "The request has already been sent",
        };
        return Err(AppError::Core(CoreError::Conflict(message.into())));
    }

    Ok(())
}

/// Resolve an invite on behalf of the invited user.
async fn resolve_invite(
    state: &AppState,
    auth: AuthUser,
    id: DbId,
    status: &str,
) -> AppResult<Json<MembershipRequest>> {
    let request = RequestRepo::find_by_id(&state.pool, id)
        .await?
        .filter(|r| r.request_from == FROM_COMPANY)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Invite",
            id,
        }))?;

    if request.user_id != auth.user_id {
        return Err(AppError::Core(CoreError::Validation(
            "You don't have this invite".into(),
        )));
    }
    ensure_pending(&request.status)?;

    finish_resolution(state, id, status).await
}

/// Resolve an application on behalf of the target company's owner.
async fn resolve_application(
    state: &AppState,
    auth: AuthUser,
    id: DbId,
    status: &str,
) -> AppResult<Json<MembershipRequest>> {
    let request = RequestRepo::find_by_id(&state.pool, id)
        .await?
        .filter(|r| r.request_from == FROM_USER)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Request",
            id,
        }))?;

    rbac::require_owner(&state.pool, request.company_id, auth.user_id).await?;
    ensure_pending(&request.status)?;

    finish_resolution(state, id, status).await
}

/// Apply the conditional status flip; a `None` means another resolution won
/// the race after our pending check.
async fn finish_resolution(
    state: &AppState,
    id: DbId,
    status: &str,
) -> AppResult<Json<MembershipRequest>> {
    let resolved = RequestRepo::resolve(&state.pool, id, status)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation(
                "Request was already resolved".into(),
            ))
        })?;
    Ok(Json(resolved))
}
