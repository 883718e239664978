//! Route definitions for the caller-scoped membership handshake views:
//! `/invites` (invites I received) and `/applications` (applications to
//! companies I own). Creation endpoints live under `/companies/{id}`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::membership;
use crate::state::AppState;

/// Routes merged into the `/api/v1` root.
///
/// ```text
/// GET  /invites                      -> my pending invites
/// POST /invites/{id}/accept          -> accept an invite
/// POST /invites/{id}/decline         -> decline an invite
/// GET  /applications                 -> pending applications to my companies
/// POST /applications/{id}/accept     -> accept an application
/// POST /applications/{id}/decline    -> decline an application
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/invites", get(membership::my_invites))
        .route("/invites/{id}/accept", post(membership::accept_invite))
        .route("/invites/{id}/decline", post(membership::decline_invite))
        .route("/applications", get(membership::pending_applications))
        .route(
            "/applications/{id}/accept",
            post(membership::accept_application),
        )
        .route(
            "/applications/{id}/decline",
            post(membership::decline_application),
        )
}
