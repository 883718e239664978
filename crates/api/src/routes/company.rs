//! Route definitions for `/companies` and the roster operations scoped
//! under a company.
//!
//! Quiz and performance routes for a company are mounted separately via
//! [`super::quiz`] and [`super::performance`].

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::{company, membership, roster};
use crate::state::AppState;

/// Routes mounted at `/companies`.
///
/// ```text
/// GET    /                              -> list_public
/// POST   /                              -> create
/// GET    /mine                          -> mine
/// GET    /{id}                          -> get_by_id
/// PUT    /{id}                          -> update
/// DELETE /{id}                          -> delete
/// PUT    /{id}/visibility               -> set_visibility
/// GET    /{id}/workers                  -> roster list
/// PUT    /{id}/workers/{user_id}/role   -> assign/revoke admin
/// DELETE /{id}/workers/{user_id}        -> remove worker
/// POST   /{id}/invites                  -> invite a user
/// POST   /{id}/applications             -> apply to join
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(company::list_public).post(company::create))
        .route("/mine", get(company::mine))
        .route(
            "/{id}",
            get(company::get_by_id)
                .put(company::update)
                .delete(company::delete),
        )
        .route("/{id}/visibility", put(company::set_visibility))
        .route("/{id}/workers", get(roster::list))
        .route("/{id}/workers/{user_id}", delete(roster::delete))
        .route("/{id}/workers/{user_id}/role", put(roster::change_role))
        .route("/{id}/invites", post(membership::create_invite))
        .route("/{id}/applications", post(membership::apply))
}
