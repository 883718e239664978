//! Route definitions for `/users`.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET    /              -> list
/// GET    /{id}          -> get_by_id
/// PUT    /me            -> update_me
/// PUT    /me/password   -> change_password
/// DELETE /me            -> delete_me
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list))
        .route("/me", put(users::update_me).delete(users::delete_me))
        .route("/me/password", put(users::change_password))
        .route("/{id}", get(users::get_by_id))
}
