pub mod auth;
pub mod company;
pub mod health;
pub mod membership;
pub mod performance;
pub mod quiz;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                                   register (public)
/// /auth/login                                      login (public)
/// /auth/me                                         current user
///
/// /users                                           list
/// /users/{id}                                      get
/// /users/me                                        update profile, delete
/// /users/me/password                               change password
///
/// /companies                                       public directory, create
/// /companies/mine                                  my companies
/// /companies/{id}                                  get, update, delete
/// /companies/{id}/visibility                       toggle hidden
/// /companies/{id}/workers[...]                     roster, roles, removal
/// /companies/{id}/invites                          invite a user
/// /companies/{id}/applications                     apply to join
/// /companies/{id}/quizzes[...]                     catalog, attempts
/// /companies/{id}/performance[...]                 manager reporting
///
/// /invites[...]                                    my invites, accept/decline
/// /applications[...]                               owner queue, accept/decline
///
/// /me/gpa                                          my rolling GPA per company
/// /me/attempts                                     my attempt history
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/companies", company::router())
        .nest("/companies/{id}/quizzes", quiz::router())
        .nest("/companies/{id}/performance", performance::company_router())
        .nest("/me", performance::me_router())
        .merge(membership::router())
}
