//! Route definitions for performance reporting, both the manager view
//! scoped under a company and the self-service `/me` view.

use axum::routing::get;
use axum::Router;

use crate::handlers::performance;
use crate::state::AppState;

/// Routes mounted at `/companies/{id}/performance`. Owner/admin only.
///
/// ```text
/// GET /gpa?hours=                            -> rolling GPA per user
/// GET /workers/{user_id}/quiz-gpa?hours=     -> one worker's per-quiz GPAs
/// GET /last-tests                            -> time of last test per worker
/// ```
pub fn company_router() -> Router<AppState> {
    Router::new()
        .route("/gpa", get(performance::company_gpas))
        .route(
            "/workers/{user_id}/quiz-gpa",
            get(performance::worker_quiz_gpas),
        )
        .route("/last-tests", get(performance::last_tests))
}

/// Routes mounted at `/me`: the caller's own performance.
///
/// ```text
/// GET /gpa?hours=   -> rolling GPA per company
/// GET /attempts     -> attempt history with timestamps
/// ```
pub fn me_router() -> Router<AppState> {
    Router::new()
        .route("/gpa", get(performance::my_gpas))
        .route("/attempts", get(performance::my_attempts))
}
