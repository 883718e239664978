//! Route definitions for a company's quiz catalog and attempts.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::{performance, quiz};
use crate::state::AppState;

/// Routes mounted at `/companies/{id}/quizzes`.
///
/// ```text
/// GET    /                                    -> list
/// POST   /                                    -> create
/// GET    /{quiz_id}                           -> get_detail
/// DELETE /{quiz_id}                           -> delete
/// POST   /{quiz_id}/questions                 -> add_questions
/// DELETE /{quiz_id}/questions/{question_id}   -> remove_question
/// POST   /{quiz_id}/attempts                  -> submit attempt
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(quiz::list).post(quiz::create))
        .route("/{quiz_id}", get(quiz::get_detail).delete(quiz::delete))
        .route("/{quiz_id}/questions", post(quiz::add_questions))
        .route(
            "/{quiz_id}/questions/{question_id}",
            delete(quiz::remove_question),
        )
        .route("/{quiz_id}/attempts", post(performance::submit))
}
