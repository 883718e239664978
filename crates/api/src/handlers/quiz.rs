//! Handlers for a company's quiz catalog.
//!
//! Every mutation is guarded by the owner/admin predicate and keeps the
//! quiz's cached question count equal to the live count (the repository
//! updates both in one transaction).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use quizhub_core::catalog::{validate_added_questions, validate_new_quiz, NewQuestion};
use quizhub_core::error::CoreError;
use quizhub_core::types::DbId;
use quizhub_db::models::quiz::{CreateQuiz, Quiz, QuizDetail};
use quizhub_db::repositories::QuizRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac;
use crate::query::PaginationParams;
use crate::state::AppState;

/// Request body for `POST /companies/{id}/quizzes/{quiz_id}/questions`.
#[derive(Debug, Deserialize)]
pub struct AddQuestionsRequest {
    pub questions: Vec<NewQuestion>,
}

/// GET /api/v1/companies/{id}/quizzes
pub async fn list(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(company_id): Path<DbId>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Vec<Quiz>>> {
    rbac::require_company(&state.pool, company_id).await?;

    let quizzes =
        QuizRepo::list_by_company(&state.pool, company_id, params.limit, params.offset).await?;
    Ok(Json(quizzes))
}

/// POST /api/v1/companies/{id}/quizzes
///
/// Create a quiz with its initial questions. Owner/admin only. The payload
/// is validated in full before any row is written, and the whole tree is
/// persisted in one transaction.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(company_id): Path<DbId>,
    Json(input): Json<CreateQuiz>,
) -> AppResult<(StatusCode, Json<QuizDetail>)> {
    rbac::require_owner_or_admin(&state.pool, company_id, auth.user_id).await?;

    validate_new_quiz(&input.questions)?;

    let detail = QuizRepo::create(&state.pool, company_id, &input).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

/// GET /api/v1/companies/{id}/quizzes/{quiz_id}
pub async fn get_detail(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path((company_id, quiz_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<QuizDetail>> {
    rbac::require_company(&state.pool, company_id).await?;

    let detail = QuizRepo::detail(&state.pool, quiz_id)
        .await?
        .filter(|d| d.quiz.company_id == company_id)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Quiz",
            id: quiz_id,
        }))?;
    Ok(Json(detail))
}

/// POST /api/v1/companies/{id}/quizzes/{quiz_id}/questions
///
/// Append questions to a quiz. Owner/admin only. Responds with the updated
/// quiz row and the questions just created.
pub async fn add_questions(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((company_id, quiz_id)): Path<(DbId, DbId)>,
    Json(input): Json<AddQuestionsRequest>,
) -> AppResult<(StatusCode, Json<QuizDetail>)> {
    rbac::require_owner_or_admin(&state.pool, company_id, auth.user_id).await?;

    validate_added_questions(&input.questions)?;

    find_company_quiz(&state, company_id, quiz_id).await?;

    let (quiz, created) = QuizRepo::add_questions(&state.pool, quiz_id, &input.questions)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Quiz",
            id: quiz_id,
        }))?;

    Ok((
        StatusCode::CREATED,
        Json(QuizDetail {
            quiz,
            questions: created,
        }),
    ))
}

/// DELETE /api/v1/companies/{id}/quizzes/{quiz_id}/questions/{question_id}
///
/// Remove one question (its answers cascade). Owner/admin only. The last
/// question of a quiz cannot be removed; GPA computation needs a positive
/// question count.
pub async fn remove_question(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((company_id, quiz_id, question_id)): Path<(DbId, DbId, DbId)>,
) -> AppResult<Json<Quiz>> {
    rbac::require_owner_or_admin(&state.pool, company_id, auth.user_id).await?;

    let quiz = find_company_quiz(&state, company_id, quiz_id).await?;

    if quiz.number_of_questions <= 1 {
        return Err(AppError::Core(CoreError::Validation(
            "A quiz must keep at least one question".into(),
        )));
    }

    let quiz = QuizRepo::remove_question(&state.pool, quiz_id, question_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Question",
            id: question_id,
        }))?;
    Ok(Json(quiz))
}

/// DELETE /api/v1/companies/{id}/quizzes/{quiz_id}
///
/// Delete a quiz; questions, answers, and attempt history cascade.
/// Owner/admin only.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((company_id, quiz_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    rbac::require_owner_or_admin(&state.pool, company_id, auth.user_id).await?;

    find_company_quiz(&state, company_id, quiz_id).await?;

    let deleted = QuizRepo::delete(&state.pool, quiz_id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Quiz",
            id: quiz_id,
        }))
    }
}

/// Fetch a quiz and verify it belongs to the given company; 404 otherwise.
pub(crate) async fn find_company_quiz(
    state: &AppState,
    company_id: DbId,
    quiz_id: DbId,
) -> AppResult<Quiz> {
    QuizRepo::find_by_id(&state.pool, quiz_id)
        .await?
        .filter(|quiz| quiz.company_id == company_id)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Quiz",
            id: quiz_id,
        }))
}
