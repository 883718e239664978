//! Handlers for quiz attempts and the performance ledger read side.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{Duration, Utc};
use serde::Serialize;

use quizhub_core::error::CoreError;
use quizhub_core::scoring::{attempt_gpa, count_correct_answers, SubmittedAnswer};
use quizhub_core::types::{DbId, Timestamp};
use quizhub_db::models::result::{
    AttemptTime, CompanyGpa, NewAttempt, UserGpa, UserQuizGpa, WorkerLastTest,
};
use quizhub_db::repositories::{QuizRepo, ResultRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::quiz::find_company_quiz;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac;
use crate::query::TimeWindowParams;
use crate::state::AppState;

/// Response body for a graded quiz attempt. `gpa` is the user's rolling
/// aggregate for the company after this attempt, not the per-attempt score.
#[derive(Debug, Serialize)]
pub struct AttemptResponse {
    pub quiz_id: DbId,
    pub number_of_questions: i32,
    pub correct_answers: i32,
    pub gpa: f64,
}

/// POST /api/v1/companies/{id}/quizzes/{quiz_id}/attempts
///
/// Grade a submission and record it in the ledger. Any member of the
/// company may take its quizzes.
pub async fn submit(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((company_id, quiz_id)): Path<(DbId, DbId)>,
    Json(answers): Json<Vec<SubmittedAnswer>>,
) -> AppResult<(StatusCode, Json<AttemptResponse>)> {
    rbac::require_member(&state.pool, company_id, auth.user_id).await?;

    let quiz = find_company_quiz(&state, company_id, quiz_id).await?;

    let key = QuizRepo::answer_key(&state.pool, quiz_id).await?;
    let correct = count_correct_answers(&answers, &key);
    let gpa = attempt_gpa(correct, quiz.number_of_questions)?;

    let outcome = ResultRepo::record_attempt(
        &state.pool,
        &NewAttempt {
            user_id: auth.user_id,
            company_id,
            quiz_id,
            correct_answers: correct as i32,
            gpa,
        },
    )
    .await?;

    if let Some(answer_log) = &state.answer_log {
        answer_log
            .record(auth.user_id, &answers)
            .await
            .map_err(|e| AppError::InternalError(format!("Answer log write failed: {e}")))?;
    }

    Ok((
        StatusCode::CREATED,
        Json(AttemptResponse {
            quiz_id,
            number_of_questions: quiz.number_of_questions,
            correct_answers: outcome.quiz_result.correct_answers,
            gpa: outcome.general_gpa,
        }),
    ))
}

/// GET /api/v1/companies/{id}/performance/gpa?hours=
///
/// Rolling GPA per user across the company within the window. Owner/admin
/// only.
pub async fn company_gpas(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(company_id): Path<DbId>,
    Query(params): Query<TimeWindowParams>,
) -> AppResult<Json<Vec<UserGpa>>> {
    rbac::require_owner_or_admin(&state.pool, company_id, auth.user_id).await?;

    let since = window_start(params.hours)?;
    let gpas = ResultRepo::company_user_gpas(&state.pool, company_id, since).await?;
    Ok(Json(gpas))
}

/// GET /api/v1/companies/{id}/performance/workers/{user_id}/quiz-gpa?hours=
///
/// One worker's per-quiz attempt GPAs within the window. Owner/admin only.
pub async fn worker_quiz_gpas(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((company_id, user_id)): Path<(DbId, DbId)>,
    Query(params): Query<TimeWindowParams>,
) -> AppResult<Json<Vec<UserQuizGpa>>> {
    rbac::require_owner_or_admin(&state.pool, company_id, auth.user_id).await?;

    let since = window_start(params.hours)?;
    let gpas = ResultRepo::user_quiz_gpas(&state.pool, company_id, user_id, since).await?;
    Ok(Json(gpas))
}

/// GET /api/v1/companies/{id}/performance/last-tests
///
/// Every worker with the time of their last submission (null if none).
/// Owner/admin only.
pub async fn last_tests(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(company_id): Path<DbId>,
) -> AppResult<Json<Vec<WorkerLastTest>>> {
    rbac::require_owner_or_admin(&state.pool, company_id, auth.user_id).await?;

    let rows = ResultRepo::worker_last_tests(&state.pool, company_id).await?;
    Ok(Json(rows))
}

/// GET /api/v1/me/gpa?hours=
///
/// The caller's own rolling GPA per company within the window.
pub async fn my_gpas(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<TimeWindowParams>,
) -> AppResult<Json<Vec<CompanyGpa>>> {
    let since = window_start(params.hours)?;
    let gpas = ResultRepo::my_gpas(&state.pool, auth.user_id, since).await?;
    Ok(Json(gpas))
}

/// GET /api/v1/me/attempts
///
/// The caller's full attempt history with timestamps.
pub async fn my_attempts(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<Vec<AttemptTime>>> {
    let attempts = ResultRepo::my_attempts(&state.pool, auth.user_id).await?;
    Ok(Json(attempts))
}

/// Compute the inclusive lower bound of a `last N hours` window, evaluated
/// at query time.
fn window_start(hours: i64) -> AppResult<Timestamp> {
    if hours < 0 {
        return Err(AppError::Core(CoreError::Validation(
            "hours must not be negative".into(),
        )));
    }
    let window = Duration::try_hours(hours).ok_or_else(|| {
        AppError::Core(CoreError::Validation("hours is out of range".into()))
    })?;
    Ok(Utc::now() - window)
}
