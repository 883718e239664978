//! HTTP-level integration tests for the quiz-taking workflow: grading,
//! the rolling GPA, and the reporting endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_json_auth};
use sqlx::PgPool;

use quizhub_core::roles::ROLE_STAFF;
use quizhub_db::repositories::WorkerRepo;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn create_company(app: axum::Router, token: &str) -> i64 {
    let body = serde_json::json!({ "title": "Acme" });
    let response = post_json_auth(app, "/api/v1/companies", token, body).await;
    body_json(response).await["id"].as_i64().unwrap()
}

/// Create a quiz with `n` questions of two options each (first option
/// correct). Returns `(quiz_id, [(question_id, correct_answer_id,
/// wrong_answer_id)])`.
async fn create_quiz(
    app: axum::Router,
    token: &str,
    company_id: i64,
    n: usize,
) -> (i64, Vec<(i64, i64, i64)>) {
    let questions: Vec<_> = (0..n)
        .map(|i| {
            serde_json::json!({
                "text": format!("question {i}"),
                "options": ["right", "wrong"],
                "correct_index": 0
            })
        })
        .collect();
    let payload = serde_json::json!({
        "title": "Quiz",
        "description": "",
        "passing_frequency": 30,
        "questions": questions,
    });

    let uri = format!("/api/v1/companies/{company_id}/quizzes");
    let response = post_json_auth(app, &uri, token, payload).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;

    let quiz_id = json["id"].as_i64().unwrap();
    let keys = json["questions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|q| {
            let answers = q["answers"].as_array().unwrap();
            let correct = answers.iter().find(|a| a["is_correct"] == true).unwrap();
            let wrong = answers.iter().find(|a| a["is_correct"] == false).unwrap();
            (
                q["id"].as_i64().unwrap(),
                correct["id"].as_i64().unwrap(),
                wrong["id"].as_i64().unwrap(),
            )
        })
        .collect();
    (quiz_id, keys)
}

fn pair(question_id: i64, answer_id: i64) -> serde_json::Value {
    serde_json::json!({ "question_id": question_id, "answer_id": answer_id })
}

// ---------------------------------------------------------------------------
// Grading
// ---------------------------------------------------------------------------

/// One right and one wrong answer on a two-question quiz scores 0.5.
#[sqlx::test(migrations = "../db/migrations")]
async fn grading_counts_matches_only(pool: PgPool) {
    let (_owner, token) = common::create_user_with_token(&pool, "owner@example.com").await;
    let app = common::build_test_app(pool);

    let company_id = create_company(app.clone(), &token).await;
    let (quiz_id, keys) = create_quiz(app.clone(), &token, company_id, 2).await;

    let submission = serde_json::json!([
        pair(keys[0].0, keys[0].1), // correct
        pair(keys[1].0, keys[1].2), // wrong option
    ]);

    let uri = format!("/api/v1/companies/{company_id}/quizzes/{quiz_id}/attempts");
    let response = post_json_auth(app, &uri, &token, submission).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["quiz_id"], quiz_id);
    assert_eq!(json["number_of_questions"], 2);
    assert_eq!(json["correct_answers"], 1);
    assert!((json["gpa"].as_f64().unwrap() - 0.5).abs() < 1e-9);
}

/// Submitting the same correct pair twice counts once.
#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_pairs_count_once(pool: PgPool) {
    let (_owner, token) = common::create_user_with_token(&pool, "owner@example.com").await;
    let app = common::build_test_app(pool);

    let company_id = create_company(app.clone(), &token).await;
    let (quiz_id, keys) = create_quiz(app.clone(), &token, company_id, 2).await;

    let submission = serde_json::json!([
        pair(keys[0].0, keys[0].1),
        pair(keys[0].0, keys[0].1), // duplicate of the same correct answer
    ]);

    let uri = format!("/api/v1/companies/{company_id}/quizzes/{quiz_id}/attempts");
    let response = post_json_auth(app, &uri, &token, submission).await;
    let json = body_json(response).await;
    assert_eq!(json["correct_answers"], 1, "a consumed key entry must not re-match");
}

/// Two attempts on 5- and 4-question quizzes aggregate to 5/9, not the
/// 0.55 average of the per-attempt GPAs.
#[sqlx::test(migrations = "../db/migrations")]
async fn rolling_gpa_is_cumulative_over_attempts(pool: PgPool) {
    let (_owner, token) = common::create_user_with_token(&pool, "owner@example.com").await;
    let app = common::build_test_app(pool);

    let company_id = create_company(app.clone(), &token).await;
    let (quiz_a, keys_a) = create_quiz(app.clone(), &token, company_id, 5).await;
    let (quiz_b, keys_b) = create_quiz(app.clone(), &token, company_id, 4).await;

    // 3 of 5 correct.
    let submission: Vec<_> = keys_a
        .iter()
        .enumerate()
        .map(|(i, k)| if i < 3 { pair(k.0, k.1) } else { pair(k.0, k.2) })
        .collect();
    let uri = format!("/api/v1/companies/{company_id}/quizzes/{quiz_a}/attempts");
    let response = post_json_auth(app.clone(), &uri, &token, serde_json::json!(submission)).await;
    let json = body_json(response).await;
    assert!((json["gpa"].as_f64().unwrap() - 0.6).abs() < 1e-9);

    // 2 of 4 correct.
    let submission: Vec<_> = keys_b
        .iter()
        .enumerate()
        .map(|(i, k)| if i < 2 { pair(k.0, k.1) } else { pair(k.0, k.2) })
        .collect();
    let uri = format!("/api/v1/companies/{company_id}/quizzes/{quiz_b}/attempts");
    let response = post_json_auth(app, &uri, &token, serde_json::json!(submission)).await;
    let json = body_json(response).await;

    let expected = 5.0 / 9.0;
    let actual = json["gpa"].as_f64().unwrap();
    assert!(
        (actual - expected).abs() < 1e-4,
        "expected cumulative {expected}, got {actual}"
    );
}

/// Only members of the company may take its quizzes.
#[sqlx::test(migrations = "../db/migrations")]
async fn submission_requires_membership(pool: PgPool) {
    let (_owner, owner_token) = common::create_user_with_token(&pool, "owner@example.com").await;
    let (_stranger, stranger_token) =
        common::create_user_with_token(&pool, "stranger@example.com").await;
    let app = common::build_test_app(pool);

    let company_id = create_company(app.clone(), &owner_token).await;
    let (quiz_id, keys) = create_quiz(app.clone(), &owner_token, company_id, 2).await;

    let submission = serde_json::json!([pair(keys[0].0, keys[0].1)]);
    let uri = format!("/api/v1/companies/{company_id}/quizzes/{quiz_id}/attempts");
    let response = post_json_auth(app, &uri, &stranger_token, submission).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Reporting
// ---------------------------------------------------------------------------

/// The company GPA report is owner/admin-gated and reflects submissions
/// within the window.
#[sqlx::test(migrations = "../db/migrations")]
async fn company_gpa_report(pool: PgPool) {
    let (_owner, owner_token) = common::create_user_with_token(&pool, "owner@example.com").await;
    let (staff, staff_token) = common::create_user_with_token(&pool, "staff@example.com").await;
    let app = common::build_test_app(pool.clone());

    let company_id = create_company(app.clone(), &owner_token).await;
    WorkerRepo::create(&pool, staff.id, company_id, ROLE_STAFF)
        .await
        .unwrap();
    let (quiz_id, keys) = create_quiz(app.clone(), &owner_token, company_id, 2).await;

    let submission = serde_json::json!([pair(keys[0].0, keys[0].1), pair(keys[1].0, keys[1].1)]);
    let uri = format!("/api/v1/companies/{company_id}/quizzes/{quiz_id}/attempts");
    post_json_auth(app.clone(), &uri, &staff_token, submission).await;

    let report_uri = format!("/api/v1/companies/{company_id}/performance/gpa?hours=24");

    // Staff may not read the manager report.
    let response = get_auth(app.clone(), &report_uri, &staff_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get_auth(app.clone(), &report_uri, &owner_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["user_id"], staff.id);
    assert!((rows[0]["gpa"].as_f64().unwrap() - 1.0).abs() < 1e-9);

    // Last-test report lists the idle owner with a null timestamp.
    let last_uri = format!("/api/v1/companies/{company_id}/performance/last-tests");
    let response = get_auth(app, &last_uri, &owner_token).await;
    let json = body_json(response).await;
    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    let owner_row = rows.iter().find(|r| r["user_id"] != staff.id).unwrap();
    assert!(owner_row["last_test_at"].is_null());
}

/// Self-service views return the caller's own GPA and attempt history.
#[sqlx::test(migrations = "../db/migrations")]
async fn self_service_views(pool: PgPool) {
    let (_owner, token) = common::create_user_with_token(&pool, "owner@example.com").await;
    let app = common::build_test_app(pool);

    let company_id = create_company(app.clone(), &token).await;
    let (quiz_id, keys) = create_quiz(app.clone(), &token, company_id, 2).await;

    let submission = serde_json::json!([pair(keys[0].0, keys[0].1), pair(keys[1].0, keys[1].2)]);
    let uri = format!("/api/v1/companies/{company_id}/quizzes/{quiz_id}/attempts");
    post_json_auth(app.clone(), &uri, &token, submission).await;

    let response = get_auth(app.clone(), "/api/v1/me/gpa?hours=24", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json[0]["company_id"], company_id);
    assert!((json[0]["gpa"].as_f64().unwrap() - 0.5).abs() < 1e-9);

    let response = get_auth(app, "/api/v1/me/attempts", &token).await;
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["quiz_id"], quiz_id);
    assert!(json[0]["date_of_passage"].is_string());
}
