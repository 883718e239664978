//! Integration tests for the identity & role store: company creation,
//! the single-owner invariant, and the invite/application handshake.

use sqlx::PgPool;

use quizhub_core::requests::{FROM_COMPANY, STATUS_ACCEPTED, STATUS_PENDING, STATUS_REJECTED};
use quizhub_core::roles::{ROLE_OWNER, ROLE_STAFF};
use quizhub_db::models::company::CreateCompany;
use quizhub_db::models::user::{CreateUser, User};
use quizhub_db::repositories::{CompanyRepo, RequestRepo, UserRepo, WorkerRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn create_user(pool: &PgPool, email: &str) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            first_name: None,
            last_name: None,
            email: email.to_string(),
            password_hash: None,
        },
    )
    .await
    .expect("user creation should succeed")
}

fn new_company(title: &str) -> CreateCompany {
    CreateCompany {
        title: title.to_string(),
        description: String::new(),
    }
}

/// Count the owner rows of a company.
async fn owner_count(pool: &PgPool, company_id: i64) -> i64 {
    let (count,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM workers WHERE company_id = $1 AND role = 'owner'",
    )
    .bind(company_id)
    .fetch_one(pool)
    .await
    .unwrap();
    count
}

// ---------------------------------------------------------------------------
// Company creation and the single-owner invariant
// ---------------------------------------------------------------------------

/// Creating a company enrolls its creator as the owner in one step.
#[sqlx::test(migrations = "./migrations")]
async fn create_company_enrolls_owner(pool: PgPool) {
    let user = create_user(&pool, "owner@example.com").await;
    let company = CompanyRepo::create(&pool, &new_company("Acme"), user.id)
        .await
        .unwrap();

    let worker = WorkerRepo::find(&pool, company.id, user.id)
        .await
        .unwrap()
        .expect("creator must be enrolled");
    assert_eq!(worker.role, ROLE_OWNER);
    assert_eq!(owner_count(&pool, company.id).await, 1);
}

/// The schema itself rejects a second owner row for the same company.
#[sqlx::test(migrations = "./migrations")]
async fn schema_rejects_second_owner(pool: PgPool) {
    let owner = create_user(&pool, "owner@example.com").await;
    let other = create_user(&pool, "other@example.com").await;
    let company = CompanyRepo::create(&pool, &new_company("Acme"), owner.id)
        .await
        .unwrap();

    let result = WorkerRepo::create(&pool, other.id, company.id, ROLE_OWNER).await;
    assert!(result.is_err(), "second owner must violate uq_workers_company_owner");
    assert_eq!(owner_count(&pool, company.id).await, 1);
}

/// A user cannot be enrolled twice in the same company.
#[sqlx::test(migrations = "./migrations")]
async fn schema_rejects_duplicate_membership(pool: PgPool) {
    let owner = create_user(&pool, "owner@example.com").await;
    let staff = create_user(&pool, "staff@example.com").await;
    let company = CompanyRepo::create(&pool, &new_company("Acme"), owner.id)
        .await
        .unwrap();

    WorkerRepo::create(&pool, staff.id, company.id, ROLE_STAFF)
        .await
        .unwrap();
    let result = WorkerRepo::create(&pool, staff.id, company.id, ROLE_STAFF).await;
    assert!(result.is_err(), "duplicate membership must violate uq_workers_user_company");
}

/// Deleting a company cascades its workers away.
#[sqlx::test(migrations = "./migrations")]
async fn delete_company_cascades_workers(pool: PgPool) {
    let owner = create_user(&pool, "owner@example.com").await;
    let company = CompanyRepo::create(&pool, &new_company("Acme"), owner.id)
        .await
        .unwrap();

    assert!(CompanyRepo::delete(&pool, company.id).await.unwrap());

    let worker = WorkerRepo::find(&pool, company.id, owner.id).await.unwrap();
    assert!(worker.is_none(), "workers must cascade with the company");
}

// ---------------------------------------------------------------------------
// Request handshake
// ---------------------------------------------------------------------------

/// Accepting a pending invite flips its status and enrolls the user as
/// staff, atomically.
#[sqlx::test(migrations = "./migrations")]
async fn accept_invite_enrolls_staff(pool: PgPool) {
    let owner = create_user(&pool, "owner@example.com").await;
    let invitee = create_user(&pool, "invitee@example.com").await;
    let company = CompanyRepo::create(&pool, &new_company("Acme"), owner.id)
        .await
        .unwrap();

    let invite = RequestRepo::create(&pool, invitee.id, company.id, FROM_COMPANY)
        .await
        .unwrap();
    assert_eq!(invite.status, STATUS_PENDING);

    let resolved = RequestRepo::resolve(&pool, invite.id, STATUS_ACCEPTED)
        .await
        .unwrap()
        .expect("pending invite must resolve");
    assert_eq!(resolved.status, STATUS_ACCEPTED);

    let worker = WorkerRepo::find(&pool, company.id, invitee.id)
        .await
        .unwrap()
        .expect("accepted invitee must be enrolled");
    assert_eq!(worker.role, ROLE_STAFF);
    assert_eq!(owner_count(&pool, company.id).await, 1);
}

/// A second active invite for the same (user, company, direction) violates
/// the partial unique index, and the original row stays pending.
#[sqlx::test(migrations = "./migrations")]
async fn duplicate_pending_invite_is_rejected(pool: PgPool) {
    let owner = create_user(&pool, "owner@example.com").await;
    let invitee = create_user(&pool, "invitee@example.com").await;
    let company = CompanyRepo::create(&pool, &new_company("Acme"), owner.id)
        .await
        .unwrap();

    let original = RequestRepo::create(&pool, invitee.id, company.id, FROM_COMPANY)
        .await
        .unwrap();

    let duplicate = RequestRepo::create(&pool, invitee.id, company.id, FROM_COMPANY).await;
    assert!(duplicate.is_err(), "duplicate must violate uq_requests_pending");

    let untouched = RequestRepo::find_by_id(&pool, original.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(untouched.status, STATUS_PENDING);
}

/// Resolution is conditional on the row still being pending: the second
/// resolution of the same request loses.
#[sqlx::test(migrations = "./migrations")]
async fn resolution_is_terminal(pool: PgPool) {
    let owner = create_user(&pool, "owner@example.com").await;
    let invitee = create_user(&pool, "invitee@example.com").await;
    let company = CompanyRepo::create(&pool, &new_company("Acme"), owner.id)
        .await
        .unwrap();

    let invite = RequestRepo::create(&pool, invitee.id, company.id, FROM_COMPANY)
        .await
        .unwrap();

    let first = RequestRepo::resolve(&pool, invite.id, STATUS_REJECTED)
        .await
        .unwrap();
    assert!(first.is_some());

    let second = RequestRepo::resolve(&pool, invite.id, STATUS_ACCEPTED)
        .await
        .unwrap();
    assert!(second.is_none(), "a resolved request must not re-resolve");

    // The losing acceptance must not have enrolled anyone.
    let worker = WorkerRepo::find(&pool, company.id, invitee.id).await.unwrap();
    assert!(worker.is_none());
}
