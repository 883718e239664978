//! Repository for the `requests` table (invites and join applications).

use sqlx::PgPool;

use quizhub_core::requests::{STATUS_ACCEPTED, STATUS_PENDING};
use quizhub_core::roles::{ROLE_OWNER, ROLE_STAFF};
use quizhub_core::types::DbId;

use crate::models::request::{MembershipRequest, PendingApplication, PendingInvite};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, company_id, request_from, status, created_at";

/// Provides handshake operations for membership requests.
pub struct RequestRepo;

impl RequestRepo {
    /// Insert a new pending request. The `uq_requests_pending` index rejects
    /// a second active request for the same (user, company, direction).
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        company_id: DbId,
        request_from: &str,
    ) -> Result<MembershipRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO requests (user_id, company_id, request_from)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MembershipRequest>(&query)
            .bind(user_id)
            .bind(company_id)
            .bind(request_from)
            .fetch_one(pool)
            .await
    }

    /// Find a request by its internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<MembershipRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM requests WHERE id = $1");
        sqlx::query_as::<_, MembershipRequest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the active (pending) request for a (user, company, direction)
    /// triple, if any.
    pub async fn find_pending(
        pool: &PgPool,
        user_id: DbId,
        company_id: DbId,
        request_from: &str,
    ) -> Result<Option<MembershipRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM requests
             WHERE user_id = $1 AND company_id = $2
               AND request_from = $3 AND status = $4"
        );
        sqlx::query_as::<_, MembershipRequest>(&query)
            .bind(user_id)
            .bind(company_id)
            .bind(request_from)
            .bind(STATUS_PENDING)
            .fetch_optional(pool)
            .await
    }

    /// List a user's pending invites with the inviting company's title.
    pub async fn pending_invites_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<PendingInvite>, sqlx::Error> {
        let query = "SELECT r.id, r.status, c.id AS company_id, c.title AS company_title
             FROM requests r
             JOIN companies c ON c.id = r.company_id
             WHERE r.user_id = $1 AND r.request_from = 'company' AND r.status = $2
             ORDER BY r.id ASC";
        sqlx::query_as::<_, PendingInvite>(query)
            .bind(user_id)
            .bind(STATUS_PENDING)
            .fetch_all(pool)
            .await
    }

    /// List the pending join applications across every company the given
    /// user owns, with applicant email and company title joined in.
    pub async fn pending_applications_for_owner(
        pool: &PgPool,
        owner_id: DbId,
    ) -> Result<Vec<PendingApplication>, sqlx::Error> {
        let query = "SELECT r.id, r.status, u.id AS user_id, u.email AS user_email,
                    c.id AS company_id, c.title AS company_title
             FROM requests r
             JOIN companies c ON c.id = r.company_id
             JOIN users u ON u.id = r.user_id
             JOIN workers w ON w.company_id = c.id AND w.role = $2
             WHERE w.user_id = $1 AND r.request_from = 'user' AND r.status = $3
             ORDER BY r.id ASC";
        sqlx::query_as::<_, PendingApplication>(query)
            .bind(owner_id)
            .bind(ROLE_OWNER)
            .bind(STATUS_PENDING)
            .fetch_all(pool)
            .await
    }

    /// Resolve a pending request to `accepted` or `rejected`. Acceptance
    /// enrolls the user as a staff worker in the same transaction.
    ///
    /// The status flip is conditional on the row still being pending, so
    /// concurrent resolutions cannot double-apply: the loser sees `None`.
    pub async fn resolve(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<MembershipRequest>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let update_query = format!(
            "UPDATE requests SET status = $2
             WHERE id = $1 AND status = $3
             RETURNING {COLUMNS}"
        );
        let request = sqlx::query_as::<_, MembershipRequest>(&update_query)
            .bind(id)
            .bind(status)
            .bind(STATUS_PENDING)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(request) = request else {
            tx.rollback().await?;
            return Ok(None);
        };

        if status == STATUS_ACCEPTED {
            sqlx::query("INSERT INTO workers (user_id, company_id, role) VALUES ($1, $2, $3)")
                .bind(request.user_id)
                .bind(request.company_id)
                .bind(ROLE_STAFF)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(Some(request))
    }
}
