//! Membership request entity model and read-side shapes.

use serde::Serialize;
use sqlx::FromRow;

use quizhub_core::types::{DbId, Timestamp};

/// A row from the `requests` table: a pending handshake between a user and
/// a company. Direction and status values are the constants from
/// `quizhub_core::requests`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MembershipRequest {
    pub id: DbId,
    pub user_id: DbId,
    pub company_id: DbId,
    pub request_from: String,
    pub status: String,
    pub created_at: Timestamp,
}

/// A pending invite as shown to the invited user, with the inviting
/// company's title joined in.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PendingInvite {
    pub id: DbId,
    pub status: String,
    pub company_id: DbId,
    pub company_title: String,
}

/// A pending application as shown to the owner of the target company, with
/// the applicant's email and the company title joined in.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PendingApplication {
    pub id: DbId,
    pub status: String,
    pub user_id: DbId,
    pub user_email: String,
    pub company_id: DbId,
    pub company_title: String,
}
