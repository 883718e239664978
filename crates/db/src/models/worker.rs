//! Worker entity model: a user's membership in a company with a role.

use serde::Serialize;
use sqlx::FromRow;

use quizhub_core::types::{DbId, Timestamp};

/// A row from the `workers` table. Role values are the constants from
/// `quizhub_core::roles`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Worker {
    pub id: DbId,
    pub user_id: DbId,
    pub company_id: DbId,
    pub role: String,
    pub created_at: Timestamp,
}
