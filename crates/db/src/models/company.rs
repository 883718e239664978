//! Company entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use quizhub_core::types::{DbId, Timestamp};

/// A row from the `companies` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Company {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub hidden: bool,
    pub created_at: Timestamp,
}

/// DTO for creating a new company.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCompany {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// DTO for updating a company's title/description. At least one field must
/// be present; the handler rejects an empty update.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCompanyInfo {
    pub title: Option<String>,
    pub description: Option<String>,
}
