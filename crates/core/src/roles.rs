//! Well-known company role names.
//!
//! These must match the CHECK constraint on `workers.role` in
//! `20260301000003_create_workers_table.sql`. Every worker row carries
//! exactly one of these, and each company has exactly one `owner`.

pub const ROLE_OWNER: &str = "owner";
pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_STAFF: &str = "staff";

/// True if `role` is one of the known role names.
pub fn is_valid_role(role: &str) -> bool {
    matches!(role, ROLE_OWNER | ROLE_ADMIN | ROLE_STAFF)
}

/// Roles a worker can be re-assigned to. The `owner` role is only ever
/// granted at company creation and never by a role change.
pub fn is_assignable_role(role: &str) -> bool {
    matches!(role, ROLE_ADMIN | ROLE_STAFF)
}
