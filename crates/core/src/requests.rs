//! Membership request (invite / application) state constants and rules.
//!
//! A request is a pending handshake between a user and a company. The
//! direction records who initiated it; the status moves from `pending` to
//! exactly one of `accepted` or `rejected` and is terminal after that.

use crate::error::CoreError;

/// The company invited the user.
pub const FROM_COMPANY: &str = "company";
/// The user applied to join the company.
pub const FROM_USER: &str = "user";

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_ACCEPTED: &str = "accepted";
pub const STATUS_REJECTED: &str = "rejected";

/// Guard a status transition: only `pending` requests may be resolved.
pub fn ensure_pending(status: &str) -> Result<(), CoreError> {
    if status != STATUS_PENDING {
        return Err(CoreError::Validation(format!(
            "Request was already {status} and cannot be resolved again"
        )));
    }
    Ok(())
}
