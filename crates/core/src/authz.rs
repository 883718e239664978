//! Company-scoped authorization predicates.
//!
//! All functions are pure: they decide over an already-fetched role snapshot
//! (the actor's worker role in the target company, `None` when the actor is
//! not a member) and never touch storage. Callers check company existence
//! first, so a failing predicate always means "not authorized", never
//! "not found".

use crate::error::CoreError;
use crate::roles::{ROLE_ADMIN, ROLE_OWNER};
use crate::types::DbId;

/// Require any membership in the company.
pub fn ensure_member(role: Option<&str>) -> Result<(), CoreError> {
    match role {
        Some(_) => Ok(()),
        None => Err(CoreError::Forbidden(
            "You are not a member of this company".into(),
        )),
    }
}

/// Require the `owner` role.
pub fn ensure_owner(role: Option<&str>) -> Result<(), CoreError> {
    match role {
        Some(ROLE_OWNER) => Ok(()),
        _ => Err(CoreError::Forbidden(
            "You are not the owner of this company".into(),
        )),
    }
}

/// Require the `owner` or `admin` role.
pub fn ensure_owner_or_admin(role: Option<&str>) -> Result<(), CoreError> {
    match role {
        Some(ROLE_OWNER) | Some(ROLE_ADMIN) => Ok(()),
        _ => Err(CoreError::Forbidden(
            "You are not an owner or admin of this company".into(),
        )),
    }
}

/// Reject actions where the actor targets themselves (self-invite,
/// deleting yourself from the roster you own).
pub fn ensure_distinct_user(
    actor_id: DbId,
    target_id: DbId,
    action: &str,
) -> Result<(), CoreError> {
    if actor_id == target_id {
        return Err(CoreError::Validation(format!("You cannot {action} yourself")));
    }
    Ok(())
}
