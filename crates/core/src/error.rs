//! Domain error taxonomy shared by every crate in the workspace.

use crate::types::DbId;

/// Domain-level error for quiz platform operations.
///
/// Variants map one-to-one onto HTTP status codes in `quizhub-api`, but the
/// core never depends on HTTP types. `NotFound` and `Forbidden` are distinct
/// on purpose: callers surface "the thing does not exist" and "you may not
/// act on it" differently.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A referenced entity does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Malformed or rule-violating input (too few questions, self-targeting
    /// actions, resolving an already-resolved request, ...).
    #[error("Validation error: {0}")]
    Validation(String),

    /// The operation would violate a uniqueness invariant (duplicate worker,
    /// duplicate pending invite, duplicate email).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The caller is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The caller is authenticated but lacks the required role.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// An invariant the domain relies on was broken.
    #[error("Internal error: {0}")]
    Internal(String),
}
