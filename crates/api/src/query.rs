//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Generic pagination parameters (`?limit=&offset=`).
///
/// Used by any handler that supports paginated listing. Values are clamped
/// in the repository layer.
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Time-window parameter for performance queries (`?hours=`).
///
/// The window is `[now - hours, now]` with an inclusive lower bound,
/// evaluated at query time.
#[derive(Debug, Deserialize)]
pub struct TimeWindowParams {
    pub hours: i64,
}
