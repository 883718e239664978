//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Multi-row mutations run inside
//! a single transaction with strict parent-before-child ordering.

pub mod company_repo;
pub mod quiz_repo;
pub mod request_repo;
pub mod result_repo;
pub mod user_repo;
pub mod worker_repo;

pub use company_repo::CompanyRepo;
pub use quiz_repo::QuizRepo;
pub use request_repo::RequestRepo;
pub use result_repo::ResultRepo;
pub use user_repo::UserRepo;
pub use worker_repo::WorkerRepo;

/// Default page size for list queries.
const DEFAULT_LIMIT: i64 = 100;
/// Hard ceiling for client-supplied page sizes.
const MAX_LIMIT: i64 = 500;

/// Clamp a client-supplied limit into `[1, MAX_LIMIT]`, defaulting when
/// absent.
pub(crate) fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
}

/// Clamp a client-supplied offset to be non-negative.
pub(crate) fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}
