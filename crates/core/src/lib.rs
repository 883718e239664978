//! Pure domain logic for the quiz platform: error taxonomy, roles,
//! authorization predicates, quiz-input validation, and the scoring engine.
//!
//! This crate performs no I/O. Persistence lives in `quizhub-db` and the
//! HTTP surface in `quizhub-api`; both depend on the types defined here.

pub mod authz;
pub mod catalog;
pub mod error;
pub mod requests;
pub mod roles;
pub mod scoring;
pub mod types;
