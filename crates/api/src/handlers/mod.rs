//! HTTP request handlers, one module per resource.

pub mod auth;
pub mod company;
pub mod membership;
pub mod performance;
pub mod quiz;
pub mod roster;
pub mod users;
