//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - Read-side row shapes for reporting queries where plain entities
//!   do not fit

pub mod company;
pub mod quiz;
pub mod request;
pub mod result;
pub mod user;
pub mod worker;
