//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` request/create DTOs for the write operations

pub mod assignment;
pub mod defense_session;
pub mod evaluation;
pub mod event;
pub mod project;
