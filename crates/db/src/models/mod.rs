//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A create DTO for inserts
//! - Where the API exposes the entity, a `Serialize` response type

pub mod share;
pub mod todo;
pub mod token;
pub mod user;
