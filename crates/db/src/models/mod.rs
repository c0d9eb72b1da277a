//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - An update DTO where the table supports partial updates

pub mod blankspot;
pub mod provider;
pub mod tower;
pub mod tower_event;
pub mod user;
