//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - The entity struct matching the database row
//! - The external-facing response shape
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for sparse patches

pub mod manhwa;
