//! Shared domain types for the manhwa catalog service.
//!
//! Kept free of database and HTTP dependencies so that every other crate
//! can depend on it.

pub mod catalog;
pub mod error;
pub mod types;
