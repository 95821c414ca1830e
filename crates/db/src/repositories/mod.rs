//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod manhwa_repo;

pub use manhwa_repo::ManhwaRepo;
