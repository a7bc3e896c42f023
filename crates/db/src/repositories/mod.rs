//! Repository layer.
//!
//! Each repository is a zero-sized struct with async associated functions
//! that take a `&PgPool` and return `Result<_, sqlx::Error>`.

pub mod completed_task_repo;

pub use completed_task_repo::CompletedTaskRepo;
