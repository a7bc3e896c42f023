//! Domain logic for the completed-task log.
//!
//! This crate has no database or HTTP dependencies so that the derivation,
//! validation and query-building rules can be unit tested in isolation.

pub mod civil_time;
pub mod error;
pub mod task;
pub mod task_query;
pub mod types;
