pub mod auth;
pub mod completed_task;
