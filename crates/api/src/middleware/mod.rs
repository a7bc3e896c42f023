//! Request middleware.
//!
//! - [`auth`] -- the [`Authorized`](crate::auth::Authorized) extractor gating `/api` handlers.
//! - [`error_log`] -- logs failed `/api` requests together with their bodies.

pub mod auth;
pub mod error_log;
