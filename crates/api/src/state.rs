use std::sync::Arc;

use tasklog_core::civil_time::CivilTimeZone;

use crate::auth::AuthGate;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is `Copy`) and
/// never mutated after startup.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: tasklog_db::DbPool,
    /// Token issuer and verifier.
    pub auth: Arc<AuthGate>,
    /// Civil time zone every timestamp is read and written in.
    pub zone: CivilTimeZone,
}
