//! Public liveness check for the task log service.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ServiceHealth {
    /// `ok`, or `degraded` while the task store is unreachable.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// IANA name of the zone task timestamps are read and written in.
    pub time_zone: &'static str,
}

impl ServiceHealth {
    fn report(db_healthy: bool, state: &AppState) -> Self {
        Self {
            status: if db_healthy { "ok" } else { "degraded" },
            version: env!("CARGO_PKG_VERSION"),
            db_healthy,
            time_zone: state.zone.name(),
        }
    }
}

/// GET /health
async fn service_health(State(state): State<AppState>) -> Json<ServiceHealth> {
    let db_healthy = match tasklog_db::health_check(&state.pool).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Task store unreachable");
            false
        }
    };

    Json(ServiceHealth::report(db_healthy, &state))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(service_health))
}
