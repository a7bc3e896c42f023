pub mod auth;
pub mod completed_task;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree. Every route here requires a bearer token.
///
/// ```text
/// /completedTasks          create (POST), list (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(completed_task::router())
}
