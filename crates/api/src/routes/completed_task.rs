//! Route definitions for the `/completedTasks` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::completed_task;
use crate::state::AppState;

/// Completed-task routes, merged into the `/api` tree.
///
/// ```text
/// GET  /completedTasks    -> list_completed_tasks
/// POST /completedTasks    -> create_completed_task
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/completedTasks",
        get(completed_task::list_completed_tasks).post(completed_task::create_completed_task),
    )
}
