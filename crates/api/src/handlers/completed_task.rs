//! Handlers for the `/completedTasks` resource.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use tasklog_core::civil_time::{CivilTimeZone, ClientTimestamp};
use tasklog_core::error::CoreError;
use tasklog_core::task::{validate, CompletedTask, TaskRecord};
use tasklog_core::task_query::TaskFilter;
use tasklog_core::types::DbId;
use tasklog_db::models::completed_task::LocalizedTask;
use tasklog_db::repositories::CompletedTaskRepo;

use crate::auth::Authorized;
use crate::error::AppResult;
use crate::extract::JsonBody;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/completedTasks`.
///
/// `null` and absent are the same for every field. A client-supplied `id`
/// is ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedTaskInput {
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub branch_name: Option<String>,
    #[serde(default)]
    pub machine_name: Option<String>,
    #[serde(default, deserialize_with = "ClientTimestamp::deserialize_optional")]
    pub task_start_date: Option<ClientTimestamp>,
    #[serde(default, deserialize_with = "ClientTimestamp::deserialize_optional")]
    pub task_start_time: Option<ClientTimestamp>,
    #[serde(default, deserialize_with = "ClientTimestamp::deserialize_optional")]
    pub task_end_date: Option<ClientTimestamp>,
    #[serde(default, deserialize_with = "ClientTimestamp::deserialize_optional")]
    pub task_end_time: Option<ClientTimestamp>,
    #[serde(default)]
    pub task_duration_in_minutes: Option<i32>,
    #[serde(default)]
    pub is_rental: Option<bool>,
    #[serde(default)]
    pub task_detail: Option<String>,
}

impl CompletedTaskInput {
    /// Localize every timestamp into `zone` and fill in zero values.
    pub fn into_record(self, zone: CivilTimeZone) -> TaskRecord {
        let resolve = |ts: Option<ClientTimestamp>| ts.map(|ts| zone.resolve(ts));
        TaskRecord {
            company_name: self.company_name.unwrap_or_default(),
            branch_name: self.branch_name.unwrap_or_default(),
            machine_name: self.machine_name.unwrap_or_default(),
            task_start_date: resolve(self.task_start_date),
            task_start_time: resolve(self.task_start_time),
            task_end_date: resolve(self.task_end_date),
            task_end_time: resolve(self.task_end_time),
            task_duration_in_minutes: self.task_duration_in_minutes.unwrap_or_default(),
            is_rental: self.is_rental.unwrap_or_default(),
            task_detail: self.task_detail.unwrap_or_default(),
        }
    }
}

/// Query parameters for `GET /api/completedTasks`. Empty values are absent.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedTaskQuery {
    pub company_name: Option<String>,
    pub branch_name: Option<String>,
    /// `YYYY-MM-DD`, inclusive lower bound on the task start date.
    pub start_date: Option<String>,
    /// `YYYY-MM-DD`, inclusive upper bound on the task start date.
    pub end_date: Option<String>,
}

impl CompletedTaskQuery {
    pub fn into_filter(self, zone: CivilTimeZone) -> Result<TaskFilter, CoreError> {
        let date = |value: Option<String>| match value {
            Some(v) => zone.parse_date(&v),
            None => Ok(None),
        };

        Ok(TaskFilter {
            company_name: self.company_name.filter(|s| !s.is_empty()),
            branch_name: self.branch_name.filter(|s| !s.is_empty()),
            start_date: date(self.start_date)?,
            end_date: date(self.end_date)?,
        })
    }
}

/// A stored task as returned to clients.
///
/// Timestamps serialize as RFC 3339 with the civil zone's offset.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedTaskResponse {
    #[serde(rename = "id")]
    pub task_id: DbId,
    pub company_name: String,
    pub branch_name: String,
    pub machine_name: String,
    pub task_start_date: DateTime<FixedOffset>,
    pub task_start_time: DateTime<FixedOffset>,
    pub task_end_date: DateTime<FixedOffset>,
    pub task_end_time: DateTime<FixedOffset>,
    pub task_duration_in_minutes: i32,
    pub is_rental: bool,
    pub task_detail: String,
}

impl From<LocalizedTask> for CompletedTaskResponse {
    fn from(task: LocalizedTask) -> Self {
        Self {
            task_id: task.task_id,
            company_name: task.company_name,
            branch_name: task.branch_name,
            machine_name: task.machine_name,
            task_start_date: task.task_start_date.fixed_offset(),
            task_start_time: task.task_start_time.fixed_offset(),
            task_end_date: task.task_end_date.fixed_offset(),
            task_end_time: task.task_end_time.fixed_offset(),
            task_duration_in_minutes: task.task_duration_in_minutes,
            is_rental: task.is_rental,
            task_detail: task.task_detail,
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/completedTasks
///
/// Validate, derive the missing end fields, and append the task. Answers
/// 200 with an empty body.
pub async fn create_completed_task(
    _auth: Authorized,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CompletedTaskInput>,
) -> AppResult<StatusCode> {
    let record = input.into_record(state.zone);
    validate(&record).map_err(CoreError::from)?;
    let task = record.into_completed().map_err(CoreError::from)?;

    let task_id = CompletedTaskRepo::insert(&state.pool, &task)
        .await?
        .ok_or_else(|| CoreError::MissingReference(missing_reference_message(&task)))?;

    tracing::info!(
        task_id,
        company = %task.company_name,
        branch = %task.branch_name,
        machine = %task.machine_name,
        "Completed task created",
    );
    Ok(StatusCode::OK)
}

/// GET /api/completedTasks
///
/// List tasks matching the query filters. Always a JSON array.
pub async fn list_completed_tasks(
    _auth: Authorized,
    State(state): State<AppState>,
    Query(params): Query<CompletedTaskQuery>,
) -> AppResult<Json<Vec<CompletedTaskResponse>>> {
    let filter = params.into_filter(state.zone)?;
    let rows = CompletedTaskRepo::list(&state.pool, &filter).await?;

    tracing::debug!(count = rows.len(), ?filter, "Listed completed tasks");

    Ok(Json(
        rows.into_iter()
            .map(|row| CompletedTaskResponse::from(row.localize(state.zone)))
            .collect(),
    ))
}

fn missing_reference_message(task: &CompletedTask) -> String {
    format!(
        "company '{}', branch '{}' or machine '{}' does not exist",
        task.company_name, task.branch_name, task.machine_name
    )
}
