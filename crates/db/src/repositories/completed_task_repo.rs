//! Repository for the `completed_task_logs` table.
//!
//! The log is append-only: there is no update or delete here.

use chrono::Utc;
use sqlx::PgPool;
use tasklog_core::task::CompletedTask;
use tasklog_core::task_query::{build_filtered_query, FilterValue, TaskFilter};
use tasklog_core::types::DbId;

use crate::models::completed_task::CompletedTaskRow;

/// Append and query operations for completed tasks.
pub struct CompletedTaskRepo;

impl CompletedTaskRepo {
    /// Insert a derived task, returning its new `task_id`.
    ///
    /// The row is only written when the company, the branch (within that
    /// company) and the machine all exist at write time. Returns `Ok(None)`
    /// when any of them is missing.
    pub async fn insert(pool: &PgPool, task: &CompletedTask) -> Result<Option<DbId>, sqlx::Error> {
        let id = sqlx::query_scalar::<_, DbId>(
            "INSERT INTO completed_task_logs (
                 company_name, branch_name, machine_name,
                 task_start_date, task_start_time, task_end_date, task_end_time,
                 task_duration_in_minutes, is_rental, task_detail
             )
             SELECT c.company_name, b.branch_name, m.machine_name,
                    $4, $5, $6, $7, $8, $9, $10
             FROM company c
             JOIN branch b ON b.company_id = c.company_id AND b.branch_name = $2
             JOIN machine m ON m.machine_name = $3
             WHERE c.company_name = $1
             RETURNING task_id",
        )
        .bind(&task.company_name)
        .bind(&task.branch_name)
        .bind(&task.machine_name)
        .bind(task.task_start_date.with_timezone(&Utc))
        .bind(task.task_start_time.with_timezone(&Utc))
        .bind(task.task_end_date.with_timezone(&Utc))
        .bind(task.task_end_time.with_timezone(&Utc))
        .bind(task.task_duration_in_minutes)
        .bind(task.is_rental)
        .bind(&task.task_detail)
        .fetch_optional(pool)
        .await?;

        match id {
            Some(task_id) => tracing::debug!(task_id, "Completed task recorded"),
            None => tracing::debug!(
                company = %task.company_name,
                branch = %task.branch_name,
                machine = %task.machine_name,
                "Completed task references unknown reference data",
            ),
        }

        Ok(id)
    }

    /// List tasks matching `filter`, ordered by start date.
    ///
    /// Returns an empty vec when nothing matches.
    pub async fn list(
        pool: &PgPool,
        filter: &TaskFilter,
    ) -> Result<Vec<CompletedTaskRow>, sqlx::Error> {
        let query = build_filtered_query(filter);
        let q = bind_filter_values(
            sqlx::query_as::<_, CompletedTaskRow>(&query.sql),
            &query.params,
        );
        q.fetch_all(pool).await
    }
}

/// Bind a slice of `FilterValue` to a sqlx `QueryAs`, in order.
fn bind_filter_values<'q, O>(
    mut q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments>,
    params: &'q [FilterValue],
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments> {
    for value in params {
        match value {
            FilterValue::Text(v) => q = q.bind(v.as_str()),
            FilterValue::Timestamp(v) => q = q.bind(v.with_timezone(&Utc)),
        }
    }
    q
}
