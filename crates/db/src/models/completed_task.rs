//! Completed-task log row.

use sqlx::FromRow;
use tasklog_core::civil_time::CivilTimeZone;
use tasklog_core::types::{CivilTime, DbId, Timestamp};

/// A row from the `completed_task_logs` table.
///
/// Timestamps come back from Postgres in UTC; use [`CompletedTaskRow::localize`]
/// before handing them to a client.
#[derive(Debug, Clone, FromRow)]
pub struct CompletedTaskRow {
    pub task_id: DbId,
    pub company_name: String,
    pub branch_name: String,
    pub machine_name: String,
    pub task_start_date: Timestamp,
    pub task_start_time: Timestamp,
    pub task_end_date: Timestamp,
    pub task_end_time: Timestamp,
    pub task_duration_in_minutes: i32,
    pub is_rental: bool,
    pub task_detail: String,
}

/// A stored task with its timestamps expressed in the civil zone.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalizedTask {
    pub task_id: DbId,
    pub company_name: String,
    pub branch_name: String,
    pub machine_name: String,
    pub task_start_date: CivilTime,
    pub task_start_time: CivilTime,
    pub task_end_date: CivilTime,
    pub task_end_time: CivilTime,
    pub task_duration_in_minutes: i32,
    pub is_rental: bool,
    pub task_detail: String,
}

impl CompletedTaskRow {
    pub fn localize(self, zone: CivilTimeZone) -> LocalizedTask {
        LocalizedTask {
            task_id: self.task_id,
            company_name: self.company_name,
            branch_name: self.branch_name,
            machine_name: self.machine_name,
            task_start_date: zone.localize(&self.task_start_date),
            task_start_time: zone.localize(&self.task_start_time),
            task_end_date: zone.localize(&self.task_end_date),
            task_end_time: zone.localize(&self.task_end_time),
            task_duration_in_minutes: self.task_duration_in_minutes,
            is_rental: self.is_rental,
            task_detail: self.task_detail,
        }
    }
}
