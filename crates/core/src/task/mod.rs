//! Completed-task records and field derivation.
//!
//! A [`TaskRecord`] is what a client submitted, already localized into the
//! civil zone but otherwise untouched: optional fields stay `None` until
//! [`TaskRecord::fill_derived`] computes them. [`CompletedTask`] is the fully
//! populated form handed to the store.

pub mod validation;

use chrono::TimeDelta;

use crate::civil_time::CivilTimeZone;
use crate::types::CivilTime;

pub use validation::{validate, TaskField, TaskValidationError};

/// Detail text stored when the client leaves `taskDetail` empty.
pub const DETAIL_PLACEHOLDER: &str = "-";

/// A task as submitted, before derivation.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskRecord {
    pub company_name: String,
    pub branch_name: String,
    pub machine_name: String,
    pub task_start_date: Option<CivilTime>,
    pub task_start_time: Option<CivilTime>,
    pub task_end_date: Option<CivilTime>,
    pub task_end_time: Option<CivilTime>,
    pub task_duration_in_minutes: i32,
    pub is_rental: bool,
    pub task_detail: String,
}

/// A task with every derivable field populated, ready to be persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedTask {
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

impl TaskRecord {
    /// Fill in end date, end time and detail when the client omitted them.
    ///
    /// Fields that are already present are never touched, so applying this
    /// twice is the same as applying it once. End fields stay `None` while
    /// the start fields they derive from are missing.
    ///
    /// An end that would fall outside chrono's representable range is also
    /// left `None`; [`validation::check_range`] reports that case.
    pub fn fill_derived(mut self) -> Self {
        let minutes = self.task_duration_in_minutes;

        if self.task_end_date.is_none() {
            if let (Some(date), Some(time)) = (&self.task_start_date, &self.task_start_time) {
                self.task_end_date = shift_by_minutes(&combine_date_and_time(date, time), minutes);
            }
        }

        if self.task_end_time.is_none() {
            if let Some(time) = &self.task_start_time {
                self.task_end_time = shift_by_minutes(time, minutes);
            }
        }

        if self.task_detail.is_empty() {
            self.task_detail = DETAIL_PLACEHOLDER.to_string();
        }

        self
    }

    /// Derive the remaining fields and convert into a [`CompletedTask`].
    ///
    /// Run [`validate`] first; this only re-checks that nothing required is
    /// still missing.
    pub fn into_completed(self) -> Result<CompletedTask, TaskValidationError> {
        validation::check_required(&self)?;
        validation::check_range(&self)?;
        let record = self.fill_derived();

        Ok(CompletedTask {
            task_start_date: required(record.task_start_date, TaskField::StartDate)?,
            task_start_time: required(record.task_start_time, TaskField::StartTime)?,
            task_end_date: required(record.task_end_date, TaskField::EndDate)?,
            task_end_time: required(record.task_end_time, TaskField::EndTime)?,
            company_name: record.company_name,
            branch_name: record.branch_name,
            machine_name: record.machine_name,
            task_duration_in_minutes: record.task_duration_in_minutes,
            is_rental: record.is_rental,
            task_detail: record.task_detail,
        })
    }
}

/// `start` moved by `minutes`, or `None` past the representable range.
pub(crate) fn shift_by_minutes(start: &CivilTime, minutes: i32) -> Option<CivilTime> {
    start.checked_add_signed(TimeDelta::minutes(i64::from(minutes)))
}

/// The calendar day of `date` at the time of day of `time`, in `date`'s zone.
pub(crate) fn combine_date_and_time(date: &CivilTime, time: &CivilTime) -> CivilTime {
    let zone = CivilTimeZone::from(date.timezone());
    let time_of_day = time.with_timezone(&date.timezone()).time();
    zone.from_local(date.date_naive().and_time(time_of_day))
}

fn required(value: Option<CivilTime>, field: TaskField) -> Result<CivilTime, TaskValidationError> {
    value.ok_or(TaskValidationError::MissingField(field))
}
