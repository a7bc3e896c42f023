//! Required-field and cross-field checks for submitted tasks.
//!
//! These run on the raw [`TaskRecord`] before derivation, so an end date or
//! end time the client explicitly supplied is what gets checked.

use std::fmt;

use crate::error::CoreError;
use crate::task::{combine_date_and_time, shift_by_minutes, TaskRecord};

/// Fields named in validation messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskField {
    CompanyName,
    BranchName,
    MachineName,
    StartDate,
    StartTime,
    EndDate,
    EndTime,
    Duration,
}

impl fmt::Display for TaskField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TaskField::CompanyName => "company name",
            TaskField::BranchName => "branch name",
            TaskField::MachineName => "machine name",
            TaskField::StartDate => "task start date",
            TaskField::StartTime => "task start time",
            TaskField::EndDate => "task end date",
            TaskField::EndTime => "task end time",
            TaskField::Duration => "task duration",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskValidationError {
    #[error("{0} not set")]
    MissingField(TaskField),

    #[error("task duration must be positive")]
    NonPositiveDuration,

    #[error("task start plus duration is out of range")]
    TimestampOutOfRange,

    #[error("task end date is before task start date")]
    EndDateBeforeStartDate,

    #[error("task end time does not match task start time + duration in minutes")]
    EndTimeMismatch,
}

impl From<TaskValidationError> for CoreError {
    fn from(err: TaskValidationError) -> Self {
        CoreError::Validation(err.to_string())
    }
}

/// Run every check in order, returning the first failure.
pub fn validate(record: &TaskRecord) -> Result<(), TaskValidationError> {
    check_required(record)?;
    check_range(record)?;
    check_consistency(record)
}

/// Required fields, checked in a fixed order so the first missing one is reported.
pub fn check_required(record: &TaskRecord) -> Result<(), TaskValidationError> {
    let names = [
        (&record.company_name, TaskField::CompanyName),
        (&record.branch_name, TaskField::BranchName),
        (&record.machine_name, TaskField::MachineName),
    ];
    for (value, field) in names {
        if value.is_empty() {
            return Err(TaskValidationError::MissingField(field));
        }
    }

    if record.task_start_date.is_none() {
        return Err(TaskValidationError::MissingField(TaskField::StartDate));
    }
    if record.task_start_time.is_none() {
        return Err(TaskValidationError::MissingField(TaskField::StartTime));
    }

    match record.task_duration_in_minutes {
        0 => Err(TaskValidationError::MissingField(TaskField::Duration)),
        d if d < 0 => Err(TaskValidationError::NonPositiveDuration),
        _ => Ok(()),
    }
}

/// Both derivable end instants must be representable.
pub fn check_range(record: &TaskRecord) -> Result<(), TaskValidationError> {
    let minutes = record.task_duration_in_minutes;
    if let Some(time) = &record.task_start_time {
        shift_by_minutes(time, minutes).ok_or(TaskValidationError::TimestampOutOfRange)?;
        if let Some(date) = &record.task_start_date {
            shift_by_minutes(&combine_date_and_time(date, time), minutes)
                .ok_or(TaskValidationError::TimestampOutOfRange)?;
        }
    }
    Ok(())
}

/// Checks that only apply to fields the client actually supplied.
///
/// An end time is either derivable or exactly `start + duration`; it is
/// never accepted as an independent value.
pub fn check_consistency(record: &TaskRecord) -> Result<(), TaskValidationError> {
    if let (Some(start), Some(end)) = (&record.task_start_date, &record.task_end_date) {
        if end < start {
            return Err(TaskValidationError::EndDateBeforeStartDate);
        }
    }

    if let (Some(start), Some(end)) = (&record.task_start_time, &record.task_end_time) {
        let expected = shift_by_minutes(start, record.task_duration_in_minutes)
            .ok_or(TaskValidationError::TimestampOutOfRange)?;
        if *end != expected {
            return Err(TaskValidationError::EndTimeMismatch);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::civil_time::CivilTimeZone;
    use crate::types::CivilTime;
    use assert_matches::assert_matches;
    use chrono::NaiveDate;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> CivilTime {
        CivilTimeZone::default().from_local(
            NaiveDate::from_ymd_opt(y, mo, d)
                .unwrap()
                .and_hms_opt(h, mi, 0)
                .unwrap(),
        )
    }

    fn valid_record() -> TaskRecord {
        TaskRecord {
            company_name: "Acme".to_string(),
            branch_name: "Kadikoy".to_string(),
            machine_name: "Forklift-7".to_string(),
            task_start_date: Some(at(2024, 1, 10, 0, 0)),
            task_start_time: Some(at(2024, 1, 10, 9, 0)),
            task_end_date: None,
            task_end_time: None,
            task_duration_in_minutes: 60,
            is_rental: true,
            task_detail: String::new(),
        }
    }

    #[test]
    fn accepts_minimal_record() {
        assert_eq!(validate(&valid_record()), Ok(()));
    }

    #[test]
    fn each_missing_field_is_named() {
        let cases: [(fn(&mut TaskRecord), &str); 6] = [
            (|r| r.company_name.clear(), "company name not set"),
            (|r| r.branch_name.clear(), "branch name not set"),
            (|r| r.machine_name.clear(), "machine name not set"),
            (|r| r.task_start_date = None, "task start date not set"),
            (|r| r.task_start_time = None, "task start time not set"),
            (|r| r.task_duration_in_minutes = 0, "task duration not set"),
        ];

        for (mutate, expected) in cases {
            let mut record = valid_record();
            mutate(&mut record);
            let err = validate(&record).expect_err("record should be rejected");
            assert_eq!(err.to_string(), expected);
        }
    }

    #[test]
    fn first_missing_field_wins() {
        let mut record = valid_record();
        record.machine_name.clear();
        record.task_start_time = None;

        assert_eq!(
            validate(&record),
            Err(TaskValidationError::MissingField(TaskField::MachineName))
        );
    }

    #[test]
    fn whitespace_name_is_not_missing() {
        let mut record = valid_record();
        record.branch_name = "   ".to_string();

        assert_eq!(validate(&record), Ok(()));
    }

    #[test]
    fn rejects_negative_duration() {
        let mut record = valid_record();
        record.task_duration_in_minutes = -30;

        assert_eq!(validate(&record), Err(TaskValidationError::NonPositiveDuration));
    }

    #[test]
    fn rejects_end_date_before_start_date() {
        let mut record = valid_record();
        record.task_start_date = Some(at(2024, 1, 10, 0, 0));
        record.task_end_date = Some(at(2024, 1, 9, 0, 0));

        assert_eq!(
            validate(&record),
            Err(TaskValidationError::EndDateBeforeStartDate)
        );
    }

    #[test]
    fn accepts_end_date_equal_to_start_date() {
        let mut record = valid_record();
        record.task_end_date = record.task_start_date;

        assert_eq!(validate(&record), Ok(()));
    }

    #[test]
    fn rejects_end_time_that_disagrees_with_duration() {
        let mut record = valid_record();
        record.task_start_time = Some(at(2024, 1, 10, 9, 0));
        record.task_duration_in_minutes = 60;
        record.task_end_time = Some(at(2024, 1, 10, 10, 30));

        assert_matches!(validate(&record), Err(TaskValidationError::EndTimeMismatch));
    }

    #[test]
    fn accepts_end_time_equal_to_start_plus_duration() {
        let mut record = valid_record();
        record.task_end_time = Some(at(2024, 1, 10, 10, 0));

        assert_eq!(validate(&record), Ok(()));
    }

    #[test]
    fn rejects_start_too_close_to_the_end_of_time() {
        let last_evening = CivilTimeZone::default()
            .from_local(NaiveDate::MAX.and_hms_opt(23, 0, 0).unwrap());
        let mut record = valid_record();
        record.task_start_date = Some(last_evening);
        record.task_start_time = Some(last_evening);
        record.task_duration_in_minutes = 600;

        assert_eq!(validate(&record), Err(TaskValidationError::TimestampOutOfRange));
    }

    #[test]
    fn converts_into_core_validation_error() {
        let core: CoreError = TaskValidationError::EndTimeMismatch.into();
        assert_matches!(core, CoreError::Validation(msg) if msg.contains("end time"));
    }
}
