/// Task primary keys are PostgreSQL SERIAL/BIGSERIAL.
pub type DbId = i64;

/// Timestamps as stored and read back from the database.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// An instant expressed in the deployment's civil time zone.
pub type CivilTime = chrono::DateTime<chrono_tz::Tz>;
