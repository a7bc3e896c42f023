//! The deployment's fixed civil time zone.
//!
//! Every naive date/time submitted by a client is interpreted in this zone,
//! and every stored instant is localized back into it before it leaves the
//! service. The zone is resolved once at startup (see [`CivilTimeZone::load`])
//! and shared read-only afterwards; it is `Copy`, so handlers take it by value.

use std::str::FromStr;

use chrono::{
    DateTime, Datelike, FixedOffset, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset,
    TimeDelta, TimeZone,
};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer};

use crate::error::CoreError;
use crate::types::CivilTime;

/// Zone used when `APP_TIME_ZONE` is not set.
pub const DEFAULT_TIME_ZONE: &str = "Europe/Istanbul";

/// Layout accepted for date-only query parameters.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Naive date-time layouts accepted in request bodies, tried in order.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

// ---------------------------------------------------------------------------
// CivilTimeZone
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CivilTimeZone {
    tz: Tz,
}

impl CivilTimeZone {
    /// Resolve an IANA zone name such as `Europe/Istanbul`.
    pub fn load(name: &str) -> Result<Self, CoreError> {
        Tz::from_str(name)
            .map(|tz| Self { tz })
            .map_err(|e| CoreError::Internal(format!("Unknown time zone '{name}': {e}")))
    }

    pub fn tz(&self) -> Tz {
        self.tz
    }

    pub fn name(&self) -> &'static str {
        self.tz.name()
    }

    /// Re-express an absolute instant in the civil zone.
    pub fn localize<Z: TimeZone>(&self, instant: &DateTime<Z>) -> CivilTime {
        instant.with_timezone(&self.tz)
    }

    /// Interpret a wall-clock reading in the civil zone.
    ///
    /// Ambiguous readings (clocks turned back) resolve to the earlier
    /// instant. Readings inside a forward gap are shifted past it using the
    /// offset that applied before the transition.
    pub fn from_local(&self, naive: NaiveDateTime) -> CivilTime {
        match self.tz.from_local_datetime(&naive) {
            LocalResult::Single(t) => t,
            LocalResult::Ambiguous(earliest, _) => earliest,
            LocalResult::None => {
                let before = self
                    .tz
                    .offset_from_utc_datetime(&(naive - TimeDelta::days(1)))
                    .fix();
                let utc = naive - TimeDelta::seconds(i64::from(before.local_minus_utc()));
                self.tz.from_utc_datetime(&utc)
            }
        }
    }

    /// Midnight at the start of `date` in the civil zone.
    pub fn at_midnight(&self, date: NaiveDate) -> CivilTime {
        self.from_local(date.and_time(NaiveTime::MIN))
    }

    /// Parse a `YYYY-MM-DD` query value into midnight of that day.
    ///
    /// An empty value means "no filter" and yields `Ok(None)`.
    pub fn parse_date(&self, value: &str) -> Result<Option<CivilTime>, CoreError> {
        let value = value.trim();
        if value.is_empty() {
            return Ok(None);
        }
        NaiveDate::parse_from_str(value, DATE_FORMAT)
            .map(|date| Some(self.at_midnight(date)))
            .map_err(|e| CoreError::Validation(format!("invalid date '{value}': {e}")))
    }

    /// Resolve a client-supplied timestamp into the civil zone.
    pub fn resolve(&self, ts: ClientTimestamp) -> CivilTime {
        match ts {
            ClientTimestamp::Zoned(instant) => self.localize(&instant),
            ClientTimestamp::Naive(naive) => self.from_local(naive),
        }
    }
}

impl From<Tz> for CivilTimeZone {
    fn from(tz: Tz) -> Self {
        Self { tz }
    }
}

impl Default for CivilTimeZone {
    fn default() -> Self {
        Self { tz: Tz::Europe__Istanbul }
    }
}

// ---------------------------------------------------------------------------
// ClientTimestamp
// ---------------------------------------------------------------------------

/// A timestamp as it arrives in a request body, before localization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientTimestamp {
    /// Carries its own UTC offset (RFC 3339).
    Zoned(DateTime<FixedOffset>),
    /// Wall-clock reading to be interpreted in the civil zone.
    Naive(NaiveDateTime),
}

impl ClientTimestamp {
    /// Parse a body value. Returns `Ok(None)` for "not supplied": an empty
    /// string or the zero instant `0001-01-01T00:00:00Z`.
    pub fn parse(value: &str) -> Result<Option<Self>, String> {
        let value = value.trim();
        if value.is_empty() {
            return Ok(None);
        }

        if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
            if is_zero_instant(&instant) {
                return Ok(None);
            }
            return Ok(Some(Self::Zoned(instant)));
        }

        for format in NAIVE_DATETIME_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
                return Ok(Some(Self::Naive(naive)));
            }
        }

        NaiveDate::parse_from_str(value, DATE_FORMAT)
            .map(|date| Some(Self::Naive(date.and_time(NaiveTime::MIN))))
            .map_err(|_| format!("invalid timestamp '{value}'"))
    }

    /// Serde helper for optional timestamp fields.
    ///
    /// Use with `#[serde(default, deserialize_with = "ClientTimestamp::deserialize_optional")]`.
    pub fn deserialize_optional<'de, D>(deserializer: D) -> Result<Option<Self>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) => Self::parse(&raw).map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }
}

/// Go-style zero value some clients send for "unset".
fn is_zero_instant(instant: &DateTime<FixedOffset>) -> bool {
    let utc = instant.naive_utc();
    utc.year() == 1 && utc.ordinal() == 1 && utc.time() == NaiveTime::MIN
}
