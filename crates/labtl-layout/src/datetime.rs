//! Timestamp parsing and truncation for the time axis.
//!
//! Results arrive in whatever form the upstream API produced them: RFC 3339
//! with an offset, the REST layer's `+0000` offset style, bare local
//! date-times with or without seconds, or a plain calendar date. Offset-aware
//! values are normalized to UTC; naive values are taken as-is.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use labtl_model::{Result, TimelineError};

const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%dT%H:%M%z"];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Resolution at which two timestamps are considered the same column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Second,
    #[default]
    Minute,
    Hour,
}

impl Granularity {
    /// Drop every component finer than this granularity.
    pub fn truncate(&self, value: NaiveDateTime) -> NaiveDateTime {
        let time = match self {
            Granularity::Second => {
                NaiveTime::from_hms_opt(value.hour(), value.minute(), value.second())
            }
            Granularity::Minute => NaiveTime::from_hms_opt(value.hour(), value.minute(), 0),
            Granularity::Hour => NaiveTime::from_hms_opt(value.hour(), 0, 0),
        };
        time.map_or(value, |time| value.date().and_time(time))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Second => "second",
            Granularity::Minute => "minute",
            Granularity::Hour => "hour",
        }
    }
}

/// Parse an observation timestamp.
///
/// # Errors
///
/// Returns [`TimelineError::InvalidTimestamp`] when no supported layout matches.
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(invalid(value, "empty timestamp"));
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.naive_utc());
    }
    for format in OFFSET_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(trimmed, format) {
            return Ok(parsed.naive_utc());
        }
    }
    for format in NAIVE_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(parsed);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN));
    }

    Err(invalid(value, "unrecognized date/time layout"))
}

fn invalid(value: &str, message: &str) -> TimelineError {
    TimelineError::InvalidTimestamp {
        value: value.to_string(),
        message: message.to_string(),
    }
}
