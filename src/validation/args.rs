//! Precondition checks for endpoint arguments.
//!
//! # Responsibilities
//! - Verify date arguments before they are rendered into payloads
//! - Verify date ranges are ordered
//! - Reject absent required arguments with a count of what was missing
//!
//! # Design Decisions
//! - Pure and stateless; failures are invalid-argument errors for the
//!   immediate caller, never retried or suppressed
//! - Date strings are matched strictly: exactly `YYYY-MM-DD` or
//!   `YYYY-MM-DDTHH:MM:SS`, zero-padded, nothing else

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

/// Invalid-argument conditions raised by the checks in this module.
#[derive(Debug, Error)]
pub enum ArgumentError {
    #[error("date string must look like YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS, got '{0}'")]
    InvalidDate(String),

    #[error("start date {start} must not follow end date {end}")]
    InvalidRange { start: String, end: String },

    #[error("{count} nil(s) found in parameters ({listing})")]
    NilArguments { count: usize, listing: String },
}

/// A date argument that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckedDate {
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl CheckedDate {
    /// Position on the timeline; a bare date compares as midnight.
    fn timeline_position(&self) -> NaiveDateTime {
        match self {
            CheckedDate::Date(date) => date.and_hms_opt(0, 0, 0).unwrap_or_default(),
            CheckedDate::DateTime(datetime) => *datetime,
        }
    }
}

impl From<NaiveDate> for CheckedDate {
    fn from(date: NaiveDate) -> Self {
        CheckedDate::Date(date)
    }
}

impl From<NaiveDateTime> for CheckedDate {
    fn from(datetime: NaiveDateTime) -> Self {
        CheckedDate::DateTime(datetime)
    }
}

impl fmt::Display for CheckedDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckedDate::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            CheckedDate::DateTime(datetime) => {
                write!(f, "{}", datetime.format("%Y-%m-%dT%H:%M:%S"))
            }
        }
    }
}

/// Validate a date argument given in string form.
///
/// Accepts exactly `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM:SS`; the value must
/// also be a real calendar date (or date and time).
pub fn check_date(value: &str) -> Result<CheckedDate, ArgumentError> {
    if matches_shape(value, "dddd-dd-ddTdd:dd:dd") {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
            return Ok(CheckedDate::DateTime(datetime));
        }
    }

    if matches_shape(value, "dddd-dd-dd") {
        if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
            return Ok(CheckedDate::Date(date));
        }
    }

    Err(ArgumentError::InvalidDate(value.to_string()))
}

/// Validate a date range: both bounds valid per [`check_date`], start not
/// after end. A bare date compares as midnight against a datetime bound.
pub fn check_date_range(
    start: &str,
    end: &str,
) -> Result<(CheckedDate, CheckedDate), ArgumentError> {
    let start_date = check_date(start)?;
    let end_date = check_date(end)?;

    if start_date.timeline_position() > end_date.timeline_position() {
        return Err(ArgumentError::InvalidRange {
            start: start_date.to_string(),
            end: end_date.to_string(),
        });
    }

    Ok((start_date, end_date))
}

/// Fail if any argument is absent, reporting how many were and the full
/// listing.
pub fn check_for_nils<T: fmt::Display>(values: &[Option<T>]) -> Result<(), ArgumentError> {
    let count = values.iter().filter(|value| value.is_none()).count();
    if count == 0 {
        return Ok(());
    }

    let listing = values
        .iter()
        .map(|value| match value {
            Some(present) => present.to_string(),
            None => "nil".to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ");

    Err(ArgumentError::NilArguments { count, listing })
}

/// Byte-shape match: `d` in the shape is an ASCII digit, any other byte
/// matches itself.
fn matches_shape(value: &str, shape: &str) -> bool {
    value.len() == shape.len()
        && value
            .bytes()
            .zip(shape.bytes())
            .all(|(v, s)| if s == b'd' { v.is_ascii_digit() } else { v == s })
}
