//! Lenient parsing of travel dates.
//!
//! Dates reach us in several shapes: the HTML form sends `YYYY-MM-DD`, the
//! schedule API's query contract uses `MM/DD/YYYY`, normalised itineraries
//! carry `MM-DD-YYYY`, and some operators send full timestamps.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Error returned when a date string matches none of the accepted formats.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised date: {0:?}")]
pub struct InvalidDate(pub String);

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m-%d-%Y", "%m/%d/%Y"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

/// Parse a calendar date from any of the accepted formats.
///
/// Timestamps with an offset keep the calendar date as written, so
/// `2024-05-01T23:30:00-05:00` is the 1st of May, not the 2nd.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use txbus_server::domain::parse_travel_date;
///
/// let may_day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
/// assert_eq!(parse_travel_date("2024-05-01").unwrap(), may_day);
/// assert_eq!(parse_travel_date("2024-05-01T00:00:00Z").unwrap(), may_day);
/// assert_eq!(parse_travel_date("05/01/2024").unwrap(), may_day);
/// assert!(parse_travel_date("tomorrow").is_err());
/// ```
pub fn parse_travel_date(s: &str) -> Result<NaiveDate, InvalidDate> {
    let s = s.trim();

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(date);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.date_naive());
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt.date());
        }
    }

    Err(InvalidDate(s.to_string()))
}
