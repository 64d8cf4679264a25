// Date handling for the order range query.
//
// Toast expects `yyyy-MM-dd'T'HH:mm:ss.SSSZ`. Inputs are parsed to a naive
// wall-clock time and the fixed `.000-0400` suffix is appended as text; no
// timezone conversion happens.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike};

use crate::error::{Result, ToastError};

pub const RANGE_SUFFIX: &str = ".000-0400";

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%Y/%m/%d %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y%m%d",
    "%m/%d/%Y",
    "%Y/%m/%d",
    "%B %d, %Y",
    "%B %d %Y",
    "%b %d, %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// Parse a date or date-time string in any of the accepted layouts.
///
/// Date-only input resolves to midnight. An explicit UTC offset is
/// accepted but dropped, keeping the wall-clock time as written.
pub fn parse_flexible(input: &str) -> Result<NaiveDateTime> {
    let s = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.naive_local());
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Ok(dt.naive_local());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            if let Some(dt) = d.and_hms_opt(0, 0, 0) {
                return Ok(dt);
            }
        }
    }

    Err(ToastError::InvalidDate(input.to_string()))
}

/// ISO-8601 rendering: seconds always, microseconds only when non-zero.
pub fn isoformat(dt: &NaiveDateTime) -> String {
    if dt.nanosecond() == 0 {
        dt.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        format!("{}.{:06}", dt.format("%Y-%m-%dT%H:%M:%S"), dt.nanosecond() / 1_000)
    }
}

/// Parse `input` and render it as a range-query bound.
pub fn format_range_bound(input: &str) -> Result<String> {
    let dt = parse_flexible(input)?;
    Ok(format!("{}{}", isoformat(&dt), RANGE_SUFFIX))
}
