//! UTC-to-local conversion for upstream clock-time strings.

use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use std::fmt;

#[derive(Debug)]
pub enum ConvertError {
    UnknownTimezone(String),
    InvalidTime(String),
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownTimezone(tz) => write!(f, "Unknown timezone identifier '{}'", tz),
            Self::InvalidTime(msg) => write!(f, "Unparseable clock time: {}", msg),
        }
    }
}

impl std::error::Error for ConvertError {}

/// Convert a UTC clock time in `h:mm:ss AM/PM` form to the equivalent
/// local clock time in `hh:mm AM/PM` form.
///
/// The calendar date is attached before conversion so zones observing
/// daylight saving get the offset in force on that date, not the offset
/// of some arbitrary anchor day.
pub fn to_local_clock(utc_clock: &str, date: NaiveDate, timezone: &str) -> Result<String, ConvertError> {
    let tz: Tz = timezone
        .parse()
        .map_err(|_| ConvertError::UnknownTimezone(timezone.to_string()))?;

    let time = NaiveTime::parse_from_str(utc_clock, "%I:%M:%S %p")
        .map_err(|e| ConvertError::InvalidTime(format!("'{}': {}", utc_clock, e)))?;

    let local = Utc.from_utc_datetime(&date.and_time(time)).with_timezone(&tz);
    Ok(local.format("%I:%M %p").to_string())
}
