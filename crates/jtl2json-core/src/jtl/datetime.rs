use chrono::{Local, TimeZone};

use crate::error::Jtl2JsonError;

/// Display format for the report datetime, e.g. `Nov-14-23 10:13pm`.
pub const DATETIME_FORMAT: &str = "%b-%d-%y %-I:%M%P";

/// Format an epoch-seconds string in the local timezone.
pub fn format_datetime(epoch: &str) -> Result<String, Jtl2JsonError> {
    format_datetime_in(epoch, &Local)
}

/// Format an epoch-seconds string in the given timezone.
///
/// The text must be a base-10 integer with an optional sign. Anything else,
/// including values outside the representable date range, is a format error.
pub fn format_datetime_in<Tz>(epoch: &str, tz: &Tz) -> Result<String, Jtl2JsonError>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let secs: i64 = epoch.parse().map_err(|e| {
        Jtl2JsonError::Format(format!("timestamp '{epoch}' is not an integer: {e}"))
    })?;

    let dt = tz.timestamp_opt(secs, 0).single().ok_or_else(|| {
        Jtl2JsonError::Format(format!("timestamp '{epoch}' is out of range"))
    })?;

    Ok(dt.format(DATETIME_FORMAT).to_string())
}
