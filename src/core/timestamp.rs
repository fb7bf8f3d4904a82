//! Timestamp formatting
//!
//! Every record and crash header uses the same local-time layout:
//! `DD-MM-YYYY HH:MM:SS`.

use chrono::{DateTime, Local, TimeZone};

/// strftime layout for record and crash timestamps
pub const TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

/// Format any zoned datetime in the record layout
#[must_use]
pub fn format_timestamp<Tz>(datetime: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    datetime.format(TIMESTAMP_FORMAT).to_string()
}

/// Current local time in the record layout
#[must_use]
pub fn current_time() -> String {
    format_timestamp(&Local::now())
}
