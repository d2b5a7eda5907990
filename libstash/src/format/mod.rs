//! Human-readable data formatting utilities.
//!
//! This module turns raw sizes and timestamps into the strings shown in the
//! `SIZE` and `CREATED AT` columns of an image listing.

use chrono::{DateTime, TimeZone};
use humansize::{DECIMAL, format_size as format_size_human};
use std::fmt::Display;


/// Layout used for the `CREATED AT` column: month, day, year, 24-hour time.
pub const CREATED_FORMAT: &str = "%b %-d, %Y %H:%M";

/// Formats a byte size using decimal units (kB, MB, GB).
///
/// Image sizes are reported in powers of 1000, matching what registries and
/// most container tooling show.
///
/// # Examples
///
/// ```
/// use libstash::format::format_size;
///
/// assert_eq!(format_size(5_000_000), "5 MB");
/// assert_eq!(format_size(1000), "1 kB");
/// ```
pub fn format_size(size_bytes: u64) -> String {
    format_size_human(size_bytes, DECIMAL)
}

/// Formats a creation timestamp as `Mon D, YYYY HH:MM`, in the timestamp's own zone.
///
/// # Examples
///
/// ```
/// use libstash::format::format_created;
/// use chrono::{TimeZone, Utc};
///
/// let ts = Utc.with_ymd_and_hms(2017, 7, 4, 15, 9, 0).unwrap();
/// assert_eq!(format_created(&ts), "Jul 4, 2017 15:09");
/// ```
pub fn format_created<Tz>(timestamp: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    timestamp.format(CREATED_FORMAT).to_string()
}
