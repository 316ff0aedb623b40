//! Date helper functions

use chrono::{DateTime, Datelike, TimeZone, Utc};
use chrono_tz::Tz;

/// Resolve an IANA timezone name, falling back to UTC
pub fn parse_timezone(name: &str) -> Tz {
    if name.is_empty() {
        return Tz::UTC;
    }
    name.parse().unwrap_or_else(|_| {
        tracing::warn!("Unknown timezone {:?}, using UTC", name);
        Tz::UTC
    })
}

/// Convert an API timestamp into the site's timezone
pub fn to_timezone(date: &DateTime<Utc>, tz: Tz) -> DateTime<Tz> {
    date.with_timezone(&tz)
}

/// Format a date using Moment.js-compatible format string
///
/// # Examples
/// ```ignore
/// format_date(&date, "YYYY-MM-DD") // -> "2024-01-15"
/// ```
pub fn format_date<Zone: TimeZone>(date: &DateTime<Zone>, format: &str) -> String
where
    Zone::Offset: std::fmt::Display,
{
    let chrono_format = moment_to_chrono_format(format);
    date.format(&chrono_format).to_string()
}

/// Format a date in ISO 8601 / XML format
pub fn date_xml<Zone: TimeZone>(date: &DateTime<Zone>) -> String
where
    Zone::Offset: std::fmt::Display,
{
    date.format("%Y-%m-%dT%H:%M:%S%:z").to_string()
}

/// Korean long form, e.g. "2024년 1월 15일"
pub fn korean_long_date<Zone: TimeZone>(date: &DateTime<Zone>) -> String {
    format!("{}년 {}월 {}일", date.year(), date.month(), date.day())
}

/// Korean month and day, e.g. "1월 15일"
pub fn korean_short_date<Zone: TimeZone>(date: &DateTime<Zone>) -> String {
    format!("{}월 {}일", date.month(), date.day())
}

/// Korean numeric form, e.g. "2024. 1. 15."
pub fn korean_numeric_date<Zone: TimeZone>(date: &DateTime<Zone>) -> String {
    format!("{}. {}. {}.", date.year(), date.month(), date.day())
}

/// Convert Moment.js format to chrono format
fn moment_to_chrono_format(format: &str) -> String {
    let replacements = [
        // Year
        ("YYYY", "%Y"),
        ("YY", "%y"),
        // Month
        ("MMMM", "%B"),
        ("MMM", "%b"),
        ("MM", "%m"),
        // Day of month
        ("DDDD", "%j"),
        ("DD", "%d"),
        // Hour
        ("HH", "%H"),
        ("hh", "%I"),
        // Minute, after MM is gone
        ("mm", "%M"),
        ("ss", "%S"),
        // Day of week
        ("dddd", "%A"),
        ("ddd", "%a"),
        ("ZZ", "%z"),
    ];

    let mut result = format.to_string();

    for (from, to) in replacements {
        result = result.replace(from, to);
    }

    result
}
