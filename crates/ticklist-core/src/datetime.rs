//! Interpretation of server timestamps and export timestamps.
//!
//! The reference backend stores `created_date` as a naive local ISO 8601
//! string (microsecond precision, no offset). RFC 3339 values are accepted
//! too and converted to local time.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parses a `created_date` value into local wall-clock time.
pub fn parse_created(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Local).naive_local());
    }

    for format in NAIVE_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(parsed);
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Local calendar day a task was created on.
pub fn created_on(raw: &str) -> Option<NaiveDate> {
    parse_created(raw).map(|dt| dt.date())
}

/// Row label in the style `Jan 5, 2025, 03:04 PM`. Unparseable values are
/// shown verbatim.
pub fn format_created(raw: &str) -> String {
    match parse_created(raw) {
        Some(dt) => dt.format("%b %-d, %Y, %I:%M %p").to_string(),
        None => raw.to_string(),
    }
}

/// `exportedAt` value: UTC, millisecond precision, `Z` suffix.
pub fn export_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn export_file_name(now: DateTime<Utc>) -> String {
    format!("todo-export-{}.json", now.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};

    use super::*;

    #[test]
    fn parses_reference_server_format() {
        let parsed = parse_created("2025-01-05T15:04:09.123456").expect("parse");
        assert_eq!(
            parsed.date(),
            NaiveDate::from_ymd_opt(2025, 1, 5).expect("date")
        );
        assert_eq!(format_created("2025-01-05T15:04:09.123456"), "Jan 5, 2025, 03:04 PM");
    }

    #[test]
    fn accepts_space_separator_and_bare_dates() {
        assert!(parse_created("2025-01-05 08:00:00").is_some());
        assert_eq!(
            created_on("2024-12-31"),
            NaiveDate::from_ymd_opt(2024, 12, 31)
        );
    }

    #[test]
    fn garbage_is_shown_verbatim() {
        assert_eq!(parse_created("yesterday"), None);
        assert_eq!(format_created("yesterday"), "yesterday");
        assert_eq!(created_on(""), None);
    }

    #[test]
    fn export_stamp_and_file_name() {
        let now = Utc
            .with_ymd_and_hms(2025, 2, 3, 4, 5, 6)
            .single()
            .expect("timestamp");
        assert_eq!(export_timestamp(now), "2025-02-03T04:05:06.000Z");
        assert_eq!(export_file_name(now), "todo-export-2025-02-03.json");
    }
}
