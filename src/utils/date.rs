//! Date parsing and formatting for macros, crumbs and schema nodes.
//!
//! Content fixtures carry dates as strings; accepted forms are
//! `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM:SS` and the same with a trailing `Z`.
//! Everything is treated as UTC.

use chrono::{
    Datelike, NaiveDate, NaiveDateTime,
    format::{Item, StrftimeItems},
};
use std::fmt::Write;

/// Parse a content date.
pub fn parse(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim().trim_end_matches('Z');
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Format with a `strftime` pattern. An invalid pattern yields `None`
/// instead of panicking.
pub fn format(dt: &NaiveDateTime, pattern: &str) -> Option<String> {
    let items: Vec<Item<'_>> = StrftimeItems::new(pattern).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return None;
    }
    let mut out = String::new();
    write!(out, "{}", dt.format_with_items(items.iter())).ok()?;
    Some(out)
}

/// ISO 8601 with an explicit UTC offset, as schema.org and Open Graph expect.
pub fn iso8601(dt: &NaiveDateTime) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S+00:00").to_string()
}

/// Reformat a content date string; empty when it does not parse.
pub fn reformat(s: &str, pattern: &str) -> String {
    parse(s)
        .and_then(|dt| format(&dt, pattern))
        .unwrap_or_default()
}

/// Content date string as ISO 8601; `None` when it does not parse.
pub fn to_iso8601(s: &str) -> Option<String> {
    parse(s).map(|dt| iso8601(&dt))
}

/// Label of a date archive: `2024`, `January 2024`, or the full date in
/// `day_pattern`.
pub fn archive_label(year: i32, month: Option<u32>, day: Option<u32>, day_pattern: &str) -> String {
    let Some(month) = month else {
        return year.to_string();
    };
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return year.to_string();
    };
    match day.and_then(|d| first.with_day(d)) {
        Some(date) => date
            .and_hms_opt(0, 0, 0)
            .and_then(|dt| format(&dt, day_pattern))
            .unwrap_or_else(|| date.to_string()),
        None => first.format("%B %Y").to_string(),
    }
}

/// English month name (`1` → `January`).
pub fn month_name(month: u32) -> Option<String> {
    NaiveDate::from_ymd_opt(2000, month, 1).map(|d| d.format("%B").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_forms() {
        let expected = NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(14, 30, 45)
            .unwrap();
        assert_eq!(parse("2024-06-15T14:30:45"), Some(expected));
        assert_eq!(parse("2024-06-15T14:30:45Z"), Some(expected));
        assert_eq!(parse("2024-06-15 14:30:45"), Some(expected));
        assert_eq!(
            parse("2024-06-15").map(|d| d.date()),
            NaiveDate::from_ymd_opt(2024, 6, 15)
        );
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("2024-13-01"), None);
        assert_eq!(parse("2023-02-29"), None);
        assert_eq!(parse("yesterday"), None);
    }

    #[test]
    fn test_format_and_iso() {
        let dt = parse("2024-01-05T08:09:10").unwrap();
        assert_eq!(format(&dt, "%B %-d, %Y").as_deref(), Some("January 5, 2024"));
        assert_eq!(iso8601(&dt), "2024-01-05T08:09:10+00:00");
        assert_eq!(reformat("2024-01-05", "%Y/%m/%d"), "2024/01/05");
        assert_eq!(reformat("garbage", "%Y"), "");
    }

    #[test]
    fn test_format_invalid_pattern() {
        let dt = parse("2024-01-05").unwrap();
        assert_eq!(format(&dt, "%Q"), None);
    }

    #[test]
    fn test_archive_label() {
        assert_eq!(archive_label(2024, None, None, "%B %-d, %Y"), "2024");
        assert_eq!(archive_label(2024, Some(3), None, "%B %-d, %Y"), "March 2024");
        assert_eq!(
            archive_label(2024, Some(3), Some(9), "%B %-d, %Y"),
            "March 9, 2024"
        );
        assert_eq!(archive_label(2024, Some(13), None, "%Y"), "2024");
    }

    #[test]
    fn test_month_name() {
        assert_eq!(month_name(12).as_deref(), Some("December"));
        assert_eq!(month_name(0), None);
    }
}
