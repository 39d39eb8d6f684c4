//! Custom Askama template filters and display formatting.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

use chrono::{DateTime, Datelike, Utc};

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    Ok(Utc::now().year())
}

/// Format a timestamp as `January 5th, 2026`.
#[must_use]
pub fn long_date(at: &DateTime<Utc>) -> String {
    format!(
        "{} {}{}, {}",
        at.format("%B"),
        at.day(),
        ordinal_suffix(at.day()),
        at.year()
    )
}

const fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn date(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, day, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_long_date() {
        assert_eq!(long_date(&date(5)), "January 5th, 2026");
        assert_eq!(
            long_date(&Utc.with_ymd_and_hms(2025, 11, 22, 0, 0, 0).unwrap()),
            "November 22nd, 2025"
        );
    }

    #[test]
    fn test_ordinal_suffixes() {
        let cases = [
            (1, "st"),
            (2, "nd"),
            (3, "rd"),
            (4, "th"),
            (11, "th"),
            (12, "th"),
            (13, "th"),
            (21, "st"),
            (22, "nd"),
            (23, "rd"),
            (31, "st"),
        ];
        for (day, suffix) in cases {
            assert_eq!(ordinal_suffix(day), suffix, "day {day}");
        }
    }
}
