//! Snapshot-to-document rendering.
//!
//! Every renderer builds a fresh element subtree and replaces the children
//! of its target [`Surface`](crate::dom::Surface). A missing surface or a
//! missing snapshot section makes the renderer a silent no-op.

mod feedback;
mod groups;
mod standings;

pub use feedback::*;
pub use groups::*;
pub use standings::*;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

pub const GOLD_MEDAL: &str = "🥇";
pub const SILVER_MEDAL: &str = "🥈";
pub const BRONZE_MEDAL: &str = "🥉";
pub const GENERIC_MEDAL: &str = "🏅";
pub const TROPHY: &str = "🏆";

/// Text shown for a date string that cannot be parsed.
pub const INVALID_DATE: &str = "Invalid Date";

/// Medal glyph for a 1-based rank. Ranks past the podium share one glyph.
pub fn medal_for_rank(rank: usize) -> &'static str {
    match rank {
        1 => GOLD_MEDAL,
        2 => SILVER_MEDAL,
        3 => BRONZE_MEDAL,
        _ => GENERIC_MEDAL,
    }
}

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
];

const OFFSET_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M%:z", "%Y-%m-%dT%H:%M%z"];

/// Parse an ISO-8601-ish date or date-time into its calendar date.
///
/// Date-times with an offset keep the date as written in that offset.
/// Reduced precision (`YYYY-MM`, `YYYY`) resolves to the first day.
pub fn parse_display_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }

    if let Some(date) = parse_reduced_date(s) {
        return Some(date);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }

    // Minute precision with an offset, which RFC 3339 does not allow.
    let with_offset = match s.strip_suffix('Z').or_else(|| s.strip_suffix('z')) {
        Some(rest) => format!("{}+00:00", rest),
        None => s.to_string(),
    };
    if let Some(dt) = OFFSET_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(&with_offset, fmt).ok())
    {
        return Some(dt.date_naive());
    }

    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
}

fn parse_reduced_date(s: &str) -> Option<NaiveDate> {
    let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());

    match s.split_once('-') {
        None if s.len() == 4 && all_digits(s) => NaiveDate::from_ymd_opt(s.parse().ok()?, 1, 1),
        Some((year, month))
            if year.len() == 4 && month.len() == 2 && all_digits(year) && all_digits(month) =>
        {
            NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)
        }
        _ => None,
    }
}

/// Format a date string as e.g. `Mar 5, 2024`, or [`INVALID_DATE`].
pub fn format_date(s: &str) -> String {
    match parse_display_date(s) {
        Some(date) => date.format("%b %-d, %Y").to_string(),
        None => INVALID_DATE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_medal_podium() {
        assert_eq!(medal_for_rank(1), GOLD_MEDAL);
        assert_eq!(medal_for_rank(2), SILVER_MEDAL);
        assert_eq!(medal_for_rank(3), BRONZE_MEDAL);
    }

    #[test]
    fn test_medal_generic_past_podium() {
        for rank in [4, 5, 10, 99, 1_000, 1_000_000, usize::MAX] {
            assert_eq!(medal_for_rank(rank), GENERIC_MEDAL, "rank {}", rank);
        }
    }

    #[test]
    fn test_medal_zero_is_generic() {
        assert_eq!(medal_for_rank(0), GENERIC_MEDAL);
    }

    #[test]
    fn test_format_date_plain() {
        assert_eq!(format_date("2024-03-05"), "Mar 5, 2024");
        assert_eq!(format_date("2023-12-31"), "Dec 31, 2023");
    }

    #[test]
    fn test_format_date_with_time() {
        assert_eq!(format_date("2024-03-05T18:30:00Z"), "Mar 5, 2024");
        assert_eq!(format_date("2024-03-05T18:30:00+02:00"), "Mar 5, 2024");
        assert_eq!(format_date("2024-03-05T18:30:00.250"), "Mar 5, 2024");
        assert_eq!(format_date("2024-03-05T18:30"), "Mar 5, 2024");
        assert_eq!(format_date("2024-03-05T18:30:00.000Z"), "Mar 5, 2024");
        assert_eq!(format_date("2024-03-05T18:30Z"), "Mar 5, 2024");
        assert_eq!(format_date("2024-03-05T23:30-05:00"), "Mar 5, 2024");
        assert_eq!(format_date("2024-03-05T18:30+0200"), "Mar 5, 2024");
    }

    #[test]
    fn test_format_date_reduced_precision() {
        assert_eq!(format_date("2024-03"), "Mar 1, 2024");
        assert_eq!(format_date("2024"), "Jan 1, 2024");
        assert_eq!(format_date("2024-13"), INVALID_DATE);
        assert_eq!(format_date("24-03"), INVALID_DATE);
    }

    #[test]
    fn test_format_date_trims_whitespace() {
        assert_eq!(format_date("  2024-07-14 "), "Jul 14, 2024");
    }

    #[test]
    fn test_format_date_invalid() {
        assert_eq!(format_date("next tuesday"), INVALID_DATE);
        assert_eq!(format_date(""), INVALID_DATE);
        assert_eq!(format_date("2024-02-30"), INVALID_DATE);
    }
}
