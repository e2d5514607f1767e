//! Statement date normalization
//!
//! Australian statements put the day first. Two-digit years pivot at 50:
//! `25` is 2025, `75` is 1975.

use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate};
use regex::Regex;

// Last-resort layouts tried after the bank-specific ones
const FALLBACK_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d %B %Y", "%d-%B-%Y", "%B %d, %Y"];

fn slash_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{4}|\d{2})$").expect("invalid slash date regex")
    })
}

fn month_name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\d{1,2})[\s-]([A-Za-z]{3})[\s-](\d{4}|\d{2})$")
            .expect("invalid month name date regex")
    })
}

/// Convert a statement date string to a calendar date
///
/// Returns `None` when nothing matches or the date does not exist
/// (`31/02/2025`). Pure; the same input always gives the same answer.
pub fn parse_date(date_string: &str) -> Option<NaiveDate> {
    let value = date_string.trim();
    if value.is_empty() {
        return None;
    }

    if let Some(caps) = slash_re().captures(value) {
        let day = caps[1].parse().ok()?;
        let month = caps[2].parse().ok()?;
        return NaiveDate::from_ymd_opt(expand_year(&caps[3])?, month, day);
    }

    if let Some(caps) = month_name_re().captures(value) {
        let day = caps[1].parse().ok()?;
        let month = month_number(&caps[2])?;
        return NaiveDate::from_ymd_opt(expand_year(&caps[3])?, month, day);
    }

    parse_fallback(value)
}

fn expand_year(year: &str) -> Option<i32> {
    let n: i32 = year.parse().ok()?;
    Some(match year.len() {
        2 if n < 50 => 2000 + n,
        2 => 1900 + n,
        _ => n,
    })
}

fn month_number(abbrev: &str) -> Option<u32> {
    let month = match abbrev.to_ascii_lowercase().as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}

fn parse_fallback(value: &str) -> Option<NaiveDate> {
    FALLBACK_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn ymd(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[rstest]
    #[case("30/06/2025", ymd(2025, 6, 30))]
    #[case("1/7/25", ymd(2025, 7, 1))]
    #[case("01/01/49", ymd(2049, 1, 1))]
    #[case("01/01/50", ymd(1950, 1, 1))]
    #[case("15/08/99", ymd(1999, 8, 15))]
    #[case("12-Dec-25", ymd(2025, 12, 12))]
    #[case("12 Dec 25", ymd(2025, 12, 12))]
    #[case("3-jan-2026", ymd(2026, 1, 3))]
    #[case("3 SEP 75", ymd(1975, 9, 3))]
    fn test_statement_formats(#[case] input: &str, #[case] expected: Option<NaiveDate>) {
        assert_eq!(parse_date(input), expected);
    }

    #[rstest]
    #[case("2025-06-30", ymd(2025, 6, 30))]
    #[case("2025/06/30", ymd(2025, 6, 30))]
    #[case("12 December 2025", ymd(2025, 12, 12))]
    #[case("2025-06-30T10:15:00+10:00", ymd(2025, 6, 30))]
    fn test_fallback_formats(#[case] input: &str, #[case] expected: Option<NaiveDate>) {
        assert_eq!(parse_date(input), expected);
    }

    #[rstest]
    #[case("")]
    #[case("Date")]
    #[case("31/02/2025")]
    #[case("13/13/2025")]
    #[case("12-Foo-25")]
    #[case("1/1/202")]
    fn test_rejects_invalid(#[case] input: &str) {
        assert_eq!(parse_date(input), None);
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(parse_date("12-Dec-25"), parse_date("12-Dec-25"));
    }
}
