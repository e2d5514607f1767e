//! Field predicates and amount parsing shared by the bank formats

use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use rust_decimal::Decimal;

fn slash_date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{1,2}/\d{1,2}/\d{2,4}$").expect("invalid slash date regex"))
}

fn month_date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\d{1,2}[\s-][A-Za-z]{3}[\s-]\d{2,4}$").expect("invalid month date regex")
    })
}

fn amount_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[-+]?\$?[\d,]+\.?\d*$").expect("invalid amount regex"))
}

/// Whether `value` is shaped like a statement date (`30/06/2025`, `12-Dec-25`)
///
/// Only the shape is checked; `99/99/99` passes here and fails in
/// [`parse_date`](super::parse_date).
pub fn looks_like_date(value: &str) -> bool {
    let value = value.trim();
    slash_date_re().is_match(value) || month_date_re().is_match(value)
}

/// Whether `value` is shaped like a signed amount (`-4.24`, `+$1,234.56`)
pub fn looks_like_amount(value: &str) -> bool {
    amount_re().is_match(value.trim())
}

/// Parse a signed statement amount
///
/// Currency symbols, thousands separators and an explicit `+` are dropped.
/// Accounting-style `(4.24)` parses as negative.
pub fn parse_amount(value: &str) -> Option<Decimal> {
    let cleaned: String = value
        .trim()
        .chars()
        .filter(|c| *c != '$' && *c != ',' && !c.is_whitespace())
        .collect();

    let (negated, cleaned) = match cleaned
        .strip_prefix('(')
        .and_then(|inner| inner.strip_suffix(')'))
    {
        Some(inner) => (true, inner),
        None => (false, cleaned.as_str()),
    };

    let cleaned = cleaned.strip_prefix('+').unwrap_or(cleaned);
    if cleaned.is_empty() {
        return None;
    }

    let amount = Decimal::from_str(cleaned).ok()?;
    Some(if negated { -amount.abs() } else { amount })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case("30/06/2025", true)]
    #[case("1/7/25", true)]
    #[case("12-Dec-25", true)]
    #[case("12 Dec 2025", true)]
    #[case(" 12-dec-2025 ", true)]
    #[case("2025-06-30", false)]
    #[case("Date", false)]
    #[case("12 December 2025", false)]
    #[case("", false)]
    fn test_looks_like_date(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(looks_like_date(input), expected);
    }

    #[rstest]
    #[case("-4.24", true)]
    #[case("+1,234.56", true)]
    #[case("$100", true)]
    #[case("-$5.00", true)]
    #[case("100.", true)]
    #[case("Amount", false)]
    #[case("4.24CR", false)]
    #[case("", false)]
    fn test_looks_like_amount(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(looks_like_amount(input), expected);
    }

    #[rstest]
    #[case("-4.24", Some(dec!(-4.24)))]
    #[case("+1,234.56", Some(dec!(1234.56)))]
    #[case("$1,000", Some(dec!(1000)))]
    #[case("-$5.00", Some(dec!(-5.00)))]
    #[case("(4.24)", Some(dec!(-4.24)))]
    #[case("($1,200.00)", Some(dec!(-1200.00)))]
    #[case("0", Some(dec!(0)))]
    #[case("", None)]
    #[case("$", None)]
    #[case("abc", None)]
    #[case("1.2.3", None)]
    fn test_parse_amount(#[case] input: &str, #[case] expected: Option<Decimal>) {
        assert_eq!(parse_amount(input), expected);
    }

    #[test]
    fn test_parse_amount_keeps_scale() {
        assert_eq!(parse_amount("-5.00").map(|d| d.scale()), Some(2));
    }
}
