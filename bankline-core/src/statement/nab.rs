//! NAB statements
//!
//! Always headered: `Date, Amount, Account Number, , Transaction Type,
//! Transaction Details, Balance, Category, Merchant Name`. Dates use the
//! `12-Dec-25` form.

use std::sync::OnceLock;

use super::format::{apply_passes, compile_passes, Passes};
use super::{looks_like_date, parse_amount, parse_date};
use crate::domain::{NormalizedRow, RawRow};

const DATE: usize = 0;
const AMOUNT: usize = 1;
const TRANSACTION_TYPE: usize = 4;
const TRANSACTION_DETAILS: usize = 5;
const BALANCE: usize = 6;

const CLEANER: &[(&str, &str)] = &[
    (r"\s{2,}", " "),
    (r"(?i)TRANSFER CREDIT\s*", ""),
    (r"(?i)TRANSFER DEBIT\s*", ""),
    (r"(?i)LOAN REPAYMENT\s*", "Loan Repayment "),
    (r"(?i)ONLINE\s+[A-Z0-9]+\s*", ""),
    (r"(?i)Linked Acc Trns\s*", "Transfer "),
    (r"\d{8,}", ""),
    (r"(?i)A/C\s*", ""),
];

fn cleaner() -> &'static Passes {
    static PASSES: OnceLock<Passes> = OnceLock::new();
    PASSES.get_or_init(|| compile_passes(CLEANER))
}

fn header_fields(sample: &[RawRow]) -> Vec<String> {
    sample
        .first()
        .map(|first| first.fields().iter().map(|f| f.trim().to_lowercase()).collect())
        .unwrap_or_default()
}

pub(super) fn detect(sample: &[RawRow]) -> bool {
    let header = header_fields(sample);
    let has_date = header.iter().any(|h| h == "date");
    let has_transaction = header
        .iter()
        .any(|h| h.contains("transaction type") || h.contains("transaction details"));
    has_date && has_transaction
}

pub(super) fn has_header(sample: &[RawRow]) -> bool {
    header_fields(sample).iter().any(|h| h == "date")
}

pub(super) fn extract_row(row: &RawRow) -> Option<NormalizedRow> {
    if row.len() < 6 {
        return None;
    }

    let date_string = row.get(DATE).filter(|d| looks_like_date(d))?;
    parse_date(date_string)?;
    let amount = parse_amount(row.get(AMOUNT)?)?;

    let description = row
        .get(TRANSACTION_DETAILS)
        .filter(|d| !d.is_empty())
        .or_else(|| row.get(TRANSACTION_TYPE))
        .unwrap_or_default();

    Some(NormalizedRow {
        date_string: date_string.to_string(),
        amount,
        description: description.to_string(),
        balance: row.get(BALANCE).and_then(parse_amount),
    })
}

pub(super) fn clean_description(text: &str) -> String {
    let cleaned = apply_passes(text, cleaner());
    if cleaned.is_empty() {
        text.trim().to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statement::tokenize;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    const HEADER: &str = "Date,Amount,Account Number,,Transaction Type,\
                          Transaction Details,Balance,Category,Merchant Name";

    #[test]
    fn test_detect_and_header() {
        let sample = tokenize(HEADER);
        assert!(detect(&sample));
        assert!(has_header(&sample));

        let details_only = tokenize("DATE,Amount,Transaction Details");
        assert!(detect(&details_only));

        let no_transaction_column = tokenize("Date,Amount,Description");
        assert!(!detect(&no_transaction_column));
        assert!(has_header(&no_transaction_column));

        // "Date" must be a whole column name
        let posted_date = tokenize("Posted Date,Amount,Transaction Type");
        assert!(!detect(&posted_date));
    }

    #[rstest]
    #[case("12-Dec-25")]
    #[case("12 Dec 25")]
    fn test_extract_dates(#[case] date: &str) {
        let line =
            format!("{date},-20.00,123456789,,EFTPOS,WOOLWORTHS 1234,500.00,Groceries,Woolworths");
        let rows = tokenize(&line);
        let extracted = extract_row(&rows[0]).expect("row should extract");
        assert_eq!(extracted.date_string, date);
        assert_eq!(
            parse_date(&extracted.date_string),
            chrono::NaiveDate::from_ymd_opt(2025, 12, 12)
        );
        assert_eq!(extracted.amount, dec!(-20.00));
        assert_eq!(extracted.description, "WOOLWORTHS 1234");
        assert_eq!(extracted.balance, Some(dec!(500.00)));
    }

    #[test]
    fn test_description_falls_back_to_type() {
        let rows = tokenize("01-Jul-25,-9.50,123456789,,ACCOUNT FEE,,490.50");
        let extracted = extract_row(&rows[0]).expect("row should extract");
        assert_eq!(extracted.description, "ACCOUNT FEE");
    }

    #[rstest]
    #[case(HEADER)]
    #[case("12-Dec-25,-20.00,123,,EFTPOS")]
    #[case("2025-12-12,-20.00,123,,EFTPOS,SHOP,1.00")]
    #[case("31-Feb-25,-20.00,123,,EFTPOS,SHOP,1.00")]
    #[case("12-Dec-25,twenty,123,,EFTPOS,SHOP,1.00")]
    fn test_rejects(#[case] line: &str) {
        let rows = tokenize(line);
        assert_eq!(extract_row(&rows[0]), None);
    }

    #[rstest]
    #[case("TRANSFER CREDIT SMITH J RENT", "SMITH J RENT")]
    #[case("ONLINE  A1B2C3 Mum birthday", "Mum birthday")]
    #[case("LOAN REPAYMENT 123456789012", "Loan Repayment")]
    #[case("Linked Acc Trns A/C 12345678", "Transfer")]
    #[case("TRANSFER DEBIT", "TRANSFER DEBIT")]
    fn test_clean_description(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(clean_description(input), expected);
    }
}
