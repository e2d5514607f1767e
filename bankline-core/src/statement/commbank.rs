//! Commonwealth Bank statements
//!
//! Header-less `Date, Amount, Description, Balance`, for example
//! `30/06/2025,-4.24,Direct Debit PAYPAL AUSTRALIA,1234.56`.

use std::sync::OnceLock;

use super::format::{apply_passes, compile_passes, Passes};
use super::{looks_like_amount, looks_like_date, parse_amount, parse_date};
use crate::domain::{NormalizedRow, RawRow};

const CLEANER: &[(&str, &str)] = &[
    (r"\s{2,}", " "),
    // Channel prefixes go first so the DEBIT/CREDIT passes below
    // can't leave a dangling "Direct"
    (r"(?i)Direct Debit\s*", ""),
    (r"(?i)Direct Credit\s*", ""),
    (r"\d{10,}", ""),
    // Location codes like AU1234
    (r"[A-Z]{2}\d{4,}", ""),
    (r"(?i)EFTPOS\s*", ""),
    (r"(?i)DEBIT\s*", ""),
    (r"(?i)CREDIT\s*", ""),
    (r"(?i)VISA\s*", ""),
    (r"(?i)CARD\s+\d+", ""),
    (r"(?i)Transfer\s*", "Transfer "),
    (r"(?i)PTY LTD", ""),
];

const COUNTRY_SUFFIX: &[(&str, &str)] = &[(r"(?i)\s+AUS?$", "")];

fn cleaner() -> &'static Passes {
    static PASSES: OnceLock<Passes> = OnceLock::new();
    PASSES.get_or_init(|| compile_passes(CLEANER))
}

fn country_suffix() -> &'static Passes {
    static PASSES: OnceLock<Passes> = OnceLock::new();
    PASSES.get_or_init(|| compile_passes(COUNTRY_SUFFIX))
}

pub(super) fn detect(sample: &[RawRow]) -> bool {
    let Some(first) = sample.first() else {
        return false;
    };
    first.len() >= 3 && looks_like_date(&first[0]) && looks_like_amount(&first[1])
}

pub(super) fn has_header(sample: &[RawRow]) -> bool {
    sample
        .first()
        .and_then(|first| first.get(0))
        .map(|value| !looks_like_date(value))
        .unwrap_or(false)
}

pub(super) fn extract_row(row: &RawRow) -> Option<NormalizedRow> {
    if row.len() < 3 {
        return None;
    }

    let date_string = row.get(0)?;
    parse_date(date_string)?;
    let amount = parse_amount(row.get(1)?)?;

    Some(NormalizedRow {
        date_string: date_string.to_string(),
        amount,
        description: row.get(2).unwrap_or_default().to_string(),
        balance: row.get(3).and_then(parse_amount),
    })
}

pub(super) fn clean_description(text: &str) -> String {
    let cleaned = apply_passes(text, cleaner());
    let cleaned = apply_passes(&cleaned, country_suffix());
    if cleaned.is_empty() {
        text.trim().to_string()
    } else {
        cleaned
    }
}
