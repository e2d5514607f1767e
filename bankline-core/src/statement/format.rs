//! Bank format registry
//!
//! Each supported dialect is a [`BankFormat`] variant. Detection walks
//! [`REGISTRY`] in order and takes the first match, so a more structurally
//! specific format must come before a looser one.

use std::sync::OnceLock;

use regex::Regex;

use super::{commbank, nab};
use crate::domain::{Bank, FailureReason, NormalizedRow, RawRow};

/// A supported bank CSV dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BankFormat {
    CommBank,
    Nab,
}

/// Detection priority order
pub const REGISTRY: [BankFormat; 2] = [BankFormat::CommBank, BankFormat::Nab];

impl BankFormat {
    pub fn bank(&self) -> Bank {
        match self {
            BankFormat::CommBank => Bank::CommBank,
            BankFormat::Nab => Bank::Nab,
        }
    }

    /// Whether the sample looks like this dialect; only the first row is inspected
    pub fn detect(&self, sample: &[RawRow]) -> bool {
        match self {
            BankFormat::CommBank => commbank::detect(sample),
            BankFormat::Nab => nab::detect(sample),
        }
    }

    /// Whether the first row is a header to skip
    pub fn has_header(&self, sample: &[RawRow]) -> bool {
        match self {
            BankFormat::CommBank => commbank::has_header(sample),
            BankFormat::Nab => nab::has_header(sample),
        }
    }

    /// Extract a row, or `None` if it lacks fields or has an unusable date or amount
    pub fn extract_row(&self, row: &RawRow) -> Option<NormalizedRow> {
        match self {
            BankFormat::CommBank => commbank::extract_row(row),
            BankFormat::Nab => nab::extract_row(row),
        }
    }

    /// Strip bank boilerplate; never returns an empty string for non-empty input
    pub fn clean_description(&self, text: &str) -> String {
        match self {
            BankFormat::CommBank => commbank::clean_description(text),
            BankFormat::Nab => nab::clean_description(text),
        }
    }
}

/// First registered format whose detector accepts the sample
pub fn detect_format(sample: &[RawRow]) -> Option<BankFormat> {
    REGISTRY.iter().copied().find(|format| format.detect(sample))
}

/// Banks with a registered format, in detection order
pub fn supported_banks() -> Vec<Bank> {
    REGISTRY.iter().map(BankFormat::bank).collect()
}

/// Describe the first row's shape for troubleshooting an undetected file
pub fn diagnose(sample: &[RawRow]) -> String {
    let Some(first) = sample.first() else {
        return "First row has 0 columns: ".to_string();
    };
    let leading: Vec<&str> = first.fields().iter().take(4).map(String::as_str).collect();
    format!("First row has {} columns: {}", first.len(), leading.join(" | "))
}

/// Detect the format of `sample` or explain why none matched
pub fn detect_or_diagnose(sample: &[RawRow]) -> Result<BankFormat, FailureReason> {
    detect_format(sample).ok_or_else(|| FailureReason::NoFormatDetected {
        supported: supported_banks(),
        diagnostic: diagnose(sample),
    })
}

/// Ordered regex substitutions making up a description cleaner
pub(crate) type Passes = Vec<(Regex, &'static str)>;

pub(crate) fn compile_passes(rules: &[(&str, &'static str)]) -> Passes {
    rules
        .iter()
        .map(|(pattern, replacement)| {
            (
                Regex::new(pattern).expect("invalid description cleaner regex"),
                *replacement,
            )
        })
        .collect()
}

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("invalid whitespace regex"))
}

/// Run `passes` in order, then collapse whitespace and trim
pub(crate) fn apply_passes(text: &str, passes: &Passes) -> String {
    let cleaned = passes
        .iter()
        .fold(text.to_string(), |acc, (re, replacement)| {
            re.replace_all(&acc, *replacement).into_owned()
        });
    whitespace_re().replace_all(&cleaned, " ").trim().to_string()
}
