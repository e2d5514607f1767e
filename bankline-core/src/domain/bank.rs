//! Bank domain entity

use std::fmt;

use serde::{Deserialize, Serialize};

/// A bank whose statement exports may be uploaded
///
/// Only banks with a registered statement format are importable; the others
/// are known so the front end can list them as upcoming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bank {
    #[serde(rename = "CBA")]
    CommBank,
    #[serde(rename = "NAB")]
    Nab,
    #[serde(rename = "ANZ")]
    Anz,
    #[serde(rename = "WBC")]
    Westpac,
}

impl Bank {
    pub const ALL: [Bank; 4] = [Bank::CommBank, Bank::Nab, Bank::Anz, Bank::Westpac];

    /// Short code, also folded into transaction fingerprints
    pub fn code(&self) -> &'static str {
        match self {
            Bank::CommBank => "CBA",
            Bank::Nab => "NAB",
            Bank::Anz => "ANZ",
            Bank::Westpac => "WBC",
        }
    }

    /// Human-readable name for display
    pub fn name(&self) -> &'static str {
        match self {
            Bank::CommBank => "Commonwealth Bank",
            Bank::Nab => "NAB",
            Bank::Anz => "ANZ",
            Bank::Westpac => "Westpac",
        }
    }

    /// Whether a statement format is registered for this bank
    pub fn is_supported(&self) -> bool {
        matches!(self, Bank::CommBank | Bank::Nab)
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|b| b.code().eq_ignore_ascii_case(code.trim()))
    }
}

impl fmt::Display for Bank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
