//! Transaction fingerprints
//!
//! A fingerprint is both the stable identifier of an imported transaction and
//! its duplicate-detection key. It is a pure function of
//! `(date_string, amount, raw_description, bank, account_id)`: two rows that
//! agree on that tuple always collide.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::Bank;

const PREFIX: &str = "txn_";

/// Hash used to derive fingerprints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FingerprintScheme {
    /// 32-bit rolling hash, base36. Matches identifiers already held in
    /// existing stores.
    #[default]
    Rolling,
    /// SHA-256 truncated to 16 hex chars
    Sha256,
}

impl FingerprintScheme {
    /// Fingerprint a transaction tuple
    ///
    /// `date_string` and `raw_description` are the values as they appeared in
    /// the statement, before any normalization or cleaning.
    pub fn fingerprint(
        &self,
        date_string: &str,
        amount: Decimal,
        raw_description: &str,
        bank: Bank,
        account_id: Option<&str>,
    ) -> String {
        let input = fingerprint_input(date_string, amount, raw_description, bank, account_id);
        match self {
            FingerprintScheme::Rolling => {
                let hash = rolling_hash(&input);
                format!("{}{}", PREFIX, to_base36((hash as i64).unsigned_abs()))
            }
            FingerprintScheme::Sha256 => {
                let mut hasher = Sha256::new();
                hasher.update(input.as_bytes());
                let result = hasher.finalize();
                let hex: String = result[..8].iter().map(|b| format!("{:02x}", b)).collect();
                format!("{}{}", PREFIX, hex)
            }
        }
    }
}

impl FromStr for FingerprintScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rolling" => Ok(FingerprintScheme::Rolling),
            "sha256" => Ok(FingerprintScheme::Sha256),
            other => Err(format!("unknown fingerprint scheme: {}", other)),
        }
    }
}

/// Canonical `date|amount|description|bank|account` string
///
/// The amount is rendered in its shortest form (`-4.24`, `100`, `0`) so
/// `100.00` and `100` fingerprint identically.
fn fingerprint_input(
    date_string: &str,
    amount: Decimal,
    raw_description: &str,
    bank: Bank,
    account_id: Option<&str>,
) -> String {
    format!(
        "{}|{}|{}|{}|{}",
        date_string,
        amount.normalize(),
        raw_description,
        bank.code(),
        account_id.unwrap_or("")
    )
}

/// `hash = hash * 31 + unit` over UTF-16 code units, wrapping at 32 bits
fn rolling_hash(input: &str) -> i32 {
    input.encode_utf16().fold(0i32, |hash, unit| {
        hash.wrapping_shl(5).wrapping_sub(hash).wrapping_add(i32::from(unit))
    })
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}
