//! Statement row and transaction domain models

use std::ops::Index;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Bank, Category};

/// Fields of one CSV record, in column order
///
/// Field counts are not validated; an empty or malformed line yields a row
/// with whatever fields it had.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRow(Vec<String>);

impl RawRow {
    pub fn new(fields: Vec<String>) -> Self {
        Self(fields)
    }

    /// Trimmed field at `index`, or `None` past the end of the row
    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(|f| f.trim())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> &[String] {
        &self.0
    }
}

impl Index<usize> for RawRow {
    type Output = str;

    fn index(&self, index: usize) -> &str {
        &self.0[index]
    }
}

impl From<Vec<&str>> for RawRow {
    fn from(fields: Vec<&str>) -> Self {
        Self(fields.into_iter().map(str::to_string).collect())
    }
}

/// A statement row after format-specific extraction
///
/// The date is still the statement's own text; it has not been checked
/// against the calendar yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRow {
    pub date_string: String,
    pub amount: Decimal,
    pub description: String,
    pub balance: Option<Decimal>,
}

/// A normalized, categorized transaction ready for review
///
/// Immutable once built. `fingerprint` doubles as the identifier and the
/// duplicate-detection key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub fingerprint: String,
    pub date: NaiveDate,
    /// Date exactly as it appeared in the statement
    pub date_string: String,
    /// Signed amount; positive is money in
    pub amount: Decimal,
    /// Description with bank boilerplate stripped
    pub description: String,
    pub raw_description: String,
    pub bank: Bank,
    pub is_income: bool,
    /// Advisory only
    pub suggested_category: Category,
    pub balance: Option<Decimal>,
}

impl Transaction {
    /// Build a transaction from an extracted row
    pub fn new(
        fingerprint: String,
        date: NaiveDate,
        row: NormalizedRow,
        description: String,
        bank: Bank,
        suggested_category: Category,
    ) -> Self {
        Self {
            fingerprint,
            date,
            is_income: row.amount > Decimal::ZERO,
            date_string: row.date_string,
            amount: row.amount,
            description,
            raw_description: row.description,
            bank,
            suggested_category,
            balance: row.balance,
        }
    }
}
