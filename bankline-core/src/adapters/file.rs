//! Newline-delimited fingerprint file
//!
//! One fingerprint per line. Blank lines and lines starting with `#` are
//! ignored, and a missing file reads as empty.

use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::result::Result;
use crate::domain::Transaction;
use crate::ports::FingerprintSource;

pub struct FileFingerprintStore {
    path: PathBuf,
}

impl FileFingerprintStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append the fingerprints of `transactions` not already in the file
    ///
    /// Returns the number of lines written.
    pub fn record(&self, transactions: &[Transaction]) -> Result<usize> {
        let mut seen = self.existing_fingerprints()?;
        let fresh: Vec<&str> = transactions
            .iter()
            .map(|t| t.fingerprint.as_str())
            .filter(|fp| seen.insert(fp.to_string()))
            .collect();

        if fresh.is_empty() {
            return Ok(0);
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        for fingerprint in &fresh {
            writeln!(file, "{}", fingerprint)?;
        }

        debug!(path = %self.path.display(), recorded = fresh.len(), "Recorded fingerprints");
        Ok(fresh.len())
    }
}

impl FingerprintSource for FileFingerprintStore {
    fn existing_fingerprints(&self) -> Result<HashSet<String>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(HashSet::new()),
            Err(e) => return Err(e.into()),
        };

        Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Bank, Category, NormalizedRow};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    fn transaction(fingerprint: &str) -> Transaction {
        Transaction::new(
            fingerprint.to_string(),
            NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
            NormalizedRow {
                date_string: "30/06/2025".to_string(),
                amount: dec!(-4.24),
                description: "PAYPAL".to_string(),
                balance: None,
            },
            "PAYPAL".to_string(),
            Bank::CommBank,
            Category::Uncategorized,
        )
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let store = FileFingerprintStore::new(dir.path().join("none.txt"));
        assert!(store.existing_fingerprints().unwrap().is_empty());
    }

    #[test]
    fn test_skips_comments_and_blanks() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("fingerprints.txt");
        fs::write(&path, "# exported 2025-07-01\ntxn_a\n\n  txn_b  \n#txn_c\n").unwrap();

        let existing = FileFingerprintStore::new(&path).existing_fingerprints().unwrap();
        assert_eq!(existing, HashSet::from(["txn_a".to_string(), "txn_b".to_string()]));
    }

    #[test]
    fn test_record_appends_only_new() {
        let dir = tempdir().unwrap();
        let store = FileFingerprintStore::new(dir.path().join("nested").join("fingerprints.txt"));

        assert_eq!(store.record(&[transaction("txn_a"), transaction("txn_b")]).unwrap(), 2);
        assert_eq!(store.record(&[transaction("txn_b"), transaction("txn_c")]).unwrap(), 1);
        assert_eq!(store.record(&[]).unwrap(), 0);

        let existing = store.existing_fingerprints().unwrap();
        assert_eq!(existing.len(), 3);
        let content = fs::read_to_string(store.path()).unwrap();
        assert_eq!(content.lines().count(), 3);
    }
}
