//! In-memory fingerprint store

use std::collections::HashSet;
use std::sync::RwLock;

use crate::domain::result::{Error, Result};
use crate::domain::Transaction;
use crate::ports::FingerprintSource;

/// Fingerprint set held in memory, for tests and embedding callers
#[derive(Debug, Default)]
pub struct MemoryFingerprintStore {
    fingerprints: RwLock<HashSet<String>>,
}

impl MemoryFingerprintStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fingerprints<I, S>(fingerprints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fingerprints: RwLock::new(fingerprints.into_iter().map(Into::into).collect()),
        }
    }

    /// Remember the fingerprints of `transactions`; returns how many were new
    pub fn record(&self, transactions: &[Transaction]) -> Result<usize> {
        let mut fingerprints = self
            .fingerprints
            .write()
            .map_err(|_| Error::Other("fingerprint store lock poisoned".to_string()))?;
        Ok(transactions
            .iter()
            .filter(|t| fingerprints.insert(t.fingerprint.clone()))
            .count())
    }
}

impl FingerprintSource for MemoryFingerprintStore {
    fn existing_fingerprints(&self) -> Result<HashSet<String>> {
        self.fingerprints
            .read()
            .map(|set| set.clone())
            .map_err(|_| Error::Other("fingerprint store lock poisoned".to_string()))
    }
}
