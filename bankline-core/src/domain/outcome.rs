//! Import outcome types

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::result::{Error, Result};
use super::{Bank, Transaction};

/// Why an import produced nothing to review
///
/// Each cause is distinct so the caller can say precisely what went wrong.
/// Also used as the per-file failure inside a batch.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FailureReason {
    #[error("Empty or invalid CSV file")]
    EmptyInput,

    /// `diagnostic` describes the unrecognized first row for troubleshooting
    #[error("Could not detect bank format. Supported: {}", bank_names(.supported))]
    NoFormatDetected { supported: Vec<Bank>, diagnostic: String },

    #[error("No valid transactions found ({rejected} rows could not be read)")]
    NoValidRows { rejected: usize },

    #[error("Nothing new to import: all {duplicates} transactions were already imported")]
    AllDuplicates { duplicates: usize },
}

fn bank_names(banks: &[Bank]) -> String {
    banks.iter().map(|b| b.name()).collect::<Vec<_>>().join(", ")
}

/// What happened to one uploaded file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReport {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank: Option<Bank>,
    pub rows_read: usize,
    /// Transactions extracted before any deduplication
    pub accepted: usize,
    pub rejected: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureReason>,
}

impl FileReport {
    pub fn failed(name: impl Into<String>, failure: FailureReason) -> Self {
        Self {
            name: name.into(),
            bank: None,
            rows_read: 0,
            accepted: 0,
            rejected: match &failure {
                FailureReason::NoValidRows { rejected } => *rejected,
                _ => 0,
            },
            failure: Some(failure),
        }
    }
}

/// Result of one import invocation over one or more files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportOutcome {
    /// New transactions, newest first
    pub accepted: Vec<Transaction>,
    /// `None` when the batch mixed banks or nothing was detected
    pub detected_bank: Option<Bank>,
    pub duplicates_in_batch: usize,
    pub duplicates_against_store: usize,
    /// Rows silently skipped because they could not be extracted or dated
    pub rows_rejected: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<FailureReason>,
    pub files: Vec<FileReport>,
}

impl ImportOutcome {
    pub fn is_success(&self) -> bool {
        self.failure_reason.is_none()
    }

    /// Escalate a failed outcome into an error
    pub fn into_result(self) -> Result<Self> {
        match self.failure_reason {
            Some(reason) => Err(Error::Import(reason)),
            None => Ok(self),
        }
    }

    /// Files that were skipped inside an otherwise successful batch
    pub fn skipped_files(&self) -> impl Iterator<Item = &FileReport> {
        self.files.iter().filter(|f| f.failure.is_some())
    }
}
