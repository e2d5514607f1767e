//! Bankline Core - Bank statement import engine
//!
//! Reads CSV statements exported by Australian banks, works out which bank
//! produced them, and turns their rows into normalized, categorized and
//! deduplicated transactions ready for review.
//!
//! - **domain**: Core entities (Transaction, Bank, Category, ImportOutcome)
//! - **statement**: Tokenizing, format detection, date and amount parsing
//! - **ports**: Trait definitions for external dependencies (FingerprintSource)
//! - **services**: Category guessing and the import pipeline
//! - **adapters**: Concrete fingerprint stores (memory, file)

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;
pub mod statement;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;

use adapters::FileFingerprintStore;
use config::Config;
use services::ImportService;

// Re-export commonly used types at crate root
pub use domain::result::{Error, OperationResult};
pub use domain::{
    Bank, Category, FailureReason, FileReport, FingerprintScheme, ImportOutcome, Transaction,
};
pub use services::{import_batch, parse_statement, ImportOptions, StatementFile};

/// Main context for Bankline operations
///
/// Holds the configuration, the fingerprint store and the import service.
pub struct BanklineContext {
    pub bankline_dir: PathBuf,
    pub config: Config,
    pub fingerprint_store: Arc<FileFingerprintStore>,
    pub import_service: ImportService,
}

impl BanklineContext {
    /// Create a new Bankline context
    pub fn new(bankline_dir: &Path) -> Result<Self> {
        let config = Config::load(bankline_dir)?;
        Self::with_fingerprint_file(bankline_dir, config, None)
    }

    /// Create a context reading stored fingerprints from `fingerprint_file`
    /// instead of the configured one
    pub fn with_fingerprint_file(
        bankline_dir: &Path,
        config: Config,
        fingerprint_file: Option<&Path>,
    ) -> Result<Self> {
        let path = match fingerprint_file {
            Some(path) => path.to_path_buf(),
            None => config.fingerprint_path(bankline_dir),
        };
        let fingerprint_store = Arc::new(FileFingerprintStore::new(path));
        let import_service = ImportService::new(config.import.clone(), fingerprint_store.clone());

        Ok(Self {
            bankline_dir: bankline_dir.to_path_buf(),
            config,
            fingerprint_store,
            import_service,
        })
    }

    /// Persist `account_id` and the active fingerprint file as the defaults
    /// for later runs
    pub fn save_import_defaults(&mut self, account_id: Option<&str>) -> Result<()> {
        if let Some(account_id) = account_id {
            self.config.import.account_id = Some(account_id.to_string());
        }
        let path = self.fingerprint_store.path();
        let relative = path.strip_prefix(&self.bankline_dir).unwrap_or(path);
        self.config.import.fingerprint_file = Some(relative.to_path_buf());
        self.config.save(&self.bankline_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_save_import_defaults_round_trip() {
        let dir = tempdir().unwrap();
        let elsewhere = tempdir().unwrap();
        let seen = elsewhere.path().join("seen.txt");

        let config = Config::load(dir.path()).unwrap();
        let mut ctx =
            BanklineContext::with_fingerprint_file(dir.path(), config, Some(&seen)).unwrap();
        ctx.save_import_defaults(Some("everyday")).unwrap();

        let reloaded = BanklineContext::new(dir.path()).unwrap();
        assert_eq!(reloaded.config.import.account_id.as_deref(), Some("everyday"));
        assert_eq!(reloaded.fingerprint_store.path(), seen.as_path());
    }

    #[test]
    fn test_default_fingerprint_file_saved_relative() {
        let dir = tempdir().unwrap();
        let mut ctx = BanklineContext::new(dir.path()).unwrap();
        ctx.save_import_defaults(None).unwrap();

        assert_eq!(ctx.config.import.account_id, None);
        assert_eq!(
            ctx.config.import.fingerprint_file.as_deref(),
            Some(Path::new("fingerprints.txt"))
        );
    }
}
