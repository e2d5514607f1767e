//! Import service - bank statement import pipeline
//!
//! Per file: tokenize, detect the bank format, skip the header, extract and
//! validate rows, then clean, categorize and fingerprint each one. A batch
//! merges the per-file results in input order, drops fingerprints the store
//! already holds, drops repeats within the batch and sorts newest first.

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use serde::Serialize;
use tracing::{debug, info, warn};

use super::category::guess_category;
use crate::config::ImportSettings;
use crate::domain::result::Result;
use crate::domain::{
    Bank, FailureReason, FileReport, FingerprintScheme, ImportOutcome, RawRow, Transaction,
};
use crate::ports::FingerprintSource;
use crate::statement::{detect_or_diagnose, parse_date, Tokenizer};

// Rejected rows logged per file before going quiet
const LOGGED_REJECTS: usize = 3;

/// Options for one import run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOptions {
    /// Folded into fingerprints to keep accounts apart
    pub account_id: Option<String>,
    pub scheme: FingerprintScheme,
    /// Leading rows handed to format detection
    pub sample_rows: usize,
    pub delimiter: u8,
    /// Parse files on scoped threads when the batch has more than one
    pub parallel: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        ImportOptions::from(&ImportSettings::default())
    }
}

impl From<&ImportSettings> for ImportOptions {
    fn from(settings: &ImportSettings) -> Self {
        Self {
            account_id: settings.account_id.clone(),
            scheme: settings.fingerprint_scheme,
            sample_rows: settings.sample_rows,
            delimiter: settings.delimiter,
            parallel: settings.parallel,
        }
    }
}

/// One uploaded statement; reading it is the caller's job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementFile {
    pub name: String,
    pub text: String,
}

impl StatementFile {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// Transactions read from one statement, in row order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedStatement {
    pub bank: Bank,
    pub had_header: bool,
    /// Data rows after the header
    pub rows_read: usize,
    /// Rows the format could not extract
    pub rows_rejected: usize,
    /// Extracted rows whose date is not a real calendar date
    pub invalid_dates: usize,
    pub transactions: Vec<Transaction>,
}

impl ParsedStatement {
    pub fn rejected(&self) -> usize {
        self.rows_rejected + self.invalid_dates
    }
}

/// Format detected for a statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Detection {
    pub bank: Bank,
    pub has_header: bool,
    /// Column count of the first row
    pub columns: usize,
}

fn sample(tokenizer: &Tokenizer<'_>, options: &ImportOptions) -> Vec<RawRow> {
    tokenizer.rows().take(options.sample_rows.max(1)).collect()
}

/// Detect the format of a statement without extracting anything
pub fn detect_statement(
    text: &str,
    options: &ImportOptions,
) -> std::result::Result<Detection, FailureReason> {
    let tokenizer = Tokenizer::new(text).with_delimiter(options.delimiter);
    let sample = sample(&tokenizer, options);
    if sample.is_empty() {
        return Err(FailureReason::EmptyInput);
    }

    let format = detect_or_diagnose(&sample)?;
    Ok(Detection {
        bank: format.bank(),
        has_header: format.has_header(&sample),
        columns: sample[0].len(),
    })
}

/// Run the per-file pipeline over one statement
pub fn parse_statement(
    text: &str,
    options: &ImportOptions,
) -> std::result::Result<ParsedStatement, FailureReason> {
    let tokenizer = Tokenizer::new(text).with_delimiter(options.delimiter);
    let sample = sample(&tokenizer, options);
    if sample.is_empty() {
        return Err(FailureReason::EmptyInput);
    }

    let format = detect_or_diagnose(&sample).map_err(|reason| {
        if let FailureReason::NoFormatDetected { diagnostic, .. } = &reason {
            debug!(%diagnostic, "No bank format matched");
        }
        reason
    })?;
    let bank = format.bank();
    let had_header = format.has_header(&sample);
    debug!(%bank, had_header, "Detected bank format");

    let mut parsed = ParsedStatement {
        bank,
        had_header,
        rows_read: 0,
        rows_rejected: 0,
        invalid_dates: 0,
        transactions: Vec::new(),
    };

    for (index, raw) in tokenizer.rows().skip(usize::from(had_header)).enumerate() {
        parsed.rows_read += 1;

        let Some(row) = format.extract_row(&raw) else {
            parsed.rows_rejected += 1;
            if parsed.rows_rejected <= LOGGED_REJECTS {
                debug!(row = index, columns = raw.len(), "Rejected row");
            }
            continue;
        };

        let Some(date) = parse_date(&row.date_string) else {
            parsed.invalid_dates += 1;
            debug!(row = index, date = %row.date_string, "Rejected row with invalid date");
            continue;
        };

        let description = format.clean_description(&row.description);
        let category = guess_category(&row.description);
        let fingerprint = options.scheme.fingerprint(
            &row.date_string,
            row.amount,
            &row.description,
            bank,
            options.account_id.as_deref(),
        );

        parsed
            .transactions
            .push(Transaction::new(fingerprint, date, row, description, bank, category));
    }

    debug!(
        %bank,
        rows = parsed.rows_read,
        accepted = parsed.transactions.len(),
        rejected = parsed.rejected(),
        "Parsed statement"
    );

    if parsed.transactions.is_empty() {
        return Err(FailureReason::NoValidRows {
            rejected: parsed.rejected(),
        });
    }

    Ok(parsed)
}

fn parse_all(
    files: &[StatementFile],
    options: &ImportOptions,
) -> Vec<std::result::Result<ParsedStatement, FailureReason>> {
    if !options.parallel || files.len() < 2 {
        return files.iter().map(|f| parse_statement(&f.text, options)).collect();
    }

    thread::scope(|scope| {
        let handles: Vec<_> = files
            .iter()
            .map(|f| scope.spawn(move || parse_statement(&f.text, options)))
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic)))
            .collect()
    })
}

/// Run the batch pipeline over `files`
///
/// `existing` holds the fingerprints already in the store. A file that fails
/// is reported in [`ImportOutcome::files`] and skipped; the outcome only
/// carries a failure reason when nothing was extracted at all, or when
/// everything extracted was a duplicate.
pub fn import_batch(
    files: &[StatementFile],
    existing: &HashSet<String>,
    options: &ImportOptions,
) -> ImportOutcome {
    let results = parse_all(files, options);

    let mut reports = Vec::with_capacity(files.len());
    let mut merged: Vec<Transaction> = Vec::new();
    let mut banks: Vec<Bank> = Vec::new();
    let mut rows_rejected = 0;
    let mut first_failure: Option<FailureReason> = None;

    for (file, result) in files.iter().zip(results) {
        match result {
            Ok(parsed) => {
                rows_rejected += parsed.rejected();
                if !banks.contains(&parsed.bank) {
                    banks.push(parsed.bank);
                }
                reports.push(FileReport {
                    name: file.name.clone(),
                    bank: Some(parsed.bank),
                    rows_read: parsed.rows_read,
                    accepted: parsed.transactions.len(),
                    rejected: parsed.rejected(),
                    failure: None,
                });
                merged.extend(parsed.transactions);
            }
            Err(reason) => {
                warn!(file = %file.name, %reason, "Skipping statement");
                let report = FileReport::failed(file.name.clone(), reason.clone());
                rows_rejected += report.rejected;
                reports.push(report);
                first_failure.get_or_insert(reason);
            }
        }
    }

    let detected_bank = match banks.as_slice() {
        [bank] => Some(*bank),
        _ => None,
    };

    let extracted = merged.len();
    merged.retain(|t| !existing.contains(&t.fingerprint));
    let duplicates_against_store = extracted - merged.len();

    let mut seen = HashSet::with_capacity(merged.len());
    merged.retain(|t| seen.insert(t.fingerprint.clone()));
    let duplicates_in_batch = extracted - duplicates_against_store - merged.len();

    merged.sort_by(|a, b| b.date.cmp(&a.date));

    let failure_reason = if extracted == 0 {
        Some(first_failure.unwrap_or(FailureReason::EmptyInput))
    } else if merged.is_empty() {
        Some(FailureReason::AllDuplicates {
            duplicates: duplicates_against_store + duplicates_in_batch,
        })
    } else {
        None
    };

    info!(
        files = files.len(),
        accepted = merged.len(),
        duplicates_in_batch,
        duplicates_against_store,
        rows_rejected,
        "Import batch complete"
    );

    ImportOutcome {
        accepted: merged,
        detected_bank,
        duplicates_in_batch,
        duplicates_against_store,
        rows_rejected,
        failure_reason,
        files: reports,
    }
}

/// Import service for bank statements
pub struct ImportService {
    settings: ImportSettings,
    fingerprints: Arc<dyn FingerprintSource>,
}

impl ImportService {
    pub fn new(settings: ImportSettings, fingerprints: Arc<dyn FingerprintSource>) -> Self {
        Self { settings, fingerprints }
    }

    pub fn settings(&self) -> &ImportSettings {
        &self.settings
    }

    fn options(&self, account_id: Option<&str>) -> ImportOptions {
        let mut options = ImportOptions::from(&self.settings);
        if let Some(account_id) = account_id {
            options.account_id = Some(account_id.to_string());
        }
        options
    }

    /// Import a batch, deduplicating against the store's fingerprints
    ///
    /// `account_id` overrides the configured one.
    pub fn import(
        &self,
        files: &[StatementFile],
        account_id: Option<&str>,
    ) -> Result<ImportOutcome> {
        let existing = self.fingerprints.existing_fingerprints()?;
        debug!(existing = existing.len(), "Loaded stored fingerprints");
        Ok(import_batch(files, &existing, &self.options(account_id)))
    }

    /// Parse one statement without checking the store
    pub fn preview(&self, text: &str) -> ImportOutcome {
        let file = StatementFile::new("preview", text);
        import_batch(std::slice::from_ref(&file), &HashSet::new(), &self.options(None))
    }

    /// Which bank a statement came from, or why that couldn't be told
    pub fn detect(&self, text: &str) -> std::result::Result<Detection, FailureReason> {
        detect_statement(text, &self.options(None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryFingerprintStore;
    use crate::domain::Category;
    use rust_decimal_macros::dec;

    const COMMBANK: &str = "30/06/2025,-4.24,Direct Debit PAYPAL AUSTRALIA,1234.56\n\
                            01/07/2025,-85.10,EFTPOS WOOLWORTHS 1234 PERTH AU,1149.46\n\
                            29/06/2025,2500.00,SALARY ACME PTY LTD,1238.80\n";

    const NAB: &str = "Date,Amount,Account Number,,Transaction Type,\
                       Transaction Details,Balance,Category,Merchant Name\n\
                       12-Dec-25,-20.00,123456789,,EFTPOS,BP NORTHBRIDGE,500.00,Fuel,BP\n\
                       13 Dec 25,-9.99,123456789,,DEBIT,NETFLIX.COM,490.01,Entertainment,Netflix\n";

    fn sequential() -> ImportOptions {
        ImportOptions {
            parallel: false,
            ..ImportOptions::default()
        }
    }

    #[test]
    fn test_parse_commbank_statement() {
        let parsed = parse_statement(COMMBANK, &sequential()).unwrap();
        assert_eq!(parsed.bank, Bank::CommBank);
        assert!(!parsed.had_header);
        assert_eq!(parsed.rows_read, 3);
        assert_eq!(parsed.rejected(), 0);

        let first = &parsed.transactions[0];
        assert_eq!(first.amount, dec!(-4.24));
        assert_eq!(first.description, "PAYPAL AUSTRALIA");
        assert_eq!(first.raw_description, "Direct Debit PAYPAL AUSTRALIA");
        assert!(!first.is_income);

        assert_eq!(parsed.transactions[1].suggested_category, Category::Groceries);
        assert!(parsed.transactions[2].is_income);
    }

    #[test]
    fn test_parse_nab_statement_skips_header() {
        let parsed = parse_statement(NAB, &sequential()).unwrap();
        assert_eq!(parsed.bank, Bank::Nab);
        assert!(parsed.had_header);
        assert_eq!(parsed.rows_read, 2);
        assert_eq!(parsed.transactions.len(), 2);
        assert_eq!(parsed.transactions[0].suggested_category, Category::Fuel);
        assert_eq!(parsed.transactions[1].suggested_category, Category::Subscriptions);
    }

    #[test]
    fn test_parse_counts_rejects() {
        let text = "30/06/2025,-4.24,PAYPAL,1.00\n30/06/2025,oops,PAYPAL,1.00\nshort,row\n";
        let parsed = parse_statement(text, &sequential()).unwrap();
        assert_eq!(parsed.transactions.len(), 1);
        assert_eq!(parsed.rows_rejected, 2);
    }

    #[test]
    fn test_parse_failures() {
        assert_eq!(parse_statement("", &sequential()), Err(FailureReason::EmptyInput));
        assert!(matches!(
            parse_statement("just some text", &sequential()),
            Err(FailureReason::NoFormatDetected { .. })
        ));
        let partly_bad = "30/06/2025,-4.24,PAYPAL\n30/06/2025,bad,PAYPAL\n01/07/2025,,X\n";
        assert_eq!(
            parse_statement(partly_bad, &sequential()).map(|p| p.transactions.len()),
            Ok(1)
        );
    }

    #[test]
    fn test_account_id_changes_fingerprints() {
        let plain = parse_statement(COMMBANK, &sequential()).unwrap();
        let scoped = parse_statement(
            COMMBANK,
            &ImportOptions {
                account_id: Some("everyday".to_string()),
                ..sequential()
            },
        )
        .unwrap();
        assert_ne!(plain.transactions[0].fingerprint, scoped.transactions[0].fingerprint);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let files = vec![
            StatementFile::new("cba.csv", COMMBANK),
            StatementFile::new("nab.csv", NAB),
            StatementFile::new("junk.csv", "nothing useful"),
        ];
        let parallel = ImportOptions {
            parallel: true,
            ..ImportOptions::default()
        };
        assert_eq!(
            import_batch(&files, &HashSet::new(), &parallel),
            import_batch(&files, &HashSet::new(), &sequential())
        );
    }

    #[test]
    fn test_empty_batch() {
        let outcome = import_batch(&[], &HashSet::new(), &sequential());
        assert_eq!(outcome.failure_reason, Some(FailureReason::EmptyInput));
        assert!(outcome.files.is_empty());
    }

    #[test]
    fn test_service_uses_store() {
        let first = parse_statement(COMMBANK, &sequential()).unwrap();
        let store = Arc::new(MemoryFingerprintStore::with_fingerprints([first.transactions[0]
            .fingerprint
            .clone()]));
        let service = ImportService::new(ImportSettings::default(), store);

        let outcome = service
            .import(&[StatementFile::new("cba.csv", COMMBANK)], None)
            .unwrap();
        assert_eq!(outcome.accepted.len(), 2);
        assert_eq!(outcome.duplicates_against_store, 1);

        // Preview ignores the store
        assert_eq!(service.preview(COMMBANK).accepted.len(), 3);
    }

    #[test]
    fn test_service_detect() {
        let store = Arc::new(MemoryFingerprintStore::new());
        let service = ImportService::new(ImportSettings::default(), store);
        let detection = service.detect(NAB).unwrap();
        assert_eq!(detection.bank, Bank::Nab);
        assert!(detection.has_header);
        assert_eq!(detection.columns, 9);

        assert_eq!(service.detect("  \n"), Err(FailureReason::EmptyInput));
    }
}
