//! Import command - import transactions from bank CSV statements

use std::io::Read;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use colored::Colorize;
use tracing::debug;

use super::{get_context, read_statement};
use crate::output;
use bankline_core::{FailureReason, ImportOutcome, StatementFile};

const STDIN_NAME: &str = "<stdin>";

pub fn run(
    files: Vec<PathBuf>,
    account_id: Option<String>,
    existing: Option<PathBuf>,
    record: bool,
    save_defaults: bool,
    json: bool,
) -> Result<()> {
    let mut ctx = get_context(existing.as_deref())?;
    let statements = load_statements(&files)?;

    let outcome = ctx
        .import_service
        .import(&statements, account_id.as_deref())
        .context("Failed to read stored fingerprints")?;

    let recorded = if record && outcome.is_success() {
        Some(ctx.fingerprint_store.record(&outcome.accepted)?)
    } else {
        None
    };

    if save_defaults && outcome.is_success() {
        ctx.save_import_defaults(account_id.as_deref())
            .context("Failed to save import defaults")?;
        debug!(dir = %ctx.bankline_dir.display(), "Saved import defaults");
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print_outcome(&outcome);
        if let Some(count) = recorded {
            output::info(&format!(
                "Recorded {} fingerprints to {}",
                count,
                ctx.fingerprint_store.path().display()
            ));
        }
    }

    outcome.into_result()?;
    Ok(())
}

fn load_statements(files: &[PathBuf]) -> Result<Vec<StatementFile>> {
    if files.is_empty() {
        if atty::is(atty::Stream::Stdin) {
            bail!("No statement files given (pass file paths or pipe a CSV on stdin)");
        }
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read statement from stdin")?;
        debug!(bytes = text.len(), "Read statement from stdin");
        return Ok(vec![StatementFile::new(STDIN_NAME, text)]);
    }

    files
        .iter()
        .map(|path| {
            let text = read_statement(path)?;
            debug!(file = %path.display(), bytes = text.len(), "Read statement");
            Ok(StatementFile::new(path.display().to_string(), text))
        })
        .collect()
}

fn print_outcome(outcome: &ImportOutcome) {
    let batch = outcome.files.len() > 1;
    for file in outcome.skipped_files() {
        if let Some(reason) = &file.failure {
            if batch {
                output::warning(&format!("Skipped {}: {}", file.name, reason));
            }
            if let FailureReason::NoFormatDetected { diagnostic, .. } = reason {
                println!("  {}", diagnostic.dimmed());
            }
        }
    }

    if !outcome.is_success() {
        return;
    }

    println!("{}", output::transaction_table(&outcome.accepted));
    println!();

    let bank = outcome
        .detected_bank
        .map(|b| b.name().to_string())
        .unwrap_or_else(|| "Mixed".to_string());
    output::success(&format!("{} new transactions ({})", outcome.accepted.len(), bank));

    if outcome.duplicates_against_store > 0 {
        println!("  Already imported: {}", outcome.duplicates_against_store);
    }
    if outcome.duplicates_in_batch > 0 {
        println!("  Repeated in this batch: {}", outcome.duplicates_in_batch);
    }
    if outcome.rows_rejected > 0 {
        println!("  {} {}", "Unreadable rows skipped:".yellow(), outcome.rows_rejected);
    }
}
