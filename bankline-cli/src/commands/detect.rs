//! Detect command - show which bank produced a statement

use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use super::{get_context, read_statement};
use crate::output;
use bankline_core::{Error, FailureReason, OperationResult};

pub fn run(file: &Path, json: bool) -> Result<()> {
    let ctx = get_context(None)?;
    let text = read_statement(file)?;
    let detection = ctx.import_service.detect(&text);

    if json {
        let result: OperationResult<_> = detection.clone().map_err(Error::from).into();
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        match &detection {
            Ok(found) => {
                output::success(&format!("{} ({})", found.bank.name(), found.bank.code()));
                println!("  Header row: {}", if found.has_header { "yes" } else { "no" });
                println!("  Columns: {}", found.columns);
            }
            Err(FailureReason::NoFormatDetected { diagnostic, .. }) => {
                println!("  {}", diagnostic.dimmed());
            }
            Err(_) => {}
        }
    }

    detection.map_err(Error::from)?;
    Ok(())
}
