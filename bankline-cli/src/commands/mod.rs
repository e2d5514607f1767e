//! CLI command implementations

pub mod banks;
pub mod categories;
pub mod detect;
pub mod import;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bankline_core::config::Config;
use bankline_core::BanklineContext;

/// Get the bankline directory from environment or default
pub fn get_bankline_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("BANKLINE_DIR") {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .map(|home| home.join(".bankline"))
        .context("Could not find home directory; set BANKLINE_DIR")
}

/// Get bankline context, optionally reading stored fingerprints from `existing`
pub fn get_context(existing: Option<&Path>) -> Result<BanklineContext> {
    let bankline_dir = get_bankline_dir()?;

    // Create directory if it doesn't exist
    std::fs::create_dir_all(&bankline_dir)
        .with_context(|| format!("Failed to create bankline directory: {:?}", bankline_dir))?;

    let config = Config::load(&bankline_dir).context("Failed to load settings")?;
    BanklineContext::with_fingerprint_file(&bankline_dir, config, existing)
        .context("Failed to initialize bankline context")
}

/// Read a statement file as text; invalid UTF-8 is replaced rather than rejected
pub fn read_statement(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
