//! Configuration management
//!
//! Settings live in `settings.json` inside the bankline directory:
//! ```json
//! {
//!   "import": {
//!     "accountId": "everyday",
//!     "fingerprintScheme": "rolling",
//!     "sampleRows": 5,
//!     "delimiter": ",",
//!     "parallel": true,
//!     "fingerprintFile": "fingerprints.txt"
//!   }
//! }
//! ```
//! Keys this crate doesn't manage are kept as-is when saving.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::result::Error;
use crate::domain::FingerprintScheme;

const SETTINGS_FILE: &str = "settings.json";
const DEFAULT_FINGERPRINT_FILE: &str = "fingerprints.txt";
const DEFAULT_SAMPLE_ROWS: usize = 5;

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    import: ImportSection,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImportSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    fingerprint_scheme: Option<FingerprintScheme>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sample_rows: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    delimiter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    parallel: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    fingerprint_file: Option<PathBuf>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

/// Import defaults applied to every run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSettings {
    /// Folded into fingerprints to keep accounts apart
    pub account_id: Option<String>,
    pub fingerprint_scheme: FingerprintScheme,
    /// Leading rows handed to format detection
    pub sample_rows: usize,
    pub delimiter: u8,
    /// Parse the files of a batch on separate threads
    pub parallel: bool,
    /// Relative paths resolve against the bankline directory
    pub fingerprint_file: Option<PathBuf>,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            account_id: None,
            fingerprint_scheme: FingerprintScheme::default(),
            sample_rows: DEFAULT_SAMPLE_ROWS,
            delimiter: b',',
            parallel: true,
            fingerprint_file: None,
        }
    }
}

/// Bankline configuration (simplified view of settings)
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub import: ImportSettings,
    // Keep the raw settings for preservation when saving
    _raw_settings: SettingsFile,
}

impl Config {
    /// Load config from the bankline directory
    ///
    /// `BANKLINE_ACCOUNT_ID` and `BANKLINE_FINGERPRINT_SCHEME` override the
    /// file.
    pub fn load(bankline_dir: &Path) -> Result<Self> {
        Self::load_with_env(bankline_dir, |key| std::env::var(key).ok())
    }

    fn load_with_env(bankline_dir: &Path, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let raw = read_settings(&bankline_dir.join(SETTINGS_FILE))?;
        let section = &raw.import;

        let mut import = ImportSettings {
            account_id: section.account_id.clone().filter(|id| !id.trim().is_empty()),
            fingerprint_scheme: section.fingerprint_scheme.unwrap_or_default(),
            sample_rows: section.sample_rows.unwrap_or(DEFAULT_SAMPLE_ROWS).max(1),
            delimiter: match &section.delimiter {
                Some(d) => parse_delimiter(d)?,
                None => b',',
            },
            parallel: section.parallel.unwrap_or(true),
            fingerprint_file: section.fingerprint_file.clone(),
        };

        if let Some(account_id) = env("BANKLINE_ACCOUNT_ID").filter(|id| !id.trim().is_empty()) {
            import.account_id = Some(account_id);
        }
        if let Some(scheme) = env("BANKLINE_FINGERPRINT_SCHEME") {
            import.fingerprint_scheme = scheme.parse().map_err(Error::config)?;
        }

        Ok(Self {
            import,
            _raw_settings: raw,
        })
    }

    /// Save config to the bankline directory
    /// Preserves other settings that bankline doesn't manage
    pub fn save(&self, bankline_dir: &Path) -> Result<()> {
        let settings_path = bankline_dir.join(SETTINGS_FILE);

        // Load existing settings to preserve fields we don't manage
        let mut settings = read_settings(&settings_path)?;

        let import = &self.import;
        let section = &mut settings.import;
        section.account_id = import.account_id.clone();
        section.fingerprint_scheme = Some(import.fingerprint_scheme);
        section.sample_rows = Some(import.sample_rows);
        section.delimiter = Some(char::from(import.delimiter).to_string());
        section.parallel = Some(import.parallel);
        section.fingerprint_file = import.fingerprint_file.clone();

        std::fs::create_dir_all(bankline_dir)?;
        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(&settings_path, content)?;
        Ok(())
    }

    /// Where accepted fingerprints are read from and recorded to
    pub fn fingerprint_path(&self, bankline_dir: &Path) -> PathBuf {
        match &self.import.fingerprint_file {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => bankline_dir.join(path),
            None => bankline_dir.join(DEFAULT_FINGERPRINT_FILE),
        }
    }
}

fn read_settings(path: &Path) -> Result<SettingsFile> {
    if !path.exists() {
        return Ok(SettingsFile::default());
    }
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content).unwrap_or_else(|e| {
        warn!(path = %path.display(), error = %e, "Ignoring unreadable settings file");
        SettingsFile::default()
    }))
}

/// Single ASCII delimiter; `tab` and `\t` mean a tab
fn parse_delimiter(value: &str) -> Result<u8> {
    match value {
        "tab" | "\\t" | "\t" => return Ok(b'\t'),
        _ => {}
    }
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii() => Ok(c as u8),
        _ => Err(Error::config(format!(
            "invalid delimiter {:?}: expected a single ASCII character",
            value
        ))
        .into()),
    }
}
