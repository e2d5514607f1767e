//! Bankline CLI - Bank statement import in your terminal

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{banks, categories, detect, import};

/// Bankline - import bank CSV statements
#[derive(Parser)]
#[command(name = "bl", version, about, long_about = None)]
struct Cli {
    /// Log pipeline progress to stderr (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import transactions from bank CSV statements
    Import {
        /// Statement files (reads stdin when omitted)
        files: Vec<PathBuf>,
        /// Account ID folded into fingerprints
        #[arg(long, env = "BANKLINE_ACCOUNT_ID")]
        account_id: Option<String>,
        /// Fingerprint file of already-imported transactions
        #[arg(long)]
        existing: Option<PathBuf>,
        /// Append accepted fingerprints to the fingerprint file
        #[arg(long)]
        record: bool,
        /// Remember --account-id and the fingerprint file in settings.json
        #[arg(long)]
        save_defaults: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Detect which bank produced a statement
    Detect {
        /// Statement file
        file: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List supported banks
    Banks {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List transaction categories
    Categories {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let result = run(cli);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so `--json` output stays clean
///
/// `-v` wins over `BANKLINE_LOG` / `RUST_LOG`.
fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => std::env::var("BANKLINE_LOG")
            .ok()
            .and_then(|directives| EnvFilter::try_new(directives).ok())
            .or_else(|| EnvFilter::try_from_default_env().ok())
            .unwrap_or_else(|| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Import {
            files,
            account_id,
            existing,
            record,
            save_defaults,
            json,
        } => import::run(files, account_id, existing, record, save_defaults, json),
        Commands::Detect { file, json } => detect::run(&file, json),
        Commands::Banks { json } => banks::run(json),
        Commands::Categories { json } => categories::run(json),
    }
}
