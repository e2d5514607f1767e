//! Statement parsing
//!
//! Turns raw CSV text into normalized rows: tokenizing, detecting the bank
//! dialect, extracting fields and normalizing dates and amounts. Everything
//! here is pure and safe to call from any thread.

mod commbank;
mod dates;
mod format;
mod nab;
mod tokenizer;
mod values;

pub use dates::parse_date;
pub use format::{
    detect_format, detect_or_diagnose, diagnose, supported_banks, BankFormat, REGISTRY,
};
pub use tokenizer::{tokenize, Tokenizer};
pub use values::{looks_like_amount, looks_like_date, parse_amount};
