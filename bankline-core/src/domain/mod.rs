//! Core domain entities
//!
//! All business entities are defined here. These are pure data structures
//! with no I/O.

mod bank;
mod category;
mod fingerprint;
mod outcome;
mod transaction;
pub mod result;

pub use bank::Bank;
pub use category::Category;
pub use fingerprint::FingerprintScheme;
pub use outcome::{FailureReason, FileReport, ImportOutcome};
pub use transaction::{NormalizedRow, RawRow, Transaction};
