//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - In-memory set for the FingerprintSource port
//! - Newline-delimited file for the FingerprintSource port

pub mod file;
pub mod memory;

pub use file::FileFingerprintStore;
pub use memory::MemoryFingerprintStore;
