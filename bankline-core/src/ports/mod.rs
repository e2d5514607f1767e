//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external dependencies. The core domain
//! depends only on these traits, not on concrete implementations.

mod fingerprint_source;

pub use fingerprint_source::FingerprintSource;
