//! Fingerprint source port - the store's view of what was already imported

use std::collections::HashSet;

use crate::domain::result::Result;

/// Read access to the fingerprints of every non-deleted stored transaction
///
/// The import engine only reads through this port; persisting accepted
/// transactions is the caller's business.
pub trait FingerprintSource: Send + Sync {
    fn existing_fingerprints(&self) -> Result<HashSet<String>>;
}
