//! Domain primitives.

use serde::{Deserialize, Serialize};

/// Stable external identifier of a catalyst (e.g. the manufacturer reference
/// code printed on the housing). Unique across the catalog.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CatalystId(pub String);

impl CatalystId {
    /// Create a CatalystId from a string.
    pub fn new(id: String) -> Self {
        CatalystId(id)
    }

    /// Get the identifier as a string reference.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CatalystId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
