//! Pure computation engine for catalog pricing.

pub mod pricing;

pub use pricing::{compute_all_entries, compute_entry};
