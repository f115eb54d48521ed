//! Domain types for the catalyst pricing service.
//!
//! This module provides:
//! - Lossless numeric handling via the Decimal wrapper
//! - The CatalystId primitive
//! - CatalystRecord / ManualOverride / ComputedCatalystEntry
//! - PriceSettings, the per-gram metal price snapshot

pub mod catalyst;
pub mod decimal;
pub mod primitives;
pub mod settings;

pub use catalyst::{CatalystRecord, ComputedCatalystEntry, ManualOverride};
pub use decimal::Decimal;
pub use primitives::CatalystId;
pub use settings::PriceSettings;
