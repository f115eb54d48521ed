//! Catalyst record types: the raw catalog entry and the computed entry
//! derived from it.

use crate::domain::{CatalystId, Decimal};
use serde::{Deserialize, Serialize};

/// A raw catalog entry as written by the administrative import.
///
/// Read-only to every other consumer. Numeric fields are assumed
/// non-negative; the import boundary enforces this at write time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalystRecord {
    /// Stable unique identifier.
    pub catalyst_id: CatalystId,
    /// Display name.
    pub name: String,
    /// Grams of ceramic substrate.
    pub ceramic_weight_g: Decimal,
    /// Platinum concentration, grams per million grams of substrate.
    pub pt_ppm: Decimal,
    /// Palladium concentration.
    pub pd_ppm: Decimal,
    /// Rhodium concentration.
    pub rh_ppm: Decimal,
    /// Optional free text. Absent on legacy records; absence is not an error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_info: Option<String>,
    /// Manual replacement for the derived weight/content/price. When present
    /// it is authoritative for the whole record, never blended with derived
    /// values.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r#override: Option<ManualOverride>,
}

/// Administrator-supplied replacement values for one record.
///
/// All five fields are required; a partial override is unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualOverride {
    pub weight_g: Decimal,
    pub pt_g: Decimal,
    pub pd_g: Decimal,
    pub rh_g: Decimal,
    pub total_price: Decimal,
}

impl CatalystRecord {
    /// Create a record with no free text and no override.
    pub fn new(
        catalyst_id: CatalystId,
        name: String,
        ceramic_weight_g: Decimal,
        pt_ppm: Decimal,
        pd_ppm: Decimal,
        rh_ppm: Decimal,
    ) -> Self {
        CatalystRecord {
            catalyst_id,
            name,
            ceramic_weight_g,
            pt_ppm,
            pd_ppm,
            rh_ppm,
            add_info: None,
            r#override: None,
        }
    }

    /// Attach free text.
    pub fn with_add_info(mut self, add_info: String) -> Self {
        self.add_info = Some(add_info);
        self
    }

    /// Attach a manual override.
    pub fn with_override(mut self, r#override: ManualOverride) -> Self {
        self.r#override = Some(r#override);
        self
    }
}

/// One computed catalog entry, ready for display, search and
/// listing-creation consumption. Derived on every read, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputedCatalystEntry {
    pub catalyst_id: CatalystId,
    pub name: String,
    /// Free text; empty string when the record has none.
    pub add_info: String,
    /// Override weight when overridden, else the ceramic weight.
    pub weight_g: Decimal,
    pub pt_g: Decimal,
    pub pd_g: Decimal,
    pub rh_g: Decimal,
    pub total_price: Decimal,
    /// True iff the manual override was applied. The only signal consumers
    /// get; an overridden zero price looks exactly like a derived zero.
    pub is_override: bool,
}
