//! Global price settings for the three precious metals.

use crate::domain::Decimal;
use serde::{Deserialize, Serialize};

/// Current price per gram for each metal, in currency units.
///
/// A process-wide singleton in storage, mutated only by the administrative
/// settings update. The calculation engine always receives a fully populated
/// snapshot; a missing or partial settings row is an error at the load
/// boundary, never a zero default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceSettings {
    pub price_per_g_pt: Decimal,
    pub price_per_g_pd: Decimal,
    pub price_per_g_rh: Decimal,
}

impl PriceSettings {
    pub fn new(price_per_g_pt: Decimal, price_per_g_pd: Decimal, price_per_g_rh: Decimal) -> Self {
        PriceSettings {
            price_per_g_pt,
            price_per_g_pd,
            price_per_g_rh,
        }
    }

    /// Returns true if any price is negative. Used by the write boundary;
    /// the engine itself never validates.
    pub fn has_negative_price(&self) -> bool {
        self.price_per_g_pt.is_negative()
            || self.price_per_g_pd.is_negative()
            || self.price_per_g_rh.is_negative()
    }
}
