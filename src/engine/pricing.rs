//! Unified catalyst calculation.
//!
//! Turns raw catalog records plus the current price settings into computed
//! entries. Pure and synchronous: no I/O, no clock, no randomness, so two
//! calls with identical inputs produce identical output.

use crate::domain::{CatalystRecord, ComputedCatalystEntry, Decimal, PriceSettings};

/// Grams of a metal contained in `weight_g` grams of substrate at `ppm`
/// concentration. ppm means grams of metal per million grams of substrate.
fn metal_grams(weight_g: Decimal, ppm: Decimal) -> Decimal {
    weight_g * ppm / Decimal::million()
}

/// Compute one entry from a record and a settings snapshot.
///
/// When the record carries a manual override the override is authoritative:
/// its values are copied verbatim and nothing is derived. Otherwise metal
/// content is derived from the ceramic weight and ppm concentrations, and the
/// total price from the per-gram settings.
///
/// Inputs are not validated here. Negative weights or concentrations are a
/// data-quality problem for the write boundary; this function propagates
/// whatever it is given.
pub fn compute_entry(record: &CatalystRecord, settings: &PriceSettings) -> ComputedCatalystEntry {
    let (weight_g, pt_g, pd_g, rh_g, total_price, is_override) = match &record.r#override {
        Some(o) => (o.weight_g, o.pt_g, o.pd_g, o.rh_g, o.total_price, true),
        None => {
            let pt_g = metal_grams(record.ceramic_weight_g, record.pt_ppm);
            let pd_g = metal_grams(record.ceramic_weight_g, record.pd_ppm);
            let rh_g = metal_grams(record.ceramic_weight_g, record.rh_ppm);
            let total_price = pt_g * settings.price_per_g_pt
                + pd_g * settings.price_per_g_pd
                + rh_g * settings.price_per_g_rh;
            (record.ceramic_weight_g, pt_g, pd_g, rh_g, total_price, false)
        }
    };

    ComputedCatalystEntry {
        catalyst_id: record.catalyst_id.clone(),
        name: record.name.clone(),
        add_info: record.add_info.clone().unwrap_or_default(),
        weight_g,
        pt_g,
        pd_g,
        rh_g,
        total_price,
        is_override,
    }
}

/// Compute entries for a whole catalog, one per record, in input order.
pub fn compute_all_entries(
    records: &[CatalystRecord],
    settings: &PriceSettings,
) -> Vec<ComputedCatalystEntry> {
    records
        .iter()
        .map(|record| compute_entry(record, settings))
        .collect()
}
