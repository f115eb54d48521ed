//! CSV catalog parsing for the administrative bulk import.
//!
//! The import is the write boundary of the catalyst store, so this is where
//! data quality is enforced: non-negative numbers, all-or-nothing overrides,
//! unique identifiers. Anything that fails rejects the whole upload; imports
//! are atomic.

use crate::domain::{CatalystId, CatalystRecord, Decimal, ManualOverride};
use serde::Deserialize;
use std::collections::HashSet;
use std::str::FromStr;
use thiserror::Error;

/// Import validation or parse failure. Carries the 1-based CSV line number
/// (header is line 1) so administrators can find the offending row.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),
    #[error("catalog upload contains no records")]
    Empty,
    #[error("line {line}: {reason}")]
    Row { line: u64, reason: String },
}

/// One CSV row as uploaded. Optional columns default to empty so legacy
/// exports without override columns still import.
#[derive(Debug, Deserialize)]
struct RawCatalogRow {
    catalyst_id: String,
    name: String,
    ceramic_weight_g: String,
    pt_ppm: String,
    pd_ppm: String,
    rh_ppm: String,
    #[serde(default)]
    add_info: String,
    #[serde(default)]
    override_weight_g: String,
    #[serde(default)]
    override_pt_g: String,
    #[serde(default)]
    override_pd_g: String,
    #[serde(default)]
    override_rh_g: String,
    #[serde(default)]
    override_total_price: String,
}

/// Parse and validate an uploaded catalog.
///
/// # Errors
/// Returns the first offense found: malformed CSV, an invalid row, a
/// duplicate identifier, or an upload with no data rows.
pub fn parse_catalog_csv(bytes: &[u8]) -> Result<Vec<CatalystRecord>, ImportError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let mut records = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for (idx, row) in rdr.deserialize::<RawCatalogRow>().enumerate() {
        let line = idx as u64 + 2;
        let raw = row?;
        let record = record_from_raw(raw, line)?;

        if !seen.insert(record.catalyst_id.as_str().to_string()) {
            return Err(ImportError::Row {
                line,
                reason: format!("duplicate catalyst_id {}", record.catalyst_id),
            });
        }
        records.push(record);
    }

    if records.is_empty() {
        return Err(ImportError::Empty);
    }
    Ok(records)
}

/// SHA-256 checksum of the raw upload bytes, hex encoded. Stored with the
/// import log so an administrator can tell whether two uploads carried the
/// same file.
pub fn upload_checksum(bytes: &[u8]) -> String {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

fn record_from_raw(raw: RawCatalogRow, line: u64) -> Result<CatalystRecord, ImportError> {
    if raw.catalyst_id.is_empty() {
        return Err(row_error(line, "catalyst_id must not be empty"));
    }
    if raw.name.is_empty() {
        return Err(row_error(line, "name must not be empty"));
    }

    let ceramic_weight_g = non_negative_decimal(&raw.ceramic_weight_g, "ceramic_weight_g", line)?;
    let pt_ppm = non_negative_decimal(&raw.pt_ppm, "pt_ppm", line)?;
    let pd_ppm = non_negative_decimal(&raw.pd_ppm, "pd_ppm", line)?;
    let rh_ppm = non_negative_decimal(&raw.rh_ppm, "rh_ppm", line)?;

    let r#override = override_from_raw(&raw, line)?;

    Ok(CatalystRecord {
        catalyst_id: CatalystId::new(raw.catalyst_id),
        name: raw.name,
        ceramic_weight_g,
        pt_ppm,
        pd_ppm,
        rh_ppm,
        add_info: if raw.add_info.is_empty() {
            None
        } else {
            Some(raw.add_info)
        },
        r#override,
    })
}

fn override_from_raw(raw: &RawCatalogRow, line: u64) -> Result<Option<ManualOverride>, ImportError> {
    let cells = [
        ("override_weight_g", raw.override_weight_g.as_str()),
        ("override_pt_g", raw.override_pt_g.as_str()),
        ("override_pd_g", raw.override_pd_g.as_str()),
        ("override_rh_g", raw.override_rh_g.as_str()),
        ("override_total_price", raw.override_total_price.as_str()),
    ];

    let populated = cells.iter().filter(|(_, v)| !v.is_empty()).count();
    match populated {
        0 => Ok(None),
        5 => Ok(Some(ManualOverride {
            weight_g: non_negative_decimal(cells[0].1, cells[0].0, line)?,
            pt_g: non_negative_decimal(cells[1].1, cells[1].0, line)?,
            pd_g: non_negative_decimal(cells[2].1, cells[2].0, line)?,
            rh_g: non_negative_decimal(cells[3].1, cells[3].0, line)?,
            total_price: non_negative_decimal(cells[4].1, cells[4].0, line)?,
        })),
        _ => Err(row_error(
            line,
            "override columns must be all populated or all empty",
        )),
    }
}

fn non_negative_decimal(raw: &str, field: &str, line: u64) -> Result<Decimal, ImportError> {
    let value = Decimal::from_str(raw)
        .map_err(|_| row_error(line, &format!("{field} is not a number: {raw:?}")))?;
    if value.is_negative() {
        return Err(row_error(line, &format!("{field} must be non-negative")));
    }
    Ok(value)
}

fn row_error(line: u64, reason: &str) -> ImportError {
    ImportError::Row {
        line,
        reason: reason.to_string(),
    }
}
