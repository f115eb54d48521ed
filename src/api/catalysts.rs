use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::AppState;
use crate::domain::{CatalystId, ComputedCatalystEntry, PriceSettings};
use crate::engine::{compute_all_entries, compute_entry};
use crate::error::AppError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalystsQuery {
    pub search: Option<String>,
}

/// A computed entry as served over the API. Decimal fields are canonical
/// strings so consumers copying them onto listings get exactly the stored
/// precision. This shape is the listing-creation boundary contract.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalystEntryResponse {
    pub catalyst_id: String,
    pub name: String,
    pub add_info: String,
    pub weight_g: String,
    pub pt_g: String,
    pub pd_g: String,
    pub rh_g: String,
    pub total_price: String,
    pub is_override: bool,
}

impl From<ComputedCatalystEntry> for CatalystEntryResponse {
    fn from(entry: ComputedCatalystEntry) -> Self {
        CatalystEntryResponse {
            catalyst_id: entry.catalyst_id.as_str().to_string(),
            name: entry.name,
            add_info: entry.add_info,
            weight_g: entry.weight_g.to_canonical_string(),
            pt_g: entry.pt_g.to_canonical_string(),
            pd_g: entry.pd_g.to_canonical_string(),
            rh_g: entry.rh_g.to_canonical_string(),
            total_price: entry.total_price.to_canonical_string(),
            is_override: entry.is_override,
        }
    }
}

/// Settings are read fresh on every request; ppm and price data can change
/// between requests and entries are never cached.
pub(crate) async fn current_settings(state: &AppState) -> Result<PriceSettings, AppError> {
    state
        .repo
        .get_price_settings()
        .await?
        .map(|(settings, _updated_at)| settings)
        .ok_or_else(|| AppError::Unavailable("price settings not configured".to_string()))
}

pub async fn list_catalysts(
    Query(params): Query<CatalystsQuery>,
    State(state): State<AppState>,
) -> Result<Json<Vec<CatalystEntryResponse>>, AppError> {
    let settings = current_settings(&state).await?;
    let mut records = state.repo.list_catalysts().await?;

    if let Some(needle) = params
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
    {
        records.retain(|r| {
            r.catalyst_id.as_str().to_lowercase().contains(&needle)
                || r.name.to_lowercase().contains(&needle)
        });
    }

    let entries = compute_all_entries(&records, &settings);
    Ok(Json(entries.into_iter().map(Into::into).collect()))
}

pub async fn get_catalyst(
    Path(catalyst_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<CatalystEntryResponse>, AppError> {
    let settings = current_settings(&state).await?;
    let record = state
        .repo
        .get_catalyst(&CatalystId::new(catalyst_id.clone()))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("catalyst {} not found", catalyst_id)))?;

    Ok(Json(compute_entry(&record, &settings).into()))
}
