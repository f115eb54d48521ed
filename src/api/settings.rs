use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::AppState;
use crate::domain::{Decimal, PriceSettings};
use crate::error::AppError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsRequest {
    pub price_per_g_pt: Decimal,
    pub price_per_g_pd: Decimal,
    pub price_per_g_rh: Decimal,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsResponse {
    pub price_per_g_pt: String,
    pub price_per_g_pd: String,
    pub price_per_g_rh: String,
    pub updated_at: String,
}

impl SettingsResponse {
    fn from_stored(settings: PriceSettings, updated_at: DateTime<Utc>) -> Self {
        SettingsResponse {
            price_per_g_pt: settings.price_per_g_pt.to_canonical_string(),
            price_per_g_pd: settings.price_per_g_pd.to_canonical_string(),
            price_per_g_rh: settings.price_per_g_rh.to_canonical_string(),
            updated_at: updated_at.to_rfc3339(),
        }
    }
}

pub async fn get_settings(
    State(state): State<AppState>,
) -> Result<Json<SettingsResponse>, AppError> {
    let (settings, updated_at) = state
        .repo
        .get_price_settings()
        .await?
        .ok_or_else(|| AppError::Unavailable("price settings not configured".to_string()))?;

    Ok(Json(SettingsResponse::from_stored(settings, updated_at)))
}

pub async fn put_settings(
    State(state): State<AppState>,
    Json(req): Json<UpdateSettingsRequest>,
) -> Result<Json<SettingsResponse>, AppError> {
    let settings = PriceSettings::new(req.price_per_g_pt, req.price_per_g_pd, req.price_per_g_rh);
    if settings.has_negative_price() {
        return Err(AppError::BadRequest(
            "prices per gram must be non-negative".to_string(),
        ));
    }

    let updated_at = Utc::now();
    state.repo.put_price_settings(&settings, updated_at).await?;

    Ok(Json(SettingsResponse::from_stored(settings, updated_at)))
}
