//! Price-settings singleton operations.
//!
//! The settings row is the one stored value that must never degrade to a
//! default: a silent zero price would misprice every record in the catalog.
//! Reads therefore fail loudly on a corrupt row instead of falling back.

use super::{Repository, StoreError};
use crate::domain::{Decimal, PriceSettings};
use chrono::{DateTime, Utc};
use sqlx::Row;
use std::str::FromStr;

impl Repository {
    /// The current settings snapshot and when it was last written, or None
    /// when no administrator has configured prices yet.
    pub async fn get_price_settings(
        &self,
    ) -> Result<Option<(PriceSettings, DateTime<Utc>)>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT price_per_g_pt, price_per_g_pd, price_per_g_rh, updated_at
            FROM price_settings
            WHERE id = 1
            "#,
        )
        .fetch_optional(self.pool())
        .await?;

        row.map(|r| {
            let settings = PriceSettings::new(
                parse_price(&r.get::<String, _>("price_per_g_pt"), "price_per_g_pt")?,
                parse_price(&r.get::<String, _>("price_per_g_pd"), "price_per_g_pd")?,
                parse_price(&r.get::<String, _>("price_per_g_rh"), "price_per_g_rh")?,
            );
            let updated_at_raw: String = r.get("updated_at");
            let updated_at = DateTime::parse_from_rfc3339(&updated_at_raw)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| StoreError::Corrupt {
                    context: "price_settings.updated_at".to_string(),
                    detail: e.to_string(),
                })?;
            Ok((settings, updated_at))
        })
        .transpose()
    }

    /// Write the settings singleton, stamping `updated_at`.
    pub async fn put_price_settings(
        &self,
        settings: &PriceSettings,
        updated_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO price_settings (id, price_per_g_pt, price_per_g_pd, price_per_g_rh, updated_at)
            VALUES (1, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                price_per_g_pt = excluded.price_per_g_pt,
                price_per_g_pd = excluded.price_per_g_pd,
                price_per_g_rh = excluded.price_per_g_rh,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(settings.price_per_g_pt.to_canonical_string())
        .bind(settings.price_per_g_pd.to_canonical_string())
        .bind(settings.price_per_g_rh.to_canonical_string())
        .bind(updated_at.to_rfc3339())
        .execute(self.pool())
        .await?;

        Ok(())
    }
}

fn parse_price(raw: &str, field: &str) -> Result<Decimal, StoreError> {
    Decimal::from_str(raw).map_err(|e| StoreError::Corrupt {
        context: format!("price_settings.{field}"),
        detail: e.to_string(),
    })
}
