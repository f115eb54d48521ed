use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::api::AppState;
use crate::db::repo::ImportLogEntry;
use crate::error::AppError;
use crate::ingest::{parse_catalog_csv, upload_checksum};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResponse {
    pub import_id: String,
    pub imported_at: String,
    pub record_count: i64,
    pub checksum: String,
}

impl From<ImportLogEntry> for ImportResponse {
    fn from(entry: ImportLogEntry) -> Self {
        ImportResponse {
            import_id: entry.import_id,
            imported_at: entry.imported_at.to_rfc3339(),
            record_count: entry.record_count,
            checksum: entry.checksum,
        }
    }
}

/// Replace the whole catalog from an uploaded CSV. Validation failures
/// reject the upload as a whole; the previous catalog stays untouched.
pub async fn import_catalog(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ImportResponse>, AppError> {
    let records = parse_catalog_csv(&body)?;

    let entry = ImportLogEntry {
        import_id: Uuid::new_v4().to_string(),
        imported_at: Utc::now(),
        record_count: records.len() as i64,
        checksum: upload_checksum(&body),
    };

    state.repo.replace_catalog(&records, &entry).await?;

    info!(
        import_id = %entry.import_id,
        record_count = entry.record_count,
        checksum = %entry.checksum,
        "Catalog replaced"
    );

    Ok(Json(entry.into()))
}

pub async fn latest_import(
    State(state): State<AppState>,
) -> Result<Json<ImportResponse>, AppError> {
    let entry = state
        .repo
        .latest_import()
        .await?
        .ok_or_else(|| AppError::NotFound("no catalog import recorded".to_string()))?;

    Ok(Json(entry.into()))
}
