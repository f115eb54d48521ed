//! Catalog operations: reads plus the atomic bulk replace performed by the
//! administrative import.

use super::{parse_decimal_or_zero, ImportLogEntry, Repository, StoreError};
use crate::domain::{CatalystId, CatalystRecord, ManualOverride};
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use tracing::warn;

impl Repository {
    /// Replace the whole catalog with `records` and log the import, in a
    /// single transaction. Either the new catalog and its log entry are both
    /// visible, or neither is.
    pub async fn replace_catalog(
        &self,
        records: &[CatalystRecord],
        import: &ImportLogEntry,
    ) -> Result<(), StoreError> {
        let mut tx = self.pool().begin().await?;

        sqlx::query("DELETE FROM catalysts").execute(&mut *tx).await?;

        for record in records {
            let o = record.r#override.as_ref();
            sqlx::query(
                r#"
                INSERT INTO catalysts
                (catalyst_id, name, ceramic_weight_g, pt_ppm, pd_ppm, rh_ppm, add_info,
                 override_weight_g, override_pt_g, override_pd_g, override_rh_g, override_total_price)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(record.catalyst_id.as_str())
            .bind(&record.name)
            .bind(record.ceramic_weight_g.to_canonical_string())
            .bind(record.pt_ppm.to_canonical_string())
            .bind(record.pd_ppm.to_canonical_string())
            .bind(record.rh_ppm.to_canonical_string())
            .bind(record.add_info.as_deref())
            .bind(o.map(|o| o.weight_g.to_canonical_string()))
            .bind(o.map(|o| o.pt_g.to_canonical_string()))
            .bind(o.map(|o| o.pd_g.to_canonical_string()))
            .bind(o.map(|o| o.rh_g.to_canonical_string()))
            .bind(o.map(|o| o.total_price.to_canonical_string()))
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query(
            r#"
            INSERT INTO import_log (import_id, imported_at, record_count, checksum)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&import.import_id)
        .bind(import.imported_at.to_rfc3339())
        .bind(import.record_count)
        .bind(&import.checksum)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    /// All catalog records, ordered by catalyst_id for deterministic listings.
    pub async fn list_catalysts(&self) -> Result<Vec<CatalystRecord>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT catalyst_id, name, ceramic_weight_g, pt_ppm, pd_ppm, rh_ppm, add_info,
                   override_weight_g, override_pt_g, override_pd_g, override_rh_g, override_total_price
            FROM catalysts
            ORDER BY catalyst_id ASC
            "#,
        )
        .fetch_all(self.pool())
        .await?;

        Ok(rows.iter().map(record_from_row).collect())
    }

    /// One catalog record by its stable identifier.
    pub async fn get_catalyst(
        &self,
        catalyst_id: &CatalystId,
    ) -> Result<Option<CatalystRecord>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT catalyst_id, name, ceramic_weight_g, pt_ppm, pd_ppm, rh_ppm, add_info,
                   override_weight_g, override_pt_g, override_pd_g, override_rh_g, override_total_price
            FROM catalysts
            WHERE catalyst_id = ?
            "#,
        )
        .bind(catalyst_id.as_str())
        .fetch_optional(self.pool())
        .await?;

        Ok(row.as_ref().map(record_from_row))
    }

    /// The most recent import, if any catalog was ever uploaded.
    pub async fn latest_import(&self) -> Result<Option<ImportLogEntry>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT import_id, imported_at, record_count, checksum
            FROM import_log
            ORDER BY id DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(self.pool())
        .await?;

        row.map(|r| {
            let imported_at_raw: String = r.get("imported_at");
            let imported_at = DateTime::parse_from_rfc3339(&imported_at_raw)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| StoreError::Corrupt {
                    context: "import_log.imported_at".to_string(),
                    detail: e.to_string(),
                })?;
            Ok(ImportLogEntry {
                import_id: r.get("import_id"),
                imported_at,
                record_count: r.get("record_count"),
                checksum: r.get("checksum"),
            })
        })
        .transpose()
    }
}

fn record_from_row(row: &SqliteRow) -> CatalystRecord {
    let catalyst_id: String = row.get("catalyst_id");
    let name: String = row.get("name");
    let ceramic_weight_g = parse_decimal_or_zero(
        &catalyst_id,
        "ceramic_weight_g",
        &row.get::<String, _>("ceramic_weight_g"),
    );
    let pt_ppm = parse_decimal_or_zero(&catalyst_id, "pt_ppm", &row.get::<String, _>("pt_ppm"));
    let pd_ppm = parse_decimal_or_zero(&catalyst_id, "pd_ppm", &row.get::<String, _>("pd_ppm"));
    let rh_ppm = parse_decimal_or_zero(&catalyst_id, "rh_ppm", &row.get::<String, _>("rh_ppm"));
    let add_info: Option<String> = row.get("add_info");

    CatalystRecord {
        catalyst_id: CatalystId::new(catalyst_id.clone()),
        name,
        ceramic_weight_g,
        pt_ppm,
        pd_ppm,
        rh_ppm,
        add_info,
        r#override: override_from_row(&catalyst_id, row),
    }
}

/// The five override columns are all set or all NULL; the write path
/// guarantees it. A partially populated row (hand-edited database) is
/// logged and treated as no override rather than half-applied.
fn override_from_row(catalyst_id: &str, row: &SqliteRow) -> Option<ManualOverride> {
    let cols: [Option<String>; 5] = [
        row.get("override_weight_g"),
        row.get("override_pt_g"),
        row.get("override_pd_g"),
        row.get("override_rh_g"),
        row.get("override_total_price"),
    ];

    match cols {
        [Some(weight_g), Some(pt_g), Some(pd_g), Some(rh_g), Some(total_price)] => {
            Some(ManualOverride {
                weight_g: parse_decimal_or_zero(catalyst_id, "override_weight_g", &weight_g),
                pt_g: parse_decimal_or_zero(catalyst_id, "override_pt_g", &pt_g),
                pd_g: parse_decimal_or_zero(catalyst_id, "override_pd_g", &pd_g),
                rh_g: parse_decimal_or_zero(catalyst_id, "override_rh_g", &rh_g),
                total_price: parse_decimal_or_zero(catalyst_id, "override_total_price", &total_price),
            })
        }
        [None, None, None, None, None] => None,
        _ => {
            warn!(
                catalyst_id = %catalyst_id,
                "Partially populated override columns, treating as no override"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::setup_test_db;
    use super::*;
    use crate::domain::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn record(id: &str, name: &str) -> CatalystRecord {
        CatalystRecord::new(
            CatalystId::new(id.to_string()),
            name.to_string(),
            dec("139.7"),
            dec("1394"),
            dec("959"),
            dec("0"),
        )
    }

    fn import_entry(n: i64) -> ImportLogEntry {
        ImportLogEntry {
            import_id: format!("batch-{n}"),
            imported_at: DateTime::parse_from_rfc3339("2026-08-01T12:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
            record_count: n,
            checksum: "deadbeef".to_string(),
        }
    }

    #[tokio::test]
    async fn replace_and_list_roundtrip() {
        let (repo, _temp) = setup_test_db().await;

        let records = vec![
            record("KT0002", "VW Golf IV").with_add_info("ceramic".to_string()),
            record("KT0001", "Ford Focus 1.6"),
        ];
        repo.replace_catalog(&records, &import_entry(2)).await.unwrap();

        let listed = repo.list_catalysts().await.unwrap();
        assert_eq!(listed.len(), 2);
        // Listing order is by catalyst_id, not insertion order.
        assert_eq!(listed[0].catalyst_id.as_str(), "KT0001");
        assert_eq!(listed[1].catalyst_id.as_str(), "KT0002");
        assert_eq!(listed[1].add_info.as_deref(), Some("ceramic"));
        assert_eq!(listed[0].ceramic_weight_g, dec("139.7"));
    }

    #[tokio::test]
    async fn replace_discards_previous_catalog() {
        let (repo, _temp) = setup_test_db().await;

        repo.replace_catalog(&[record("KT0001", "Old")], &import_entry(1))
            .await
            .unwrap();
        repo.replace_catalog(&[record("KT0009", "New")], &import_entry(2))
            .await
            .unwrap();

        let listed = repo.list_catalysts().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].catalyst_id.as_str(), "KT0009");
    }

    #[tokio::test]
    async fn override_roundtrip() {
        let (repo, _temp) = setup_test_db().await;

        let with_override = record("KT0001", "Ford Focus 1.6").with_override(ManualOverride {
            weight_g: dec("10"),
            pt_g: dec("2"),
            pd_g: dec("1"),
            rh_g: dec("0"),
            total_price: dec("500"),
        });
        repo.replace_catalog(&[with_override.clone()], &import_entry(1))
            .await
            .unwrap();

        let fetched = repo
            .get_catalyst(&CatalystId::new("KT0001".to_string()))
            .await
            .unwrap()
            .expect("record missing");
        assert_eq!(fetched, with_override);
    }

    #[tokio::test]
    async fn get_unknown_catalyst_is_none() {
        let (repo, _temp) = setup_test_db().await;
        let fetched = repo
            .get_catalyst(&CatalystId::new("KT9999".to_string()))
            .await
            .unwrap();
        assert!(fetched.is_none());
    }

    #[tokio::test]
    async fn partial_override_row_reads_as_no_override() {
        let (repo, _temp) = setup_test_db().await;
        repo.replace_catalog(&[record("KT0001", "Ford Focus 1.6")], &import_entry(1))
            .await
            .unwrap();

        // Simulate a hand-edited row with only some override columns set.
        sqlx::query("UPDATE catalysts SET override_weight_g = '10', override_pt_g = '2' WHERE catalyst_id = 'KT0001'")
            .execute(repo.pool())
            .await
            .unwrap();

        let fetched = repo
            .get_catalyst(&CatalystId::new("KT0001".to_string()))
            .await
            .unwrap()
            .unwrap();
        assert!(fetched.r#override.is_none());
    }

    #[tokio::test]
    async fn latest_import_returns_most_recent_entry() {
        let (repo, _temp) = setup_test_db().await;
        assert!(repo.latest_import().await.unwrap().is_none());

        repo.replace_catalog(&[record("KT0001", "A")], &import_entry(1))
            .await
            .unwrap();
        repo.replace_catalog(&[record("KT0001", "A")], &import_entry(7))
            .await
            .unwrap();

        let latest = repo.latest_import().await.unwrap().expect("no import logged");
        assert_eq!(latest.import_id, "batch-7");
        assert_eq!(latest.record_count, 7);
        assert_eq!(latest.checksum, "deadbeef");
    }
}
