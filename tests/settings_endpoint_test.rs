use axum::http::StatusCode;
use catprice::api;
use catprice::db::{init_db, ImportLogEntry};
use catprice::{CatalystId, CatalystRecord, Decimal, Repository};
use chrono::{DateTime, Utc};
use std::str::FromStr;
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;

struct TestApp {
    app: axum::Router,
    repo: Arc<Repository>,
    _temp: TempDir,
}

async fn setup_test_app() -> TestApp {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir
        .path()
        .join("test.db")
        .to_string_lossy()
        .to_string();
    let pool = init_db(&db_path).await.expect("init_db failed");
    let repo = Arc::new(Repository::new(pool));
    let app = api::create_router(api::AppState { repo: repo.clone() });

    TestApp {
        app,
        repo,
        _temp: temp_dir,
    }
}

async fn request(
    app: axum::Router,
    method: &str,
    uri: &str,
    json_body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let builder = axum::http::Request::builder().method(method).uri(uri);
    let req = match json_body {
        Some(value) => builder
            .header("content-type", "application/json")
            .body(axum::body::Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(axum::body::Body::empty()).unwrap(),
    };

    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

#[tokio::test]
async fn settings_are_503_until_configured() {
    let test_app = setup_test_app().await;

    let (status, body) = request(test_app.app, "GET", "/v1/settings", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("pricing temporarily unavailable"));
}

#[tokio::test]
async fn put_then_get_roundtrip() {
    let test_app = setup_test_app().await;

    let (status, put_body) = request(
        test_app.app.clone(),
        "PUT",
        "/v1/settings",
        Some(serde_json::json!({
            "pricePerGPt": 30.5,
            "pricePerGPd": 70,
            "pricePerGRh": 400
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(put_body["pricePerGPt"], "30.5");
    assert!(put_body["updatedAt"].is_string());

    let (status, get_body) = request(test_app.app, "GET", "/v1/settings", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(get_body["pricePerGPt"], "30.5");
    assert_eq!(get_body["pricePerGPd"], "70");
    assert_eq!(get_body["pricePerGRh"], "400");
}

#[tokio::test]
async fn negative_price_is_rejected() {
    let test_app = setup_test_app().await;

    let (status, body) = request(
        test_app.app,
        "PUT",
        "/v1/settings",
        Some(serde_json::json!({
            "pricePerGPt": -1,
            "pricePerGPd": 70,
            "pricePerGRh": 400
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("non-negative"));
}

#[tokio::test]
async fn missing_price_field_is_a_client_error() {
    let test_app = setup_test_app().await;

    let (status, _) = request(
        test_app.app,
        "PUT",
        "/v1/settings",
        Some(serde_json::json!({
            "pricePerGPt": 30.5,
            "pricePerGPd": 70
        })),
    )
    .await;
    assert!(status.is_client_error(), "got {}", status);
}

#[tokio::test]
async fn settings_update_reprices_the_catalog_on_next_read() {
    let test_app = setup_test_app().await;

    let record = CatalystRecord::new(
        CatalystId::new("KT0001".to_string()),
        "Ford Focus 1.6".to_string(),
        Decimal::from_str("139.7").unwrap(),
        Decimal::from_str("1394").unwrap(),
        Decimal::from_str("959").unwrap(),
        Decimal::from_str("0").unwrap(),
    );
    let import = ImportLogEntry {
        import_id: "test-batch".to_string(),
        imported_at: DateTime::parse_from_rfc3339("2026-08-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc),
        record_count: 1,
        checksum: "deadbeef".to_string(),
    };
    test_app.repo.replace_catalog(&[record], &import).await.unwrap();

    let put = |pt: f64, pd: f64, rh: f64| {
        serde_json::json!({"pricePerGPt": pt, "pricePerGPd": pd, "pricePerGRh": rh})
    };

    let (status, _) = request(
        test_app.app.clone(),
        "PUT",
        "/v1/settings",
        Some(put(30.0, 70.0, 400.0)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = request(test_app.app.clone(), "GET", "/v1/catalysts/KT0001", None).await;
    assert_eq!(body["totalPrice"], "15.220315");

    // No caching: the next read must see the new prices.
    let (status, _) = request(
        test_app.app.clone(),
        "PUT",
        "/v1/settings",
        Some(put(0.0, 0.0, 0.0)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = request(test_app.app, "GET", "/v1/catalysts/KT0001", None).await;
    assert_eq!(body["totalPrice"], "0");
}
