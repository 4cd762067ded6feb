//! HTTP surface tests, driving the router in-process.

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

/// Fixture path, usable as a query value.
fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR")).replace(' ', "%20")
}

async fn get(uri: &str) -> (StatusCode, Value) {
    let response = sales_insights::server::router()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn inventory_serves_demo_eoq() {
    let (status, body) = get("/inventory").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({"EOQ": 223.61}));
}

#[tokio::test]
async fn pricing_without_csv_url_is_bad_request() {
    let (status, body) = get("/pricing").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, serde_json::json!({"error": "Missing csv_url"}));
}

#[tokio::test]
async fn pricing_returns_legacy_and_modern_views() {
    let uri = format!("/pricing?csv_url={}&units=150&month=7", fixture("sales.csv"));
    let (status, body) = get(&uri).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(body["legacy"]["For_Units"], serde_json::json!(150));
    assert_eq!(body["legacy"]["For_Month"], 7);
    assert!(body["legacy"]["Suggested_Price"].is_number());
    assert_eq!(body["legacy"]["Price_Trend"].as_array().unwrap().len(), 10);

    let modern = &body["modern"];
    assert_eq!(modern["salesTrend"].as_array().unwrap().len(), 10);
    assert_eq!(modern["productPerformance"][0], serde_json::json!({"product": "Jan 2024", "units": 255}));
    assert_eq!(modern["seasonalTrends"][0], serde_json::json!({"month": "Jan", "sales": 255}));
    assert_eq!(modern["salesDistribution"][2], serde_json::json!({"category": "Low (<11)", "value": 4}));
}

#[tokio::test]
async fn pricing_without_price_column_has_structured_error() {
    let uri = format!("/pricing?csv_url={}", fixture("no_price.csv"));
    let (status, body) = get(&uri).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Missing required column: 'Price'");
    assert!(body["hint"].as_str().unwrap().contains("Price"));
}

#[tokio::test]
async fn pricing_rejects_non_numeric_units() {
    let uri = format!("/pricing?csv_url={}&units=many", fixture("sales.csv"));
    let (status, body) = get(&uri).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("units"));
    assert!(body.get("hint").is_none());
}

#[tokio::test]
async fn forecast_defaults_to_three_months() {
    let uri = format!("/forecast?csv_url={}", fixture("sales.csv"));
    let (status, body) = get(&uri).await;
    assert_eq!(status, StatusCode::OK);

    let summary = &body["forecast_summary"];
    assert_eq!(summary["next_n_months"], 3);
    let records = summary["records"].as_array().unwrap();
    assert_eq!(records.len(), 3);
    for r in records {
        for key in ["month", "forecast", "lower", "upper"] {
            assert!(r.get(key).is_some(), "missing {key} in {r}");
        }
    }
}

#[tokio::test]
async fn forecast_horizon_can_be_overridden() {
    let uri = format!("/forecast?csv_url={}&months=5", fixture("sales.csv"));
    let (status, body) = get(&uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["forecast_summary"]["records"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn forecast_rejects_oversized_horizon() {
    let uri = format!("/forecast?csv_url={}&months=10000000000000", fixture("sales.csv"));
    let (status, body) = get(&uri).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("months"));

    let uri = format!("/forecast?csv_url={}&months=121", fixture("sales.csv"));
    let (status, _) = get(&uri).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn forecast_without_csv_url_has_hint() {
    let (status, body) = get("/forecast").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Missing csv_url");
    let hint = body["hint"].as_str().unwrap();
    assert!(hint.contains("Date") && hint.contains("Units_Sold"), "{hint}");
}

#[tokio::test]
async fn forecast_source_failure_has_hint() {
    let uri = format!("/forecast?csv_url={}", fixture("missing.csv"));
    let (status, body) = get(&uri).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
    assert!(body["hint"].as_str().unwrap().contains("Units_Sold"));
}

#[tokio::test]
async fn health_reports_alive() {
    let (status, body) = get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "alive");
}
