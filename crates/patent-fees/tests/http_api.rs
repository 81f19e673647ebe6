use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use tower::ServiceExt;

use patent_fees::estimates::{
    estimate_router, AnchorQuote, EstimateService, RateFetchError, RateProvider, RateRefresher,
    RuleRegistry, SharedRateTable,
};

/// Provider that is never reachable; the service keeps serving fallback rates.
struct OfflineProvider;

#[async_trait]
impl RateProvider for OfflineProvider {
    fn source_label(&self) -> &str {
        "offline"
    }

    async fn fetch_latest(&self) -> Result<AnchorQuote, RateFetchError> {
        Err(RateFetchError::Status(503))
    }
}

fn app() -> axum::Router {
    let refresher = RateRefresher::new(Arc::new(OfflineProvider), SharedRateTable::default());
    estimate_router(Arc::new(EstimateService::new(
        RuleRegistry::standard(),
        refresher,
    )))
}

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let response = app().oneshot(request).await.expect("router responds");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    let value = serde_json::from_slice(&bytes).expect("json body");
    (status, value)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

fn decimal(value: &Value) -> Decimal {
    value
        .as_str()
        .expect("decimal serialized as string")
        .parse()
        .expect("decimal parses")
}

#[tokio::test]
async fn estimate_endpoint_returns_ranked_report() {
    let (status, body) = send(post_json(
        "/api/v1/estimates",
        json!({
            "scope": "IN",
            "applicant_type": "startup",
            "application_type": "foreign",
            "prior_art": "quick",
            "today": "2026-10-19"
        }),
    ))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["evaluated_on"], "2026-10-19");
    assert_eq!(body["summary"][0]["jurisdiction"], "IN");
    assert_eq!(decimal(&body["summary"][0]["total_reference"]), Decimal::from(57400));
    assert_eq!(body["cards"][0]["rate_note"], "Base currency is INR.");
    assert_eq!(body["rates"]["metadata"]["fallback"], true);
}

#[tokio::test]
async fn unsupported_route_serializes_null_totals() {
    let (status, body) = send(post_json(
        "/api/v1/estimates",
        json!({
            "scope": "ep",
            "applicant_type": "sme",
            "application_type": "provisional"
        }),
    ))
    .await;

    assert_eq!(status, StatusCode::OK);
    let card = &body["cards"][0];
    assert!(card["total_reference"].is_null());
    assert!(card["government_local"].is_null());
    assert_eq!(
        card["government"]["unsupported_reason"],
        "EP has no provisional filing route."
    );
    assert_eq!(card["government"]["items"], json!([]));
}

#[tokio::test]
async fn unknown_scope_is_a_bad_request() {
    let (status, body) = send(post_json(
        "/api/v1/estimates",
        json!({
            "scope": "XX",
            "applicant_type": "sme",
            "application_type": "complete"
        }),
    ))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("XX"));
}

#[tokio::test]
async fn jurisdictions_endpoint_lists_catalogue() {
    let (status, body) = send(
        Request::builder()
            .uri("/api/v1/jurisdictions")
            .body(Body::empty())
            .expect("request builds"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let ids: Vec<_> = body
        .as_array()
        .expect("array body")
        .iter()
        .map(|entry| entry["id"].as_str().expect("id").to_string())
        .collect();
    assert_eq!(ids, ["IN", "EP", "US", "UK", "KR", "JP", "CN", "PCT", "AU"]);
    assert_eq!(body[7]["currency"], "CHF");
}

#[tokio::test]
async fn refresh_endpoint_reports_failure_and_fallback() {
    let (status, body) = send(post_json("/api/v1/rates/refresh", json!({}))).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["refresh"]["error"]
        .as_str()
        .expect("error recorded")
        .contains("503"));
    assert_eq!(body["rates"]["metadata"]["source"], "Fallback static set");
    let usd = decimal(&body["rates"]["quotes"]["USD"]);
    let expected: Decimal = "83.2".parse().expect("decimal");
    assert!((usd - expected).abs() < "0.000001".parse().expect("decimal"));
}
