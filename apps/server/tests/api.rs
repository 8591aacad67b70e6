use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use inventory::{sample_inventory, InMemoryRepository};
use markdown_server::{create_app, AppState};
use pricing_runtime::{EngineConfig, PricingEngine};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn test_app(products: usize) -> Router {
    let mut skus = sample_inventory(&mut ChaCha8Rng::seed_from_u64(21));
    skus.truncate(products);
    let repo = InMemoryRepository::with_products(skus).unwrap();
    let engine = PricingEngine::new(EngineConfig {
        rng_seed: Some(42),
        ..EngineConfig::default()
    });
    create_app(AppState::new(engine, Arc::new(repo)))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(v) => builder
            .header("content-type", "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn health_reports_product_count() {
    let app = test_app(16);
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["products"], 16);
}

#[tokio::test]
async fn product_lifecycle() {
    let app = test_app(2);
    let new = json!({
        "name": "Sourdough",
        "category": "perishable",
        "quantity": 0,
        "base_price": 6.5,
        "holding_cost": 0.4,
        "depreciation_rate": 0.0,
        "demand_index": 1.2,
        "days_to_expiry": 2
    });
    let (status, created) = send(&app, "POST", "/api/products", Some(new)).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().unwrap().to_string();
    assert!(id.starts_with("PROD-"));

    let (_, list) = send(&app, "GET", "/api/products", None).await;
    assert_eq!(list.as_array().unwrap().len(), 3);

    let (_, health) = send(&app, "GET", "/api/products/health", None).await;
    let entry = health
        .as_array()
        .unwrap()
        .iter()
        .find(|h| h["sku_id"] == id.as_str())
        .unwrap();
    assert_eq!(entry["overall"], "critical");

    let (status, body) = send(&app, "DELETE", &format!("/api/products/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let (status, body) = send(&app, "DELETE", &format!("/api/products/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);
}

#[tokio::test]
async fn invalid_product_is_rejected() {
    let app = test_app(1);
    let perishable_without_expiry = json!({
        "category": "perishable",
        "quantity": 5,
        "base_price": 3.0,
        "holding_cost": 0.1,
        "depreciation_rate": 0.0,
        "demand_index": 1.0
    });
    let (status, body) = send(&app, "POST", "/api/products", Some(perishable_without_expiry)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, _) = send(&app, "POST", "/api/products", Some(json!({"name": 3}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn forecast_and_optimize_covers_inventory() {
    let app = test_app(16);
    let (status, body) = send(&app, "GET", "/api/forecast-and-optimize", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["recommendations"].as_array().unwrap().len(), 16);
    assert!(body["kpis"]["projected_revenue"].as_f64().unwrap() > 0.0);
    assert_eq!(body["metadata"]["seed"], 42);
}

#[tokio::test]
async fn empty_inventory_optimizes_to_zero_kpis() {
    let app = test_app(0);
    let (status, body) = send(&app, "GET", "/api/forecast-and-optimize", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["recommendations"].as_array().unwrap().is_empty());
    assert_eq!(body["kpis"]["projected_revenue"], 0.0);
}

#[tokio::test]
async fn analytics_view() {
    let app = test_app(1);
    let (status, body) = send(&app, "GET", "/api/analytics", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["demand_forecast"].as_array().unwrap().len(), 16);
    assert_eq!(body["seasonality"].as_array().unwrap().len(), 4);
    assert_eq!(body["sensitivity"].as_array().unwrap().len(), 9);
}

#[tokio::test]
async fn simulate_endpoint() {
    let app = test_app(1);
    let (status, body) = send(&app, "POST", "/api/simulate", Some(json!({"samples": 1000}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["profit_samples"].as_array().unwrap().len(), 1000);
    let stats = &body["statistics"];
    let p = |k: &str| stats[k].as_f64().unwrap();
    assert!(p("percentile_5") <= p("percentile_25"));
    assert!(p("percentile_75") <= p("percentile_95"));

    let (status, body) = send(&app, "POST", "/api/simulate", Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["metadata"]["samples"], 1000);

    let (status, _) = send(&app, "POST", "/api/simulate", Some(json!({"samples": 0}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn competitor_simulate_endpoint() {
    let app = test_app(1);
    let payload = json!({"competitors": [
        {"name": "A", "price": 10.0},
        {"name": "B", "price": 12.0},
        {"name": "Our Company", "price": 11.0}
    ]});
    let (status, body) = send(&app, "POST", "/api/competitor-simulate", Some(payload)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["best_response_price"], 10.45);
    assert_eq!(body["equilibrium_analysis"]["type"], "Mixed strategy Nash Equilibrium");
    let sum: f64 = body["market_shares"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["share"].as_f64().unwrap())
        .sum();
    assert!((sum - 1.0).abs() <= 0.001);

    let single = json!({"competitors": [{"name": "Our", "price": 9.0}]});
    let (status, body) = send(&app, "POST", "/api/competitor-simulate", Some(single)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["best_response_price"].is_null());

    let empty = json!({"competitors": []});
    let (status, _) = send(&app, "POST", "/api/competitor-simulate", Some(empty)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
