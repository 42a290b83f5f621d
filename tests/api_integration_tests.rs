//! Integration Tests for the Management API
//!
//! Tests the full request/response cycle for each /cache endpoint.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use storefront_cache::{api::create_router, AppState, CacheService, Config};
use tower::ServiceExt;

// == Helper Functions ==

fn create_test_app() -> (Router, std::sync::Arc<CacheService>) {
    let service = CacheService::new(&Config::default());
    let app = create_router(AppState::new(service.clone()));
    (app, service)
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// == Health Endpoint Tests ==

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _) = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/cache/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["backend"], "memory");
    assert!(body.get("timestamp").is_some());
}

// == Stats Endpoint Tests ==

#[tokio::test]
async fn test_stats_endpoint_reflects_activity() {
    let (app, service) = create_test_app();

    service.get("graba2z:products:missing").await; // miss
    let key = service.generate_key("products", "abc");
    service.set(&key, &json!(1), None).await;
    service.get(&key).await; // hit

    let response = app
        .oneshot(
            Request::builder()
                .uri("/cache/stats")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["hits"], 1);
    assert_eq!(body["misses"], 1);
    assert_eq!(body["total_requests"], 2);
    assert_eq!(body["sets"], 1);
    assert_eq!(body["backend"], "memory");
}

// == Flush Endpoint Tests ==

#[tokio::test]
async fn test_flush_endpoint_clears_namespace() {
    let (app, service) = create_test_app();

    service
        .set(&service.generate_key("products", "1"), &json!(1), None)
        .await;
    service
        .set(&service.generate_key("brands", "1"), &json!(2), None)
        .await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/cache/flush")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["removed"], 2);
    assert_eq!(
        service.get(&service.generate_key("products", "1")).await,
        None
    );
}

// == Invalidate Endpoint Tests ==

#[tokio::test]
async fn test_invalidate_entity_endpoint() {
    let (app, service) = create_test_app();

    let product_key = service.generate_key("products", "abc");
    let brand_key = service.generate_key("brands", "abc");
    service.set(&product_key, &json!(1), None).await;
    service.set(&brand_key, &json!(2), None).await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/cache/invalidate/products")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["removed"], 1);

    // Prefix isolation: other entity types are unaffected
    assert_eq!(service.get(&product_key).await, None);
    assert_eq!(service.get(&brand_key).await, Some(json!(2)));
}

#[tokio::test]
async fn test_invalidate_unknown_entity_lists_valid_types() {
    let (app, _) = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/cache/invalidate/widgets")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_to_json(response.into_body()).await;
    assert!(body["error"].as_str().unwrap().contains("widgets"));
    let valid = body["validEntityTypes"].as_array().unwrap();
    assert!(valid.contains(&json!("products")));
}

#[tokio::test]
async fn test_invalidate_multiple_endpoint() {
    let (app, service) = create_test_app();

    service
        .set(&service.generate_key("products", "1"), &json!(1), None)
        .await;
    service
        .set(&service.generate_key("brands", "1"), &json!(2), None)
        .await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/cache/invalidate-multiple")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"entityTypes":["products","brands"]}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["removed"], 2);
}

#[tokio::test]
async fn test_invalidate_multiple_rejects_unknown_entity() {
    let (app, _) = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/cache/invalidate-multiple")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"entityTypes":["products","widgets"]}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_invalidate_multiple_rejects_empty_list() {
    let (app, _) = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/cache/invalidate-multiple")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"entityTypes":[]}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// == Entity Types Endpoint Tests ==

#[tokio::test]
async fn test_entity_types_endpoint() {
    let (app, _) = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/cache/entity-types")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_to_json(response.into_body()).await;
    let types = body["entity_types"].as_array().unwrap();
    assert!(types.len() >= 20);
    assert!(types
        .iter()
        .any(|t| t["name"] == "products" && t["ttl_seconds"] == 1800));
    assert!(types
        .iter()
        .any(|t| t["name"] == "colors" && t["ttl_seconds"] == 86400));
}
