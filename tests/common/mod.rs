//! Common test utilities

use axum::body::{Body, Bytes};
use axum::http::{Request, Response};
use axum::Router;
use boleto_intake::api::state::{hash_api_key, ApiKeyRegistry, RateLimiter};
use boleto_intake::api::{build_router, AppState};
use boleto_intake::config::ApiKeyEntry;
use http_body_util::BodyExt;

pub const API_KEY: &str = "test_key_123";

/// Router with one accepted key ("portal") and the given limits
pub fn test_app(rate_limit_per_minute: u32, max_batch_size: usize) -> Router {
    let keys = ApiKeyRegistry::new(vec![ApiKeyEntry {
        name: "portal".to_string(),
        key_hash: hash_api_key(API_KEY),
    }]);
    let state = AppState::new(
        keys,
        RateLimiter::per_minute(rate_limit_per_minute),
        max_batch_size,
    );

    build_router(state)
}

/// Authenticated JSON POST
pub fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header("X-API-Key", API_KEY)
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
