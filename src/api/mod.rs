//! API module
//!
//! HTTP API endpoints and middleware.

pub mod middleware;
pub mod routes;
pub mod state;

use axum::{middleware as axum_middleware, routing::get, Router};
use tower_http::trace::TraceLayer;

pub use routes::create_router;
pub use state::AppState;

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    // Axum layers are applied in reverse order (last added = first executed)
    // Order: logging -> auth -> rate_limit -> handler
    let protected_routes = create_router()
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::rate_limit_middleware,
        ))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth_middleware,
        ))
        .layer(axum_middleware::from_fn(middleware::logging_middleware));

    Router::new()
        // Health check (no auth)
        .route("/health", get(health_check))
        .nest("/api/v1", protected_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
