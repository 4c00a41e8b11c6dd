//! API Middleware
//!
//! Authentication, rate limiting and request logging.

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{HeaderMap, HeaderValue, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::net::SocketAddr;
use uuid::Uuid;

use crate::domain::OperationContext;
use crate::error::AppError;

use super::state::AppState;

/// Header carrying the request's correlation id, in and out
pub const CORRELATION_ID_HEADER: &str = "x-correlation-id";

/// API key that passed authentication
#[derive(Debug, Clone)]
pub struct AuthenticatedApiKey {
    pub name: String,
}

/// Correlation id assigned to a request by the logging layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorrelationId(pub Uuid);

/// Client-supplied correlation id, if it is a valid UUID
fn correlation_id_from_headers(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get(CORRELATION_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
}

// =========================================================================
// API Key Authentication Middleware
// =========================================================================

/// Extract and validate API key from X-API-Key header
pub async fn auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let api_key = headers
        .get("X-API-Key")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::MissingApiKey.into_response())?;

    let name = match state.api_keys.authenticate(api_key) {
        Some(name) => name.to_string(),
        None => {
            tracing::warn!("Rejected request with unknown API key");
            return Err(AppError::InvalidApiKey.into_response());
        }
    };

    // Set by the logging layer; the header is read only without it
    let correlation_id = request
        .extensions()
        .get::<CorrelationId>()
        .map(|id| id.0)
        .or_else(|| correlation_id_from_headers(&headers))
        .unwrap_or_else(Uuid::new_v4);

    let mut context = OperationContext::new()
        .with_api_key(name.clone())
        .with_correlation_id(correlation_id);

    if let Some(ConnectInfo(addr)) = request.extensions().get::<ConnectInfo<SocketAddr>>() {
        context = context.with_client_ip(addr.ip());
    }

    request.extensions_mut().insert(AuthenticatedApiKey { name });
    request.extensions_mut().insert(context);

    Ok(next.run(request).await)
}

// =========================================================================
// Rate Limiting Middleware
// =========================================================================

/// Rate limiting middleware
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let api_key = request
        .extensions()
        .get::<AuthenticatedApiKey>()
        .cloned()
        .ok_or_else(|| {
            AppError::Internal("Auth middleware must run first".to_string()).into_response()
        })?;

    if !state.rate_limiter.check_and_increment(&api_key.name) {
        tracing::warn!(api_key = %api_key.name, "Rate limit exceeded");
        return Err(AppError::RateLimitExceeded.into_response());
    }

    Ok(next.run(request).await)
}

// =========================================================================
// mask_headers_for_logging
// =========================================================================

/// Headers that should be masked in logs
const SENSITIVE_HEADERS: &[&str] = &["x-api-key", "authorization", "cookie", "set-cookie"];

/// Mask sensitive headers for logging
pub fn mask_headers_for_logging(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            let name_lower = name.as_str().to_lowercase();
            let masked_value = if SENSITIVE_HEADERS.contains(&name_lower.as_str()) {
                "[REDACTED]".to_string()
            } else {
                value.to_str().unwrap_or("[invalid utf8]").to_string()
            };
            (name.to_string(), masked_value)
        })
        .collect()
}

// =========================================================================
// Request Logging Middleware
// =========================================================================

/// Request logging middleware
///
/// Outermost layer: assigns the correlation id, hands it to the inner
/// layers and echoes it on the response.
pub async fn logging_middleware(mut request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let version = request.version();

    // Mask sensitive headers
    let headers = mask_headers_for_logging(request.headers());

    let correlation_id =
        correlation_id_from_headers(request.headers()).unwrap_or_else(Uuid::new_v4);
    request.extensions_mut().insert(CorrelationId(correlation_id));

    let start = std::time::Instant::now();

    tracing::info!(
        method = %method,
        uri = %uri,
        version = ?version,
        correlation_id = %correlation_id,
        headers = ?headers,
        "Incoming request"
    );

    let mut response = next.run(request).await;

    let duration = start.elapsed();
    let status = response.status();

    tracing::info!(
        method = %method,
        uri = %uri,
        status = %status,
        duration_ms = %duration.as_millis(),
        correlation_id = %correlation_id,
        "Request completed"
    );

    if let Ok(value) = HeaderValue::from_str(&correlation_id.to_string()) {
        response.headers_mut().insert(CORRELATION_ID_HEADER, value);
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_headers_for_logging() {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", "application/json".parse().unwrap());
        headers.insert("x-api-key", "secret-key-12345".parse().unwrap());
        headers.insert("x-correlation-id", "abc".parse().unwrap());

        let masked = mask_headers_for_logging(&headers);

        let api_key = masked.iter().find(|(k, _)| k == "x-api-key");
        let content_type = masked.iter().find(|(k, _)| k == "content-type");
        let correlation = masked.iter().find(|(k, _)| k == "x-correlation-id");

        assert_eq!(api_key.unwrap().1, "[REDACTED]");
        assert_eq!(content_type.unwrap().1, "application/json");
        assert_eq!(correlation.unwrap().1, "abc");
    }

    #[test]
    fn test_correlation_id_from_headers() {
        let id = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        headers.insert(CORRELATION_ID_HEADER, id.to_string().parse().unwrap());
        assert_eq!(correlation_id_from_headers(&headers), Some(id));

        headers.insert(CORRELATION_ID_HEADER, "not-a-uuid".parse().unwrap());
        assert_eq!(correlation_id_from_headers(&headers), None);

        assert_eq!(correlation_id_from_headers(&HeaderMap::new()), None);
    }

    #[test]
    fn test_sensitive_headers_list() {
        assert!(SENSITIVE_HEADERS.contains(&"x-api-key"));
        assert!(SENSITIVE_HEADERS.contains(&"authorization"));
        assert!(!SENSITIVE_HEADERS.contains(&"content-type"));
    }
}
