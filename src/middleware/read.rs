//! Read-Path Caching Middleware
//!
//! Serves cached JSON responses for GET requests and captures successful
//! handler output to populate the cache on a miss.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    extract::{Request, State},
    http::{header, header::HeaderValue, HeaderMap, HeaderName, Method},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use tracing::{debug, warn};

use crate::cache::{registry, CacheService};
use crate::middleware::CurrentUser;

/// Largest response body the middleware will store in the cache.
const MAX_CACHEABLE_BODY_BYTES: usize = 4 * 1024 * 1024;

static X_CACHE: HeaderName = HeaderName::from_static("x-cache");
static X_CACHE_KEY: HeaderName = HeaderName::from_static("x-cache-key");

// == Read Cache Config ==
/// Per-route configuration for the read path.
#[derive(Clone)]
pub struct ReadCacheConfig {
    pub service: Arc<CacheService>,
    /// Entity type this route's responses belong to
    pub entity_type: &'static str,
    /// Explicit TTL override; falls back to the registry TTL
    pub ttl_override: Option<u64>,
    /// Skip caching for requests carrying an authenticated principal
    pub skip_authenticated: bool,
}

impl ReadCacheConfig {
    pub fn new(service: Arc<CacheService>, entity_type: &'static str) -> Self {
        Self {
            service,
            entity_type,
            ttl_override: None,
            skip_authenticated: false,
        }
    }

    pub fn with_ttl(mut self, ttl_seconds: u64) -> Self {
        self.ttl_override = Some(ttl_seconds);
        self
    }

    pub fn skip_authenticated(mut self) -> Self {
        self.skip_authenticated = true;
        self
    }
}

// == Middleware ==
/// Read-path middleware entry point; only activates on GET.
pub async fn cache_response(
    State(config): State<ReadCacheConfig>,
    request: Request,
    next: Next,
) -> Response {
    run_read_path(&config, request, next).await
}

pub(crate) async fn run_read_path(
    config: &ReadCacheConfig,
    request: Request,
    next: Next,
) -> Response {
    if request.method() != Method::GET {
        return next.run(request).await;
    }

    if config.skip_authenticated && request.extensions().get::<CurrentUser>().is_some() {
        return next.run(request).await;
    }

    // Key covers path and query so requests differing in either get
    // distinct entries; sanitization happens inside generate_key
    let identifier = match request.uri().query() {
        Some(query) => format!("{}?{}", request.uri().path(), query),
        None => request.uri().path().to_string(),
    };
    let key = config.service.generate_key(config.entity_type, &identifier);

    // The service swallows backend errors into a miss, so a broken cache
    // can never block the request from reaching the handler
    if let Some(value) = config.service.get(&key).await {
        debug!(key, "serving cached response");
        return hit_response(&key, value);
    }

    let response = next.run(request).await;
    capture_and_store(config, &key, response).await
}

/// Builds the terminal response for a cache hit.
fn hit_response(key: &str, value: Value) -> Response {
    let mut response = Json(value).into_response();
    let headers = response.headers_mut();
    headers.insert(X_CACHE.clone(), HeaderValue::from_static("HIT"));
    if let Ok(header_value) = HeaderValue::from_str(key) {
        headers.insert(X_CACHE_KEY.clone(), header_value);
    }
    response
}

fn insert_miss_headers(key: &str, headers: &mut HeaderMap) {
    headers.insert(X_CACHE.clone(), HeaderValue::from_static("MISS"));
    if let Ok(header_value) = HeaderValue::from_str(key) {
        headers.insert(X_CACHE_KEY.clone(), header_value);
    }
}

fn declared_content_length(headers: &HeaderMap) -> Option<usize> {
    headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
}

/// Buffers a 2xx JSON response body, stores it, and re-emits the response
/// with miss headers. Non-2xx and non-JSON bodies pass through uncached, as
/// do bodies larger than the buffering cap: the body is never consumed
/// unless it fits, so a valid response always reaches the client intact.
async fn capture_and_store(config: &ReadCacheConfig, key: &str, response: Response) -> Response {
    // Oversized bodies are served untouched and never cached
    let declared_len = declared_content_length(response.headers());
    if declared_len.map_or(false, |len| len > MAX_CACHEABLE_BODY_BYTES) {
        debug!(key, "response body exceeds cacheable size; passing through");
        let mut response = response;
        insert_miss_headers(key, response.headers_mut());
        return response;
    }

    let status = response.status();
    let (mut parts, body) = response.into_parts();
    insert_miss_headers(key, &mut parts.headers);

    // The size cap is checked against the declared length above and the
    // buffered length below, never enforced by to_bytes itself, so this
    // only fails on a genuine body stream error
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(err) => {
            warn!(key, error = %err, "failed to buffer response body; not caching");
            return Response::from_parts(parts, Body::empty());
        }
    };

    if status.is_success() && bytes.len() <= MAX_CACHEABLE_BODY_BYTES {
        match serde_json::from_slice::<Value>(&bytes) {
            Ok(value) => {
                let ttl = config
                    .ttl_override
                    .unwrap_or_else(|| registry::ttl_for(config.entity_type));
                config.service.set(key, &value, Some(ttl)).await;
            }
            Err(err) => {
                debug!(key, error = %err, "response body is not JSON; not caching");
            }
        }
    }

    Response::from_parts(parts, Body::from(bytes))
}
