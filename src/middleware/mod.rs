//! HTTP Caching Middleware
//!
//! Request-scoped caching glue: the read path serves cached JSON for GET
//! requests and captures handler output on a miss; the write path drops
//! entity caches after successful mutations. A composed variant dispatches
//! on method for routes that need both under one registration.
//!
//! The cache is advisory here: any failure while consulting or populating
//! it is logged and the request proceeds as if on a miss.

mod read;
mod write;

pub use read::{cache_response, ReadCacheConfig};
pub use write::{invalidate_on_write, WriteInvalidateConfig};

use axum::{
    extract::{Request, State},
    http::Method,
    middleware::Next,
    response::Response,
};

// == Current User Marker ==
/// Authenticated principal attached to request extensions by the external
/// auth layer. The read path only inspects its presence (`skip_authenticated`).
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: String,
}

/// Methods that trigger write-path invalidation.
pub(crate) fn is_mutating(method: &Method) -> bool {
    matches!(
        *method,
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    )
}

// == Composed Middleware ==
/// Per-route configuration for routes that both serve cached reads and
/// invalidate on writes.
#[derive(Clone)]
pub struct RouteCacheConfig {
    pub read: ReadCacheConfig,
    pub write: WriteInvalidateConfig,
}

/// Dispatches to the read path for GET and the write path for mutating
/// methods; anything else passes through untouched.
pub async fn cache_and_invalidate(
    State(config): State<RouteCacheConfig>,
    request: Request,
    next: Next,
) -> Response {
    if request.method() == Method::GET {
        read::run_read_path(&config.read, request, next).await
    } else if is_mutating(request.method()) {
        write::run_write_path(&config.write, request, next).await
    } else {
        next.run(request).await
    }
}
