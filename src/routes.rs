//! Application routing configuration with middleware stack.
//!
//! # Middleware Stack (applied in order)
//!
//! ```text
//! Request
//!    │
//!    ▼
//! ┌──────────────────┐
//! │     Tracing      │ ← per-request span
//! └────────┬─────────┘
//!          │
//!          ▼
//! ┌──────────────────┐
//! │    Body Limit    │ ← 413 if Content-Length exceeds the cap
//! └────────┬─────────┘
//!          │
//!          ▼
//! ┌──────────────────┐
//! │      Closer      │ ← drains the request body after the handler
//! └────────┬─────────┘
//!          │
//!          ▼
//! ┌──────────────────┐
//! │      Logger      │ ← request line, outcome metrics
//! └────────┬─────────┘
//!          │
//!          ▼
//! ┌──────────────────┐
//! │     Headers      │ ← Content-Type, X-Content-Type-Options
//! └────────┬─────────┘
//!          │
//!          ▼
//!      Handler
//! ```
//!
//! # Routes
//!
//! - `POST /cyphers/{name}` - cipher endpoint (`OPTIONS` is served the same way)
//! - anything else - `404 not found`

use axum::Router;
use axum::routing::post;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::handlers;
use crate::middleware::{close_body, log_request, plain_text_headers};
use crate::state::AppState;

/// Build the application router with all routes and middleware configured.
///
/// # Arguments
///
/// * `state` - Application state containing config and the dispatcher
///
/// # Returns
///
/// Fully configured Axum router ready to be served.
pub fn build_router(state: AppState) -> Router {
    let config = &state.config;

    // =========================================================================
    // Build Router with Routes
    // =========================================================================
    let mut router = Router::new()
        .route(
            "/cyphers/{name}",
            post(handlers::transform).options(handlers::transform),
        )
        .fallback(handlers::not_found);

    // =========================================================================
    // Apply Middleware Stack (order matters - applied bottom to top)
    // =========================================================================

    // 1. Response headers (innermost, set before the first body byte)
    router = router.layer(plain_text_headers());

    // 2. Request logging and outcome metrics
    router = router.layer(axum::middleware::from_fn(log_request));

    // 3. Request body finalizer
    router = router.layer(axum::middleware::from_fn(close_body));

    // 4. Request body size limit (prevents DoS via large payloads)
    info!(
        max_size_bytes = config.max_request_body_size,
        "Request body size limit configured"
    );
    router = router.layer(RequestBodyLimitLayer::new(config.max_request_body_size));

    // 5. Tracing
    router = router.layer(TraceLayer::new_for_http());

    router.with_state(state)
}
