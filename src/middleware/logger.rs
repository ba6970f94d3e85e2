//! Request logging middleware.
//!
//! Logs method, path, query string and host of every request before the
//! handler runs. Once the handler returns, it records the request outcome
//! in the metrics registry. Neither step touches the request or the
//! response.

use std::time::Instant;

use axum::extract::Request;
use axum::http::header::HOST;
use axum::middleware::Next;
use axum::response::Response;
use tracing::info;

use crate::metrics;
use crate::models::Operation;

/// Label for requests rejected before an operation was classified.
const REJECTED: &str = "rejected";

pub async fn log_request(request: Request, next: Next) -> Response {
    info!(
        method = %request.method(),
        path = %request.uri().path(),
        query = request.uri().query().unwrap_or_default(),
        host = request_host(&request),
        "Request received"
    );

    let started = Instant::now();
    let response = next.run(request).await;

    let operation = response
        .extensions()
        .get::<Operation>()
        .map_or(REJECTED, Operation::label);
    metrics::record_request(
        operation,
        response.status().as_u16(),
        started.elapsed().as_secs_f64(),
    );

    response
}

/// Host the client addressed, from the `Host` header or the request URI.
fn request_host<B>(request: &axum::http::Request<B>) -> &str {
    request
        .headers()
        .get(HOST)
        .and_then(|v| v.to_str().ok())
        .or_else(|| request.uri().host())
        .unwrap_or("-")
}
