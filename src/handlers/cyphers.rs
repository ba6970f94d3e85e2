//! The cipher endpoint.
//!
//! # Endpoint
//!
//! - `POST /cyphers/{name}?mode=..&key=..&method=..` - transform the request body
//!
//! The body is classified first. A rejected request gets a one-line
//! plain-text error and no transform is started. A resource segment that
//! does not decode to UTF-8 cannot name a cipher and is classified as an
//! unknown resource.

use axum::body::Body;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, Query, State};
use axum::response::Response;
use tracing::{debug, instrument};

use crate::classifier::classify;
use crate::error::{AppError, AppResult};
use crate::models::CipherQuery;
use crate::state::AppState;

/// Encrypt or decrypt the request body with the named cipher.
///
/// The response streams as the body is read. Brute-force and frequency
/// analysis decodes start responding once the whole body has arrived.
#[instrument(skip(state, body))]
pub async fn transform(
    State(state): State<AppState>,
    resource: Result<Path<String>, PathRejection>,
    Query(params): Query<Vec<(String, String)>>,
    body: Body,
) -> AppResult<Response> {
    let name = resource.map_or_else(
        |rejection| {
            debug!(%rejection, "Undecodable resource name");
            String::new()
        },
        |Path(name)| name,
    );
    let query = CipherQuery::from_pairs(params);
    let operation = classify(&name, state.dispatcher.supported_cipher(), &query)?;
    state.dispatcher.dispatch(operation, body)
}

/// Response for paths outside the cipher endpoint.
pub async fn not_found() -> AppError {
    AppError::NotFound("not found".to_string())
}
