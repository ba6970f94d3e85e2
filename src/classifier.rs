//! Request classification: path and query parameters to [`Operation`].
//!
//! # Decision Tree
//!
//! ```text
//! resource == supported? ── no ──► 404 not found
//!        │
//!       mode ─┬─ absent ─────────► 400 not found 'mode' query parameter
//!             ├─ other ──────────► 501 unsupported mode
//!             ├─ encode ── key ──► Encode{key}      (bad key: 400 invalid key)
//!             └─ decode ── method ─┬─ brute-force ─► BruteForce
//!                                  ├─ freq ────────► FrequencyAnalysis
//!                                  ├─ other ───────► 501 unsupported decryption method
//!                                  └─ absent ── key ─┬─ absent ─► 400 not found 'method' query parameter
//!                                                    └─ present ► Decode{key}
//! ```
//!
//! The resource check runs before any query parameter is looked at, and a
//! missing mode (400) is kept distinct from an unknown one (501).

use crate::error::{AppError, AppResult};
use crate::models::{CipherQuery, METHOD_PARAM, MODE_PARAM, Method, Mode, Operation};

/// Classify a request for `resource` against the `supported` cipher name.
///
/// # Errors
///
/// - `NotFound` if `resource` is not the supported cipher
/// - `BadRequest` for a missing mode, a missing or unparseable key, or a
///   decode request with neither method nor key
/// - `NotImplemented` for an unknown mode or decryption method
pub fn classify(resource: &str, supported: &str, query: &CipherQuery) -> AppResult<Operation> {
    if resource != supported {
        return Err(AppError::NotFound("not found".to_string()));
    }

    let Some(mode) = query.mode() else {
        return Err(missing_param(MODE_PARAM));
    };

    match mode.parse::<Mode>() {
        Ok(Mode::Encode) => Ok(Operation::Encode {
            key: parse_key(query.key())?,
        }),
        Ok(Mode::Decode) => classify_decode(query),
        Err(()) => Err(AppError::NotImplemented("unsupported mode".to_string())),
    }
}

fn classify_decode(query: &CipherQuery) -> AppResult<Operation> {
    match query.method().map(str::parse::<Method>) {
        Some(Ok(Method::BruteForce)) => Ok(Operation::BruteForce),
        Some(Ok(Method::FrequencyAnalysis)) => Ok(Operation::FrequencyAnalysis),
        Some(Err(())) => Err(AppError::NotImplemented(
            "unsupported decryption method".to_string(),
        )),
        None => match query.key() {
            None => Err(missing_param(METHOD_PARAM)),
            key => Ok(Operation::Decode {
                key: parse_key(key)?,
            }),
        },
    }
}

fn parse_key(raw: Option<&str>) -> AppResult<i64> {
    raw.and_then(|k| k.parse().ok())
        .ok_or_else(|| AppError::BadRequest("invalid key".to_string()))
}

fn missing_param(name: &str) -> AppError {
    AppError::BadRequest(format!("not found '{name}' query parameter"))
}
