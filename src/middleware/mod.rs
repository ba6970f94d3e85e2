//! HTTP middleware wrapped around the cipher handler.
//!
//! # Architecture
//!
//! ```text
//! Request → Closer → Logger → Headers → Handler → Response
//!             ↓         ↓         ↓
//!        drain body  log line  Content-Type, nosniff
//!        afterwards
//! ```
//!
//! The Closer is the outermost stage, so its drain-and-close step runs after
//! every other stage and on every exit path.

pub mod closer;
pub mod headers;
pub mod logger;

pub use closer::close_body;
pub use headers::{PlainTextHeadersLayer, TEXT_PLAIN_UTF8, plain_text_headers};
pub use logger::log_request;
