//! Uniform response headers.
//!
//! Every response is plain UTF-8 text and must not be content-sniffed. The
//! headers are set on the response head, so they are in place before the
//! first body byte is streamed.

use axum::http::HeaderValue;
use axum::http::header::{CONTENT_TYPE, X_CONTENT_TYPE_OPTIONS};
use tower::layer::util::Stack;
use tower_http::set_header::SetResponseHeaderLayer;

/// Content type of every response.
pub const TEXT_PLAIN_UTF8: &str = "text/plain; charset=UTF-8";

/// Both header layers composed as one stage.
pub type PlainTextHeadersLayer =
    Stack<SetResponseHeaderLayer<HeaderValue>, SetResponseHeaderLayer<HeaderValue>>;

/// Build the header stage.
///
/// Values override anything the handler set, so rejections rendered by
/// extractors or error types carry the same headers as cipher output.
pub fn plain_text_headers() -> PlainTextHeadersLayer {
    Stack::new(
        SetResponseHeaderLayer::overriding(
            X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ),
        SetResponseHeaderLayer::overriding(CONTENT_TYPE, HeaderValue::from_static(TEXT_PLAIN_UTF8)),
    )
}
