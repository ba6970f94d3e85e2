//! Request body finalizer.
//!
//! Every request body is drained and dropped exactly once, after the inner
//! handler is done with it. The step runs on every exit path, including
//! early rejections that never touched the body, so the connection can be
//! reused by the transport.
//!
//! # When the Drain Runs
//!
//! ```text
//! response body known up front (errors) ──► drain, then send response
//! streaming response body ─────────────────► send response, drain after
//!                                             its last chunk
//! response dropped mid-stream ─────────────► body dropped, no drain
//! ```
//!
//! The handler sees a proxy body that reads through a shared slot. The
//! finalizer takes the real body out of the slot, so later reads by the
//! handler see end-of-stream and the drain cannot run twice.

use std::pin::Pin;
use std::sync::{Arc, Mutex, PoisonError};
use std::task::{Context, Poll};

use axum::body::{Body, BodyDataStream, Bytes, HttpBody};
use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use futures_util::{Stream, StreamExt, future, stream};
use tracing::{debug, trace};

/// Middleware that drains and closes the request body after the handler.
pub async fn close_body(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let slot = BodySlot::new(body);
    let request = Request::from_parts(parts, Body::from_stream(slot.reader()));

    let response = next.run(request).await;

    if response.body().size_hint().exact().is_some() {
        // Nothing left for the handler to read; finish before responding.
        slot.drain().await;
        return response;
    }

    let (parts, body) = response.into_parts();
    let finalizer = stream::once(slot.drain())
        .filter_map(|()| future::ready(None::<Result<Bytes, axum::Error>>));
    Response::from_parts(parts, Body::from_stream(body.into_data_stream().chain(finalizer)))
}

/// Shared ownership of a request body between handler and finalizer.
#[derive(Clone)]
struct BodySlot(Arc<Mutex<Option<BodyDataStream>>>);

impl BodySlot {
    fn new(body: Body) -> Self {
        Self(Arc::new(Mutex::new(Some(body.into_data_stream()))))
    }

    fn reader(&self) -> SlotReader {
        SlotReader(self.clone())
    }

    fn take(&self) -> Option<BodyDataStream> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).take()
    }

    /// Read the rest of the body and drop it. Errors end the drain quietly.
    async fn drain(self) {
        let Some(mut remaining) = self.take() else {
            return;
        };

        let mut drained = 0usize;
        while let Some(chunk) = remaining.next().await {
            match chunk {
                Ok(bytes) => drained += bytes.len(),
                Err(e) => {
                    debug!(error = %e, drained, "Request body drain stopped");
                    return;
                }
            }
        }
        trace!(drained, "Request body drained and closed");
    }
}

/// Handler-side view of a [`BodySlot`].
struct SlotReader(BodySlot);

impl Stream for SlotReader {
    type Item = Result<Bytes, axum::Error>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut guard = (self.0).0.lock().unwrap_or_else(PoisonError::into_inner);
        match guard.as_mut() {
            Some(body) => body.poll_next_unpin(cx),
            None => Poll::Ready(None),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use axum::Router;
    use axum::body::to_bytes;
    use axum::http::StatusCode;
    use axum::routing::post;
    use tower::ServiceExt;

    use super::*;

    /// Body stream that counts how many chunks were pulled from it.
    fn counted_body(chunks: usize, pulled: Arc<AtomicUsize>) -> Body {
        let items = (0..chunks).map(move |_| {
            pulled.fetch_add(1, Ordering::SeqCst);
            Ok::<_, std::io::Error>(Bytes::from_static(b"chunk"))
        });
        Body::from_stream(stream::iter(items))
    }

    fn app() -> Router {
        Router::new()
            .route("/ignore", post(|| async { (StatusCode::BAD_REQUEST, "nope\n") }))
            .route(
                "/echo",
                post(|body: Body| async move { Body::from_stream(body.into_data_stream()) }),
            )
            .route(
                "/partial",
                post(|body: Body| async move {
                    let mut stream = body.into_data_stream();
                    let first = stream.next().await;
                    drop(stream);
                    format!("{}", first.is_some())
                }),
            )
            .layer(axum::middleware::from_fn(close_body))
    }

    async fn call(path: &str, body: Body) -> (StatusCode, Bytes) {
        let request = axum::http::Request::builder()
            .method("POST")
            .uri(path)
            .body(body)
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        (status, to_bytes(response.into_body(), usize::MAX).await.unwrap())
    }

    #[tokio::test]
    async fn test_unread_body_is_drained_on_error_path() {
        let pulled = Arc::new(AtomicUsize::new(0));
        let (status, body) = call("/ignore", counted_body(4, pulled.clone())).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(&body[..], b"nope\n");
        assert_eq!(pulled.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_streaming_response_sees_whole_body() {
        let pulled = Arc::new(AtomicUsize::new(0));
        let (status, body) = call("/echo", counted_body(3, pulled.clone())).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(&body[..], b"chunkchunkchunk");
        assert_eq!(pulled.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_partially_read_body_is_drained() {
        let pulled = Arc::new(AtomicUsize::new(0));
        let (status, body) = call("/partial", counted_body(5, pulled.clone())).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(&body[..], b"true");
        assert_eq!(pulled.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn test_response_dropped_mid_stream_releases_body() {
        struct Released(Arc<AtomicBool>);
        impl Drop for Released {
            fn drop(&mut self) {
                self.0.store(true, Ordering::SeqCst);
            }
        }

        let released = Arc::new(AtomicBool::new(false));
        let guard = Released(released.clone());
        let items = (0..4).map(move |_| {
            let _held = &guard;
            Ok::<_, std::io::Error>(Bytes::from_static(b"chunk"))
        });
        let request = axum::http::Request::builder()
            .method("POST")
            .uri("/echo")
            .body(Body::from_stream(stream::iter(items)))
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        let mut body = response.into_body().into_data_stream();
        assert_eq!(body.next().await.unwrap().unwrap(), Bytes::from_static(b"chunk"));
        assert!(!released.load(Ordering::SeqCst));

        // Client went away: nothing is left to drain into, the body is closed.
        drop(body);
        assert!(released.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_drain_is_idempotent() {
        let slot = BodySlot::new(Body::from("abc"));
        slot.clone().drain().await;
        assert!(slot.take().is_none());
        slot.drain().await;
    }

    #[tokio::test]
    async fn test_drain_swallows_body_errors() {
        let failing = stream::iter([
            Ok(Bytes::from_static(b"ok")),
            Err(std::io::Error::other("connection reset")),
        ]);
        let slot = BodySlot::new(Body::from_stream(failing));
        slot.drain().await;
    }
}
