use std::io;
use std::sync::Arc;

use axum::body::Body;
use axum::response::Response;
use futures_util::{StreamExt, TryStreamExt, future, stream};
use tokio_util::io::{ReaderStream, StreamReader};
use tracing::{debug, instrument, warn};

use crate::cipher::{ByteReader, ByteWriter, CipherEngine, DecryptStrategy};
use crate::error::AppResult;
use crate::metrics;
use crate::models::Operation;

/// Key used to construct a cipher when the operation carries none.
pub const PLACEHOLDER_KEY: i64 = 0;

/// Routes classified operations to the cipher engine.
///
/// # Streaming
///
/// The transform runs in its own task and writes into a bounded in-memory
/// pipe; the response body reads from the other end. Output therefore
/// reaches the client while the request body is still being consumed, and
/// memory use per request is bounded by the pipe capacity (except for key
/// recovery, which needs the whole ciphertext).
///
/// If the client goes away mid-stream the transform's next write fails and
/// the task ends; the error is only logged. Any other transform failure,
/// such as a request body over the size cap, ends the response body with an
/// error instead of a clean end-of-stream, so truncated output is never
/// mistaken for a complete one.
#[derive(Clone)]
pub struct Dispatcher {
    engine: Arc<dyn CipherEngine>,
    pipe_capacity: usize,
}

impl Dispatcher {
    pub fn new(engine: Arc<dyn CipherEngine>, pipe_capacity: usize) -> Self {
        Self {
            engine,
            pipe_capacity: pipe_capacity.max(1),
        }
    }

    /// Resource name of the cipher this dispatcher serves.
    pub fn supported_cipher(&self) -> &'static str {
        self.engine.name()
    }

    /// Start `operation` over `body` and return the streaming response.
    ///
    /// # Errors
    ///
    /// Returns `AppError::InvalidKey` if the engine rejects the key. Nothing
    /// has been read or written at that point.
    #[instrument(skip(self, body), fields(operation = %operation))]
    pub fn dispatch(&self, operation: Operation, body: Body) -> AppResult<Response> {
        let cipher = self
            .engine
            .construct(operation.key().unwrap_or(PLACEHOLDER_KEY))?;

        let input: ByteReader = Box::pin(StreamReader::new(
            body.into_data_stream().map_err(io::Error::other),
        ));
        let (pipe_reader, pipe_writer) = tokio::io::duplex(self.pipe_capacity);
        let output: ByteWriter = Box::pin(pipe_writer);

        let transform = match operation {
            Operation::Encode { .. } => cipher.encrypt(input, output),
            Operation::Decode { .. } => cipher.decrypt(DecryptStrategy::WithKey, input, output),
            Operation::BruteForce => cipher.decrypt(DecryptStrategy::BruteForce, input, output),
            Operation::FrequencyAnalysis => {
                cipher.decrypt(DecryptStrategy::FrequencyAnalysis, input, output)
            }
        };

        let label = operation.label();
        metrics::set_transform_in_flight(true);
        let task = tokio::spawn(async move {
            let outcome = transform.await;
            metrics::set_transform_in_flight(false);
            match &outcome {
                Ok(bytes) => {
                    metrics::record_bytes_transformed(label, *bytes);
                    debug!(operation = label, bytes, "Transform complete");
                }
                Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
                    debug!(operation = label, "Client went away mid-stream");
                }
                Err(e) => {
                    warn!(operation = label, error = %e, "Transform aborted");
                }
            }
            outcome
        });

        // The pipe reaches end-of-stream whether the transform finished or
        // failed; the trailing item turns a failure into a body error.
        let outcome = stream::once(async move {
            match task.await {
                Ok(Ok(_)) => None,
                Ok(Err(e)) => Some(Err(e)),
                Err(e) => Some(Err(io::Error::other(e))),
            }
        })
        .filter_map(future::ready);
        let output = ReaderStream::with_capacity(pipe_reader, self.pipe_capacity).chain(outcome);

        let mut response = Response::new(Body::from_stream(output));
        response.extensions_mut().insert(operation);
        Ok(response)
    }
}
