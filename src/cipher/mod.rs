//! Cipher engine behind the HTTP layer.
//!
//! The dispatcher only talks to [`CipherEngine`] and [`Cipher`] trait
//! objects, so the HTTP layer can be exercised against any engine. The
//! shipped implementation is [`CaesarEngine`].
//!
//! # Architecture
//!
//! ```text
//! CipherEngine::construct(key) ──► Box<dyn Cipher>
//!                                    ├── encrypt(input, output)
//!                                    └── decrypt(strategy, input, output)
//!                                             ├── WithKey
//!                                             ├── BruteForce
//!                                             └── FrequencyAnalysis
//! ```
//!
//! Transforms are streaming: they read from an [`AsyncRead`] and write to an
//! [`AsyncWrite`], and resolve to the number of bytes written.

pub mod alphabet;
pub mod analysis;
pub mod caesar;
pub mod chunk;

use std::fmt;
use std::pin::Pin;

use futures_util::future::BoxFuture;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncWrite};

pub use caesar::{Caesar, DEFAULT_CHUNK_SIZE, Decrypter, Encrypter, MAX_KEY};

/// Boxed byte source handed to a transform.
pub type ByteReader = Pin<Box<dyn AsyncRead + Send>>;

/// Boxed byte sink handed to a transform.
pub type ByteWriter = Pin<Box<dyn AsyncWrite + Send>>;

/// A running transform; resolves to the number of bytes written.
pub type TransformFuture = BoxFuture<'static, std::io::Result<u64>>;

/// Errors raised while constructing a cipher.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CipherError {
    #[error("invalid key {key}: must be in range [-{max}, {max}]")]
    InvalidKey { key: i64, max: i64 },
}

/// How a decrypting transform obtains its key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecryptStrategy {
    /// Use the key the cipher was constructed with.
    WithKey,
    /// Try every key and keep the most plausible plaintext.
    BruteForce,
    /// Infer the key from symbol frequencies.
    FrequencyAnalysis,
}

/// A keyed cipher able to run streaming transforms.
pub trait Cipher: Send + Sync + fmt::Debug {
    fn encrypt(&self, input: ByteReader, output: ByteWriter) -> TransformFuture;

    fn decrypt(
        &self,
        strategy: DecryptStrategy,
        input: ByteReader,
        output: ByteWriter,
    ) -> TransformFuture;
}

/// Factory for keyed ciphers.
pub trait CipherEngine: Send + Sync {
    /// Resource name the engine is served under, e.g. `caesar`.
    fn name(&self) -> &'static str;

    /// Construct a cipher bound to `key`.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError`] if the key is not acceptable to the engine.
    fn construct(&self, key: i64) -> Result<Box<dyn Cipher>, CipherError>;
}

impl Cipher for Caesar {
    fn encrypt(&self, input: ByteReader, output: ByteWriter) -> TransformFuture {
        Box::pin(self.encrypter(output).encrypt(input))
    }

    fn decrypt(
        &self,
        strategy: DecryptStrategy,
        input: ByteReader,
        output: ByteWriter,
    ) -> TransformFuture {
        let decrypter = self.decrypter(input);
        match strategy {
            DecryptStrategy::WithKey => Box::pin(decrypter.decrypt(output)),
            DecryptStrategy::BruteForce => Box::pin(decrypter.brute_force().decrypt(output)),
            DecryptStrategy::FrequencyAnalysis => {
                Box::pin(decrypter.frequency_analysis().decrypt(output))
            }
        }
    }
}

/// Engine producing [`Caesar`] ciphers.
#[derive(Debug, Clone, Copy)]
pub struct CaesarEngine {
    chunk_size: usize,
}

impl CaesarEngine {
    /// Resource name of the Caesar cipher.
    pub const NAME: &'static str = "caesar";

    pub fn new(chunk_size: usize) -> Self {
        Self { chunk_size }
    }
}

impl Default for CaesarEngine {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE)
    }
}

impl CipherEngine for CaesarEngine {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn construct(&self, key: i64) -> Result<Box<dyn Cipher>, CipherError> {
        let cipher = Caesar::new(key)?.with_chunk_size(self.chunk_size);
        Ok(Box::new(cipher))
    }
}
