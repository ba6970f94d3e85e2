//! Caesar shift cipher with streaming encrypt/decrypt transforms.
//!
//! # Usage
//!
//! ```rust,ignore
//! let cipher = Caesar::new(13)?;
//!
//! // plaintext reader -> ciphertext writer
//! cipher.encrypter(&mut output).encrypt(input).await?;
//!
//! // ciphertext reader -> plaintext writer, key recovered from the text
//! Caesar::new(0)?.decrypter(input).brute_force().decrypt(&mut output).await?;
//! ```
//!
//! Key-based transforms work chunk by chunk, so output is written as input
//! arrives. Brute force and frequency analysis need the whole ciphertext
//! before the key is known and buffer it first.

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use super::alphabet::{ALPHABET_LEN, offset, shift};
use super::analysis::{brute_force_key, frequency_analysis_key, histogram};
use super::chunk::{CharTransform, transform_all};
use super::CipherError;

/// Largest accepted key magnitude.
pub const MAX_KEY: i64 = ALPHABET_LEN as i64 - 1;

/// Read buffer size used when none is configured.
pub const DEFAULT_CHUNK_SIZE: usize = 8 * 1024;

/// Caesar cipher bound to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caesar {
    key: i64,
    chunk_size: usize,
}

impl Caesar {
    /// Create a cipher for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::InvalidKey`] when `|key|` exceeds [`MAX_KEY`].
    pub fn new(key: i64) -> Result<Self, CipherError> {
        if !(-MAX_KEY..=MAX_KEY).contains(&key) {
            return Err(CipherError::InvalidKey { key, max: MAX_KEY });
        }
        Ok(Self {
            key,
            chunk_size: DEFAULT_CHUNK_SIZE,
        })
    }

    /// Use `chunk_size` bytes per read. Zero is ignored.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        if chunk_size > 0 {
            self.chunk_size = chunk_size;
        }
        self
    }

    pub fn key(&self) -> i64 {
        self.key
    }

    pub fn encrypt_str(&self, text: &str) -> String {
        let forward = offset(self.key);
        text.chars().map(|c| shift(c, forward)).collect()
    }

    pub fn decrypt_str(&self, text: &str) -> String {
        let backward = offset(-self.key);
        text.chars().map(|c| shift(c, backward)).collect()
    }

    /// Build an encrypting transform that writes ciphertext to `output`.
    pub fn encrypter<W>(self, output: W) -> Encrypter<W> {
        Encrypter {
            cipher: self,
            output,
        }
    }

    /// Build a decrypting transform that reads ciphertext from `input`.
    pub fn decrypter<R>(self, input: R) -> Decrypter<R> {
        Decrypter {
            cipher: self,
            input,
            recovery: KeyRecovery::Given,
        }
    }
}

/// Streaming encryption into a writer.
#[derive(Debug)]
pub struct Encrypter<W> {
    cipher: Caesar,
    output: W,
}

impl<W: AsyncWrite + Unpin> Encrypter<W> {
    /// Encrypt everything read from `input`. Returns the number of bytes
    /// written.
    pub async fn encrypt<R: AsyncRead + Unpin>(mut self, input: R) -> std::io::Result<u64> {
        let forward = offset(self.cipher.key);
        stream_shift(input, &mut self.output, forward, self.cipher.chunk_size).await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyRecovery {
    Given,
    BruteForce,
    FrequencyAnalysis,
}

impl KeyRecovery {
    fn label(self) -> &'static str {
        match self {
            KeyRecovery::Given => "key",
            KeyRecovery::BruteForce => "brute-force",
            KeyRecovery::FrequencyAnalysis => "freq",
        }
    }
}

/// Streaming decryption from a reader.
#[derive(Debug)]
pub struct Decrypter<R> {
    cipher: Caesar,
    input: R,
    recovery: KeyRecovery,
}

impl<R: AsyncRead + Unpin> Decrypter<R> {
    /// Ignore the cipher key and pick the most plausible decryption among
    /// all keys.
    pub fn brute_force(mut self) -> Self {
        self.recovery = KeyRecovery::BruteForce;
        self
    }

    /// Ignore the cipher key and infer it from symbol frequencies.
    pub fn frequency_analysis(mut self) -> Self {
        self.recovery = KeyRecovery::FrequencyAnalysis;
        self
    }

    /// Decrypt the input into `output`. Returns the number of bytes written.
    pub async fn decrypt<W: AsyncWrite + Unpin>(mut self, mut output: W) -> std::io::Result<u64> {
        let recover: fn(&[u64; ALPHABET_LEN]) -> i64 = match self.recovery {
            KeyRecovery::Given => {
                let backward = offset(-self.cipher.key);
                return stream_shift(self.input, &mut output, backward, self.cipher.chunk_size)
                    .await;
            }
            KeyRecovery::BruteForce => brute_force_key,
            KeyRecovery::FrequencyAnalysis => frequency_analysis_key,
        };

        let mut ciphertext = Vec::new();
        self.input.read_to_end(&mut ciphertext).await?;

        let counts = histogram(&String::from_utf8_lossy(&ciphertext));
        let key = recover(&counts);
        debug!(
            recovered_key = key,
            method = ?self.recovery,
            ciphertext_bytes = ciphertext.len(),
            "Key recovered"
        );
        crate::metrics::record_key_recovered(self.recovery.label());

        let backward = offset(-key);
        let plaintext = transform_all(&ciphertext, |c| shift(c, backward));
        output.write_all(&plaintext).await?;
        output.flush().await?;
        Ok(plaintext.len() as u64)
    }
}

/// Shift every symbol read from `input` by `by` and write it out chunk by
/// chunk.
async fn stream_shift<R, W>(
    mut input: R,
    output: &mut W,
    by: usize,
    chunk_size: usize,
) -> std::io::Result<u64>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = vec![0u8; chunk_size];
    let mut out = Vec::with_capacity(chunk_size);
    let mut transform = CharTransform::new();
    let mut written = 0u64;

    loop {
        let n = input.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        out.clear();
        transform.feed(buf.get(..n).unwrap_or_default(), |c| shift(c, by), &mut out);
        output.write_all(&out).await?;
        written += out.len() as u64;
    }

    out.clear();
    transform.finish(&mut out);
    output.write_all(&out).await?;
    written += out.len() as u64;

    output.flush().await?;
    Ok(written)
}
