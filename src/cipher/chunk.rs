//! Character-wise transforms over arbitrarily split UTF-8 byte chunks.

/// Applies a `char -> char` map to a byte stream fed in pieces.
///
/// A multi-byte sequence split across two chunks is held back until the
/// rest of it arrives. Bytes that are not valid UTF-8 are copied through
/// untouched.
#[derive(Debug, Default)]
pub struct CharTransform {
    pending: Vec<u8>,
}

impl CharTransform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transform `chunk`, appending the result to `out`.
    pub fn feed(&mut self, chunk: &[u8], map: impl Fn(char) -> char, out: &mut Vec<u8>) {
        let mut input = std::mem::take(&mut self.pending);
        input.extend_from_slice(chunk);

        let mut rest: &[u8] = &input;
        loop {
            match std::str::from_utf8(rest) {
                Ok(text) => {
                    push_mapped(text, &map, out);
                    break;
                }
                Err(error) => {
                    let (valid, tail) = rest.split_at(error.valid_up_to());
                    if let Ok(text) = std::str::from_utf8(valid) {
                        push_mapped(text, &map, out);
                    }
                    match error.error_len() {
                        Some(len) => {
                            let (invalid, after) = tail.split_at(len);
                            out.extend_from_slice(invalid);
                            rest = after;
                        }
                        None => {
                            self.pending = tail.to_vec();
                            break;
                        }
                    }
                }
            }
        }
    }

    /// Flush whatever incomplete sequence is still held back.
    pub fn finish(&mut self, out: &mut Vec<u8>) {
        out.append(&mut self.pending);
    }
}

fn push_mapped(text: &str, map: &impl Fn(char) -> char, out: &mut Vec<u8>) {
    let mut buf = [0u8; 4];
    for c in text.chars() {
        out.extend_from_slice(map(c).encode_utf8(&mut buf).as_bytes());
    }
}

/// Transform a complete byte buffer in one pass.
pub fn transform_all(bytes: &[u8], map: impl Fn(char) -> char) -> Vec<u8> {
    let mut transform = CharTransform::new();
    let mut out = Vec::with_capacity(bytes.len());
    transform.feed(bytes, map, &mut out);
    transform.finish(&mut out);
    out
}
