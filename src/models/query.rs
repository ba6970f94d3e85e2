/// Query parameter selecting encode or decode.
pub const MODE_PARAM: &str = "mode";

/// Query parameter carrying the integer key.
pub const KEY_PARAM: &str = "key";

/// Query parameter selecting the key recovery method when decoding.
pub const METHOD_PARAM: &str = "method";

/// Raw cipher query parameters.
///
/// When a parameter repeats, its first occurrence wins. An empty value is
/// reported as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CipherQuery {
    mode: Option<String>,
    key: Option<String>,
    method: Option<String>,
}

impl CipherQuery {
    /// Build from decoded `name=value` pairs, ignoring unknown names.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut query = Self::default();
        for (name, value) in pairs {
            let slot = match name.as_ref() {
                MODE_PARAM => &mut query.mode,
                KEY_PARAM => &mut query.key,
                METHOD_PARAM => &mut query.method,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        query
    }

    pub fn mode(&self) -> Option<&str> {
        non_empty(&self.mode)
    }

    pub fn key(&self) -> Option<&str> {
        non_empty(&self.key)
    }

    pub fn method(&self) -> Option<&str> {
        non_empty(&self.method)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
