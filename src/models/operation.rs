use std::fmt;
use std::str::FromStr;

/// Top-level operation selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Encode,
    Decode,
}

impl Mode {
    pub const ENCODE: &'static str = "encode";
    pub const DECODE: &'static str = "decode";

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Encode => Self::ENCODE,
            Mode::Decode => Self::DECODE,
        }
    }
}

impl FromStr for Mode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::ENCODE => Ok(Mode::Encode),
            Self::DECODE => Ok(Mode::Decode),
            _ => Err(()),
        }
    }
}

/// Key recovery method for decoding without a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    BruteForce,
    FrequencyAnalysis,
}

impl Method {
    pub const BRUTE_FORCE: &'static str = "brute-force";
    pub const FREQUENCY_ANALYSIS: &'static str = "freq";

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::BruteForce => Self::BRUTE_FORCE,
            Method::FrequencyAnalysis => Self::FREQUENCY_ANALYSIS,
        }
    }
}

impl FromStr for Method {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::BRUTE_FORCE => Ok(Method::BruteForce),
            Self::FREQUENCY_ANALYSIS => Ok(Method::FrequencyAnalysis),
            _ => Err(()),
        }
    }
}

/// A validated cipher operation, built fresh for each request.
///
/// Decoding carries either a key or a recovery method, never both and
/// never neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Encode { key: i64 },
    Decode { key: i64 },
    BruteForce,
    FrequencyAnalysis,
}

impl Operation {
    pub fn mode(&self) -> Mode {
        match self {
            Operation::Encode { .. } => Mode::Encode,
            _ => Mode::Decode,
        }
    }

    pub fn key(&self) -> Option<i64> {
        match *self {
            Operation::Encode { key } | Operation::Decode { key } => Some(key),
            Operation::BruteForce | Operation::FrequencyAnalysis => None,
        }
    }

    pub fn method(&self) -> Option<Method> {
        match self {
            Operation::BruteForce => Some(Method::BruteForce),
            Operation::FrequencyAnalysis => Some(Method::FrequencyAnalysis),
            Operation::Encode { .. } | Operation::Decode { .. } => None,
        }
    }

    /// Short label used in logs and metrics.
    pub fn label(&self) -> &'static str {
        match self.method() {
            Some(method) => method.as_str(),
            None => self.mode().as_str(),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.key() {
            Some(key) => write!(f, "{} (key {key})", self.label()),
            None => f.write_str(self.label()),
        }
    }
}
