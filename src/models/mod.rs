mod operation;
mod query;

pub use operation::{Method, Mode, Operation};
pub use query::{CipherQuery, KEY_PARAM, METHOD_PARAM, MODE_PARAM};
