mod cyphers;

pub use cyphers::{not_found, transform};
