mod dispatcher;

pub use dispatcher::{Dispatcher, PLACEHOLDER_KEY};
