//! Shared application state for Axum handlers.
//!
//! Everything here is read-only after startup: the configuration and the
//! dispatcher holding the injected cipher engine. Cloning the state is cheap;
//! both parts sit behind `Arc`.

use std::sync::Arc;

use crate::cipher::{CaesarEngine, CipherEngine};
use crate::config::Config;
use crate::services::Dispatcher;

/// Shared application state for Axum handlers.
#[derive(Clone)]
pub struct AppState {
    /// Routes classified operations to the cipher engine
    pub dispatcher: Dispatcher,
    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Create application state around an arbitrary cipher engine.
    ///
    /// Tests use this to run the HTTP layer against a fake engine.
    pub fn new(engine: Arc<dyn CipherEngine>, config: Config) -> Self {
        let dispatcher = Dispatcher::new(engine, config.stream_buffer_size);
        Self {
            dispatcher,
            config: Arc::new(config),
        }
    }

    /// Create application state serving the Caesar cipher.
    pub fn with_caesar(config: Config) -> Self {
        let engine = CaesarEngine::new(config.stream_buffer_size);
        Self::new(Arc::new(engine), config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caesar_state() {
        let state = AppState::with_caesar(Config::default());
        assert_eq!(state.dispatcher.supported_cipher(), "caesar");
        assert_eq!(state.config.stream_buffer_size, 8192);
    }
}
