//! # Caesar Cipher Service
//!
//! An HTTP service that encrypts and decrypts text with a Caesar cipher over
//! an 85-symbol alphabet (Cyrillic letters, digits and common punctuation).
//! Decryption works with a known key, by brute force, or by frequency
//! analysis.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Axum HTTP Server                       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Middleware (Trace → Body Limit → Closer → Logger → Headers)│
//! ├─────────────────────────────────────────────────────────────┤
//! │  Handler (POST /cyphers/{name}) + Classifier                │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Dispatcher (streams body through a bounded pipe)           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  CipherEngine (CaesarEngine)                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use caesar_service::{AppState, Config, build_router};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let listener = tokio::net::TcpListener::bind(config.server_addr()).await?;
//!     let app = build_router(AppState::with_caesar(config));
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Usage
//!
//! ```bash
//! curl -X POST 'http://localhost:8080/cyphers/caesar?mode=encode&key=13' --data 'Привет'
//! curl -X POST 'http://localhost:8080/cyphers/caesar?mode=decode&method=freq' --data-binary @cipher.txt
//! ```

pub mod cipher;
pub mod classifier;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

// Re-exports for convenience
pub use cipher::{Caesar, CaesarEngine, Cipher, CipherEngine, CipherError, DecryptStrategy};
pub use config::{Config, LogFormat};
pub use error::{AppError, AppResult};
pub use routes::build_router;
pub use state::AppState;
