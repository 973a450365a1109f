//! Monetix API Library
//!
//! This library exposes service internals for integration testing.
//! The entry point for running the server is the `monetix-api` binary.

pub mod config;
pub mod error;
pub mod media;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::{Config, StorageConfig};
pub use error::{AppError, AppResult};
pub use state::AppState;
