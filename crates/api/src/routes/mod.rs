//! HTTP route handlers.

pub mod health;
pub mod media;
pub mod metrics;
