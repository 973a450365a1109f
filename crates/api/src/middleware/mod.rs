//! HTTP middleware components.
//!
//! Request processing layers applied around the router.

pub mod observe;

pub use observe::record_http_metrics;
