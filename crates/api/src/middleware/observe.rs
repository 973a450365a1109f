//! Request observation middleware.
//!
//! Records the request counter and duration histogram for every response
//! the router produces, including error responses.

use std::time::Instant;

use axum::{
    body::Body, extract::State, http::Request, middleware::Next, response::Response,
};

use crate::state::AppState;

/// Middleware to record per-request metrics.
///
/// Captures method and path before the handler runs, status and elapsed
/// time after.
pub async fn record_http_metrics(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(request).await;

    state.metrics().record_request(
        &method,
        &path,
        response.status().as_u16(),
        start.elapsed().as_secs_f64(),
    );

    response
}
