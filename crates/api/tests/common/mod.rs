#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Common test utilities for integration tests.
//!
//! This module builds the REAL router and state over a recording fake
//! signer, so tests exercise the actual routes without an S3 backend.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use monetix_api::media::{UploadAccess, UploadSigner};
use monetix_api::{AppState, Config, StorageConfig};

/// Public base configured for every test app.
pub const TEST_PUBLIC_BASE: &str = "https://cdn.monetix.test";

/// URL the recording signer hands back.
pub const SIGNED_URL: &str = "https://uploads.test/signed-put";

/// One observed signing call.
#[derive(Debug, Clone)]
pub struct SignedRequest {
    pub bucket: String,
    pub key: String,
    pub content_type: String,
    pub access: UploadAccess,
    pub expires_in: Duration,
}

/// Fake signer that records every request it receives.
///
/// Returns a fixed URL, or a fixed error when built with
/// [`RecordingSigner::failing`].
pub struct RecordingSigner {
    requests: Mutex<Vec<SignedRequest>>,
    fail: bool,
}

impl RecordingSigner {
    pub fn new() -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    /// A signer whose every call fails, for error-path tests.
    pub fn failing() -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    /// Snapshot of the signing calls seen so far.
    pub fn requests(&self) -> Vec<SignedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl Default for RecordingSigner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UploadSigner for RecordingSigner {
    async fn presign_put_object(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
        access: UploadAccess,
        expires_in: Duration,
    ) -> Result<String> {
        self.requests.lock().unwrap().push(SignedRequest {
            bucket: bucket.to_string(),
            key: key.to_string(),
            content_type: content_type.to_string(),
            access,
            expires_in,
        });

        if self.fail {
            return Err(anyhow!("signature backend unavailable"));
        }
        Ok(SIGNED_URL.to_string())
    }
}

/// Test application wrapper using the REAL routes and state.
pub struct TestApp {
    router: Router,
    pub signer: Arc<RecordingSigner>,
    pub state: AppState,
}

impl TestApp {
    /// Build the app over a fresh recording signer.
    pub fn new() -> Self {
        Self::with_signer(Arc::new(RecordingSigner::new()))
    }

    /// Build the app over a signer that always fails.
    pub fn failing() -> Self {
        Self::with_signer(Arc::new(RecordingSigner::failing()))
    }

    fn with_signer(signer: Arc<RecordingSigner>) -> Self {
        let config = test_config();
        let state = AppState::with_signer(signer.clone(), &config);

        // Build the REAL router with all service routes (must match main.rs)
        let router = Router::new()
            .merge(monetix_api::routes::health::router())
            .merge(monetix_api::routes::media::router())
            .merge(monetix_api::routes::metrics::router())
            .layer(axum::middleware::from_fn_with_state(
                state.clone(),
                monetix_api::middleware::record_http_metrics,
            ))
            .with_state(state.clone());

        Self {
            router,
            signer,
            state,
        }
    }

    /// Send a request to the test application.
    pub async fn request(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request")
    }

    /// POST a JSON body to the presign endpoint.
    pub async fn presign(&self, body: Value) -> Response {
        self.request(
            Request::post("/media/presign")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration pointing at nothing real; the signer is always faked.
fn test_config() -> Config {
    Config {
        port: 0,
        cors_allowed_origins: vec!["*".to_string()],
        storage: StorageConfig {
            region: "nyc3".to_string(),
            endpoint: "https://nyc3.digitaloceanspaces.com".to_string(),
            access_key: "test-access".to_string(),
            secret_key: "test-secret".to_string(),
            bucket: "monetix-media".to_string(),
            public_base: TEST_PUBLIC_BASE.to_string(),
        },
    }
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body is not JSON")
}

/// Collect a response body as a string.
pub async fn body_string(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).expect("response body is not UTF-8")
}
