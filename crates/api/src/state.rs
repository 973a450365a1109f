//! Application state shared across all handlers.

use std::sync::Arc;

use crate::config::Config;
use crate::media::{MediaService, S3UploadSigner, UploadSigner};
use crate::metrics::Metrics;

/// Shared application state.
///
/// Wrapped in Arc internally so Clone is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Media presign service.
    media: Arc<MediaService>,

    /// Prometheus metrics.
    metrics: Arc<Metrics>,
}

impl AppState {
    /// Create new application state with the S3-backed signer.
    pub fn new(config: &Config) -> Self {
        let signer = Arc::new(S3UploadSigner::new(&config.storage));
        Self::with_signer(signer, config)
    }

    /// Create application state over a specific signer.
    ///
    /// Tests inject a deterministic signer here; production goes through
    /// [`AppState::new`].
    pub fn with_signer(signer: Arc<dyn UploadSigner>, config: &Config) -> Self {
        let media = Arc::new(MediaService::new(signer, &config.storage));
        let metrics = Arc::new(Metrics::new());

        Self {
            inner: Arc::new(AppStateInner { media, metrics }),
        }
    }

    /// Get the media service.
    pub fn media(&self) -> &Arc<MediaService> {
        &self.inner.media
    }

    /// Get the metrics registry.
    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.inner.metrics
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish()
    }
}
