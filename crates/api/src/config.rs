//! Configuration loaded from environment variables.

use std::env;

use anyhow::{Context, Result};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port (default: 3000).
    pub port: u16,

    /// CORS allowed origins (comma-separated, default: "*").
    pub cors_allowed_origins: Vec<String>,

    /// Object storage settings.
    pub storage: StorageConfig,
}

/// Object storage credentials and endpoints.
///
/// Read once at startup and never mutated afterwards; the presign issuer
/// receives it explicitly at construction time rather than reading the
/// environment itself.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Storage region (e.g. "nyc3").
    pub region: String,

    /// Storage API endpoint the signer targets.
    pub endpoint: String,

    /// Access key id.
    pub access_key: String,

    /// Secret access key.
    pub secret_key: String,

    /// Bucket uploads are presigned against.
    pub bucket: String,

    /// Public base URL where uploaded objects become readable
    /// (default: the storage endpoint).
    pub public_base: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Every storage variable except `S3_PUBLIC_BASE` is required: a
    /// process without signing credentials must refuse to start rather
    /// than fail per-request.
    pub fn from_env() -> Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .context("PORT must be a valid u16")?;

        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .map(|v| v.split(',').map(|s| s.trim().to_string()).collect())
            .unwrap_or_else(|_| vec!["*".to_string()]);

        let region =
            env::var("S3_REGION").context("S3_REGION environment variable is required")?;

        let endpoint =
            env::var("S3_ENDPOINT").context("S3_ENDPOINT environment variable is required")?;

        let access_key =
            env::var("S3_ACCESS_KEY").context("S3_ACCESS_KEY environment variable is required")?;

        let secret_key =
            env::var("S3_SECRET_KEY").context("S3_SECRET_KEY environment variable is required")?;

        let bucket =
            env::var("S3_BUCKET").context("S3_BUCKET environment variable is required")?;

        let public_base = env::var("S3_PUBLIC_BASE").unwrap_or_else(|_| endpoint.clone());

        Ok(Self {
            port,
            cors_allowed_origins,
            storage: StorageConfig {
                region,
                endpoint,
                access_key,
                secret_key,
                bucket,
                public_base,
            },
        })
    }
}
