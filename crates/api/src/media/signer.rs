//! Upload URL signing backends.
//!
//! The presign issuer talks to object storage through the narrow
//! [`UploadSigner`] capability, so tests can substitute a deterministic
//! fake for the real S3 client.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::types::ObjectCannedAcl;

use crate::config::StorageConfig;

/// Access level applied to the object once uploaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadAccess {
    /// Readable only with bucket credentials.
    Private,
    /// Readable by anyone holding the public URL.
    PublicRead,
}

impl UploadAccess {
    /// The canned ACL sent to S3-compatible backends.
    fn canned_acl(self) -> ObjectCannedAcl {
        match self {
            UploadAccess::Private => ObjectCannedAcl::Private,
            UploadAccess::PublicRead => ObjectCannedAcl::PublicRead,
        }
    }
}

/// Capability for producing signed upload URLs.
#[async_trait]
pub trait UploadSigner: Send + Sync {
    /// Sign a time-limited PUT of `content_type` to `key` in `bucket`.
    ///
    /// Signing is local cryptographic computation in the S3 SDK, but the
    /// call is async so implementations that do contact a backend stay
    /// valid.
    async fn presign_put_object(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
        access: UploadAccess,
        expires_in: Duration,
    ) -> Result<String>;
}

/// Signer backed by an S3-compatible service (Spaces, MinIO, AWS S3).
pub struct S3UploadSigner {
    client: aws_sdk_s3::Client,
}

impl S3UploadSigner {
    /// Build a signer from explicit credentials.
    ///
    /// Uses virtual-host addressing so signed URLs resolve the same way
    /// the public CDN in front of the bucket does.
    pub fn new(storage: &StorageConfig) -> Self {
        let credentials = Credentials::new(
            &storage.access_key,
            &storage.secret_key,
            None,
            None,
            "monetix-env",
        );

        let config = aws_sdk_s3::Config::builder()
            .behavior_version_latest()
            .region(Region::new(storage.region.clone()))
            .endpoint_url(&storage.endpoint)
            .credentials_provider(credentials)
            .force_path_style(false)
            .build();

        Self {
            client: aws_sdk_s3::Client::from_conf(config),
        }
    }
}

#[async_trait]
impl UploadSigner for S3UploadSigner {
    async fn presign_put_object(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
        access: UploadAccess,
        expires_in: Duration,
    ) -> Result<String> {
        let presigning =
            PresigningConfig::expires_in(expires_in).context("invalid presign expiry")?;

        let request = self
            .client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type(content_type)
            .acl(access.canned_acl())
            .presigned(presigning)
            .await
            .context("failed to presign PUT request")?;

        Ok(request.uri().to_string())
    }
}

impl std::fmt::Debug for S3UploadSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3UploadSigner").finish()
    }
}
