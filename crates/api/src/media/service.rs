//! Media presign service.
//!
//! Issues short-lived upload URLs so clients PUT files straight to object
//! storage; file bytes never pass through this API.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::config::StorageConfig;

use super::signer::{UploadAccess, UploadSigner};

/// How long a signed upload URL stays valid.
pub const UPLOAD_URL_TTL: Duration = Duration::from_secs(60);

/// Errors from the presign issuer.
#[derive(Debug, Error)]
pub enum MediaError {
    /// A request field was empty or missing.
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    /// The storage client failed to produce a signature.
    #[error("failed to sign upload URL")]
    Signing(#[source] anyhow::Error),
}

/// A signed upload slot returned to the caller.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresignedUpload {
    /// Object key the upload lands under.
    pub key: String,

    /// Signed PUT URL, valid for [`UPLOAD_URL_TTL`].
    pub upload_url: String,

    /// Where the object becomes publicly readable once uploaded, assuming
    /// bucket policy allows it; the issuer only predicts the location.
    pub public_url: String,

    /// Validity window of `upload_url`, in seconds.
    pub expires_in: u64,
}

/// Presign issuer for direct-to-storage uploads.
///
/// Stateless: every invocation is independent, keys owe their uniqueness
/// to a fresh random identifier, and nothing issued here is recorded
/// anywhere. Whether an upload actually happens is between the client and
/// the storage backend.
pub struct MediaService {
    signer: Arc<dyn UploadSigner>,
    bucket: String,
    public_base: String,
}

impl MediaService {
    /// Create a new media service over the given signer.
    pub fn new(signer: Arc<dyn UploadSigner>, storage: &StorageConfig) -> Self {
        Self {
            signer,
            bucket: storage.bucket.clone(),
            public_base: storage.public_base.trim_end_matches('/').to_string(),
        }
    }

    /// Issue a presigned upload URL for `filename` on behalf of `owner_id`.
    ///
    /// The object is signed private; the returned public URL only works
    /// where bucket policy makes the prefix readable.
    pub async fn presign_upload(
        &self,
        owner_id: &str,
        filename: &str,
        content_type: &str,
    ) -> Result<PresignedUpload, MediaError> {
        require_non_blank("ownerId", owner_id)?;
        require_non_blank("filename", filename)?;
        require_non_blank("contentType", content_type)?;

        let key = object_key(owner_id, Uuid::new_v4(), filename);

        let upload_url = self
            .signer
            .presign_put_object(
                &self.bucket,
                &key,
                content_type,
                UploadAccess::Private,
                UPLOAD_URL_TTL,
            )
            .await
            .map_err(MediaError::Signing)?;

        let public_url = format!("{}/{}", self.public_base, key);

        debug!(key = %key, content_type = %content_type, "issued presigned upload");

        Ok(PresignedUpload {
            key,
            upload_url,
            public_url,
            expires_in: UPLOAD_URL_TTL.as_secs(),
        })
    }
}

/// Reject empty or whitespace-only request fields.
fn require_non_blank(field: &'static str, value: &str) -> Result<(), MediaError> {
    if value.trim().is_empty() {
        return Err(MediaError::EmptyField { field });
    }
    Ok(())
}

/// Compose the storage key for an upload.
///
/// Both variable segments pass through [`sanitize_component`], so neither
/// an odd filename nor a free-form owner id can smuggle `/` or `..` into
/// the key.
fn object_key(owner_id: &str, id: Uuid, filename: &str) -> String {
    format!(
        "uploads/{}/{}-{}",
        sanitize_component(owner_id),
        id,
        sanitize_component(filename)
    )
}

/// Replace every character outside `[A-Za-z0-9._-]` with `_`.
///
/// One-to-one: characters are replaced, never dropped, so the output has
/// exactly as many characters as the input.
fn sanitize_component(part: &str) -> String {
    part.chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '.' | '-' | '_' => c,
            _ => '_',
        })
        .collect()
}

impl std::fmt::Debug for MediaService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaService")
            .field("bucket", &self.bucket)
            .field("public_base", &self.public_base)
            .finish()
    }
}
