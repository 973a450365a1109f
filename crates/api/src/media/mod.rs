//! Media uploads.
//!
//! [`service`] issues presigned upload URLs under stable `uploads/{owner}/`
//! keys; [`signer`] is the seam to the storage backend that actually signs
//! the requests.

pub mod service;
pub mod signer;

pub use service::{MediaError, MediaService, PresignedUpload, UPLOAD_URL_TTL};
pub use signer::{S3UploadSigner, UploadAccess, UploadSigner};
