//! Media route handlers.

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use serde::Deserialize;

use crate::error::AppResult;
use crate::media::{MediaError, PresignedUpload};
use crate::state::AppState;

/// Owner recorded in object keys until authentication lands.
// TODO: take the owner from the authenticated session once login ships.
const PLACEHOLDER_OWNER_ID: &str = "demo-user";

/// Create the media router.
pub fn router() -> Router<AppState> {
    Router::new().route("/media/presign", post(presign_upload))
}

/// Presign request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresignRequest {
    pub filename: String,
    pub content_type: String,
}

/// Issue a presigned upload URL.
///
/// POST /media/presign
///
/// The client PUTs the file to `uploadUrl` itself; this endpoint never
/// sees the bytes.
async fn presign_upload(
    State(state): State<AppState>,
    Json(body): Json<PresignRequest>,
) -> AppResult<(StatusCode, Json<PresignedUpload>)> {
    let result = state
        .media()
        .presign_upload(PLACEHOLDER_OWNER_ID, &body.filename, &body.content_type)
        .await;

    match result {
        Ok(upload) => {
            state.metrics().record_presigned_upload();
            Ok((StatusCode::CREATED, Json(upload)))
        }
        Err(err) => {
            if matches!(err, MediaError::Signing(_)) {
                state.metrics().record_signing_failure();
            }
            Err(err.into())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn request_body_uses_camel_case() {
        let body: PresignRequest =
            serde_json::from_str(r#"{"filename":"a.png","contentType":"image/png"}"#).unwrap();
        assert_eq!(body.filename, "a.png");
        assert_eq!(body.content_type, "image/png");
    }
}
