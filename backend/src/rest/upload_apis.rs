use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::info;

use crate::error::ApiError;
use crate::rest::AppState;
use shared::UploadResponse;

/// Axum handler for POST /api/upload
///
/// Streams the multipart field named "file" to the image host and
/// replies with the hosted URL.
pub async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>), ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::InvalidRequest(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field
            .file_name()
            .unwrap_or("upload.bin")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::InvalidRequest(format!("Failed to read upload: {e}")))?;

        info!("POST /api/upload - {} ({} bytes)", file_name, bytes.len());

        let url = state.image_host.upload(file_name, bytes.to_vec()).await?;
        return Ok((StatusCode::OK, Json(UploadResponse { url })));
    }

    Err(ApiError::InvalidRequest("File is required".to_string()))
}
