//! Room upload and analysis handler.

use std::path::Path as FsPath;
use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    Json,
};
use tracing::{info, warn};

use roomcraft_core::Room;

use crate::http::error::ApiError;
use crate::http::responses::RoomAnalyzeResponse;
use crate::state::AppState;

const ALLOWED_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp", "image/heic"];

/// Upload a room photograph and get a structured analysis.
///
/// POST /rooms/analyze (multipart, field `file`)
pub async fn analyze_room(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<RoomAnalyzeResponse>, ApiError> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let content_type = field.content_type().unwrap_or_default().to_string();
        if !ALLOWED_TYPES.contains(&content_type.as_str()) {
            return Err(ApiError::UnsupportedMediaType { content_type });
        }

        let filename = sanitize_filename(field.file_name());
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(format!("Failed to read upload: {e}")))?;

        if bytes.len() > state.config.upload_max_mb * 1024 * 1024 {
            return Err(ApiError::PayloadTooLarge {
                limit_mb: state.config.upload_max_mb,
            });
        }
        upload = Some((filename, bytes.to_vec()));
        break;
    }

    let (filename, bytes) = upload.ok_or_else(|| ApiError::bad_request("Missing 'file' field"))?;

    // Keep the upload so the frontend can show it next to the analysis.
    let uploads_dir = state.config.uploads_dir();
    let file_url = match save_upload(&uploads_dir, &filename, &bytes).await {
        Ok(()) => Some(format!(
            "{}/static/uploads/{filename}",
            state.config.public_url
        )),
        Err(e) => {
            warn!(error = %e, "Failed to store upload; continuing without file URL");
            None
        }
    };

    let analysis = state
        .provider
        .analyze_room(&bytes, &filename)
        .await
        .map_err(|e| ApiError::Provider {
            message: e.to_string(),
        })?;

    let room = Room::new(filename, file_url, analysis);
    info!(room_id = %room.id, room_type = %room.analysis.room_type, "Room analysed");
    state.insert_room(room.clone()).await;

    Ok(Json(RoomAnalyzeResponse::from_domain(&room)))
}

/// Strip any path components from a client-supplied filename.
fn sanitize_filename(name: Option<&str>) -> String {
    name.and_then(|n| FsPath::new(n).file_name())
        .and_then(|n| n.to_str())
        .unwrap_or("upload.jpg")
        .to_string()
}

async fn save_upload(dir: &FsPath, filename: &str, bytes: &[u8]) -> std::io::Result<()> {
    tokio::fs::create_dir_all(dir).await?;
    tokio::fs::write(dir.join(filename), bytes).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filename_strips_paths() {
        assert_eq!(sanitize_filename(Some("../../etc/passwd")), "passwd");
        assert_eq!(sanitize_filename(Some("room.jpg")), "room.jpg");
        assert_eq!(sanitize_filename(None), "upload.jpg");
    }
}
