use std::path::Path;

use axum::extract::{Multipart, State};
use axum::Json;
use uuid::Uuid;

use crate::api::ApiError;
use crate::error::RagError;
use crate::models::UploadResponse;
use crate::state::AppState;

/// Length of the random prefix on stored filenames.
const FILE_PREFIX_LEN: usize = 12;
/// Length of the generated document id.
const DOC_ID_LEN: usize = 10;

/// POST /api/upload — store the multipart `file` field on disk and hand back
/// a fresh document id.
///
/// The document id is independent of the stored filename; the browser keeps
/// it and sends it with the extracted page text to `/api/index`.
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Multipart error: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or("upload").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(format!("Failed to read file: {e}")))?;

        let stored_name = format!(
            "{}-{}",
            random_id(FILE_PREFIX_LEN),
            safe_file_name(&filename)
        );
        let path = state.config.upload_dir.join(stored_name);
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|e| ApiError::from_rag("upload_failed", RagError::Io(e)))?;

        tracing::info!(
            "Stored upload '{}' ({} bytes) at {}",
            filename,
            bytes.len(),
            path.display()
        );

        return Ok(Json(UploadResponse {
            doc_id: random_id(DOC_ID_LEN),
            filename,
            path: path.display().to_string(),
        }));
    }

    Err(ApiError::bad_request("No file"))
}

/// Random lowercase-hex id of `len` characters (at most 32).
fn random_id(len: usize) -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(len);
    id
}

/// Final path component of a client-supplied filename.
fn safe_file_name(name: &str) -> String {
    Path::new(&name.replace('\\', "/"))
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .unwrap_or("upload")
        .to_string()
}
