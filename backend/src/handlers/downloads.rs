use std::io::ErrorKind;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::error::ServerError;
use crate::AppState;

pub const DOWNLOADS_DIR: &str = "downloads";

pub fn content_type_for(filename: &str) -> &'static str {
    if filename.ends_with(".apk") {
        "application/vnd.android.package-archive"
    } else if filename.ends_with(".zip") {
        "application/zip"
    } else {
        "application/octet-stream"
    }
}

/// `/downloads/...`: only the last path segment names the file, which is
/// always looked up directly inside the downloads directory.
pub async fn download(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
) -> Result<Response, ServerError> {
    let filename = path.rsplit('/').next().unwrap_or_default();
    if filename.is_empty() || filename == "." || filename == ".." {
        return Err(ServerError::NotFound(path));
    }

    let file_path = state.root.join(DOWNLOADS_DIR).join(filename);
    let bytes = match tokio::fs::read(&file_path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(ServerError::NotFound(filename.to_string()));
        }
        Err(e) => return Err(e.into()),
    };
    tracing::info!("Serving download {} ({} bytes)", filename, bytes.len());

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type_for(filename).to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
            (header::CONTENT_LENGTH, bytes.len().to_string()),
        ],
        bytes,
    )
        .into_response())
}
