use std::io::ErrorKind;
use std::sync::Arc;

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::error::ServerError;
use crate::AppState;

/// Pretty URLs and the HTML file each one serves. Query strings are ignored.
pub const PAGE_ROUTES: &[(&str, &str)] = &[
    ("/", "index.html"),
    ("/upb-presence", "upb-presence.html"),
    ("/seph-saveur", "seph-saveur.html"),
    ("/evaluation-numerique", "evaluation-numerique.html"),
];

pub async fn serve_html(state: Arc<AppState>, file: &'static str) -> Result<Response, ServerError> {
    let bytes = match tokio::fs::read(state.root.join(file)).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(ServerError::NotFound(format!("/{}", file)));
        }
        Err(e) => return Err(e.into()),
    };

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/html; charset=utf-8".to_string()),
            (header::CONTENT_LENGTH, bytes.len().to_string()),
        ],
        bytes,
    )
        .into_response())
}
