use axum::{
    Json,
    extract::{Multipart, State},
};
use serde_json::{Value, json};
use tracing::warn;

use teeform_core::NewSubmission;

use crate::{
    AppState,
    errors::{AppError, AppResult},
};

/// `POST /upload` — multipart submission of a design.
///
/// Fields: `file` (the binary), `position` and `size` (JSON strings),
/// optional `textOverlays` (JSON array string) and `canvas` (JSON
/// string; when present, position/size/overlays are pixels on that
/// canvas and get normalized). Validation failures are 400s with a
/// `{"error": msg}` body; a missing file is one of them.
pub async fn upload_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<Value>> {
    let mut submission = NewSubmission::default();
    let mut has_file = false;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| AppError::bad_request(format!("malformed multipart body: {err}")))?
    {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("file") => {
                submission.filename = field.file_name().map(str::to_owned);
                submission.content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_owned();
                submission.bytes = field
                    .bytes()
                    .await
                    .map_err(|err| {
                        AppError::bad_request(format!("failed to read file field: {err}"))
                    })?
                    .to_vec();
                has_file = true;
            }
            Some("position") => submission.position = Some(read_text(field).await?),
            Some("size") => submission.size = Some(read_text(field).await?),
            Some("textOverlays") => submission.text_overlays = Some(read_text(field).await?),
            Some("canvas") => submission.canvas = Some(read_text(field).await?),
            other => {
                warn!(field = other.unwrap_or("<unnamed>"), "ignoring unknown upload field");
            }
        }
    }

    if !has_file {
        return Err(AppError::bad_request("no file uploaded"));
    }

    let record = state.ingest.submit(submission).await?;

    Ok(Json(json!({
        "message": "File uploaded successfully",
        "fileUrl": record.asset_ref,
        "position": record.position,
        "size": record.size,
    })))
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> AppResult<String> {
    field
        .text()
        .await
        .map_err(|err| AppError::bad_request(format!("unreadable multipart field: {err}")))
}
