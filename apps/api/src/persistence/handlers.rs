use anyhow::Context;
use axum::{
    extract::{Multipart, State},
    http::header,
    response::IntoResponse,
    Json,
};

use crate::editing::store::Revision;
use crate::errors::AppError;
use crate::persistence::codec::{encode_export, export_file_name};
use crate::state::AppState;

/// GET /api/v1/resume/export
/// Downloads the whole document as indented JSON.
pub async fn handle_export(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let doc = state.store.document();
    let body = encode_export(&doc).context("Failed to encode export")?;
    let file_name = export_file_name(&doc.personal_info.full_name);
    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        body,
    ))
}

/// POST /api/v1/resume/import
/// Multipart upload; the file goes in a part named `file`. The document is
/// replaced only if the file passes decoding and the shape check.
pub async fn handle_import(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Revision>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Could not read uploaded file: {e}")))?;
        let revision = state.store.import(&bytes).await?;
        return Ok(Json(revision));
    }

    Err(AppError::Validation(
        "Multipart body has no 'file' part".to_string(),
    ))
}
