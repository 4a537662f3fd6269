use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::StatusCode;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::services::member::set_member_avatar;
use crate::state::AppState;

/// Body limit layer for the avatar upload route (10 MiB).
pub fn avatar_upload_body_limit() -> DefaultBodyLimit {
    DefaultBodyLimit::max(10 * 1024 * 1024)
}

#[utoipa::path(
    post,
    path = "/uploadAvatar",
    tag = "Members",
    operation_id = "uploadAvatar",
    summary = "Replace the avatar of a member",
    description = "Multipart form with a `memberId` text field and a `file` part. \
        The file replaces the member's current avatar, or becomes the first one.",
    request_body(content_type = "multipart/form-data", description = "Member id and image file"),
    responses(
        (status = 200, description = "Avatar stored"),
        (status = 400, description = "Missing or invalid field (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Member not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, multipart))]
pub async fn upload_avatar(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<StatusCode, AppError> {
    let mut member_id: Option<i64> = None;
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        match field.name() {
            Some("memberId") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read memberId: {e}")))?;
                let id = text
                    .trim()
                    .parse()
                    .map_err(|_| AppError::Validation(format!("Invalid memberId: {text}")))?;
                member_id = Some(id);
            }
            Some("file") => {
                let filename = field
                    .file_name()
                    .map(str::to_string)
                    .unwrap_or_else(|| "avatar".to_string());
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read file: {e}")))?;
                upload = Some((filename, bytes.to_vec()));
            }
            _ => {} // Ignore unknown fields.
        }
    }

    let member_id =
        member_id.ok_or_else(|| AppError::Validation("Missing 'memberId' field".into()))?;
    let (filename, bytes) =
        upload.ok_or_else(|| AppError::Validation("Missing 'file' field".into()))?;
    if bytes.is_empty() {
        return Err(AppError::Validation("Uploaded file is empty".into()));
    }

    set_member_avatar(&state.db, member_id, filename, bytes).await?;
    tracing::info!(member_id, "Avatar uploaded");
    Ok(StatusCode::OK)
}
