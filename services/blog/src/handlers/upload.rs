use axum::{
    Json,
    extract::{Multipart, State, multipart::MultipartError},
    http::StatusCode,
};
use serde::Serialize;

use quill_auth_types::identity::Identity;

use crate::error::BlogServiceError;
use crate::state::AppState;
use crate::usecase::upload::SaveUploadUseCase;

/// Largest accepted multipart body.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

const FILE_FIELD: &str = "file";

#[derive(Serialize)]
pub struct UploadResponse {
    pub filename: String,
}

fn bad_multipart(e: MultipartError) -> BlogServiceError {
    BlogServiceError::validation(e.body_text())
}

// ── POST /file-upload ────────────────────────────────────────────────────────

pub async fn upload_file(
    _identity: Identity,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>), BlogServiceError> {
    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let original_name = field.file_name().map(str::to_owned);
        let data = field.bytes().await.map_err(bad_multipart)?;

        let usecase = SaveUploadUseCase {
            media_dir: state.media_dir.clone(),
        };
        let filename = usecase.execute(original_name.as_deref(), &data).await?;
        return Ok((StatusCode::CREATED, Json(UploadResponse { filename })));
    }
    Err(BlogServiceError::validation("multipart field `file` is required"))
}
