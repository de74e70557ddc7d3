use std::path::{Path, PathBuf};

use anyhow::Context as _;
use uuid::Uuid;

use crate::error::BlogServiceError;

/// Public URL prefix uploads are served under.
pub const MEDIA_URL_PREFIX: &str = "/media";

/// Keep the extension of the client's file name if it looks sane.
fn extension_of(original_name: Option<&str>) -> Option<String> {
    let ext = Path::new(original_name?).extension()?.to_str()?;
    let ok = !ext.is_empty() && ext.len() <= 10 && ext.chars().all(|c| c.is_ascii_alphanumeric());
    ok.then(|| ext.to_ascii_lowercase())
}

pub struct SaveUploadUseCase {
    pub media_dir: PathBuf,
}

impl SaveUploadUseCase {
    /// Write `data` under a fresh random name and return its public path (`/media/<name>`).
    pub async fn execute(
        &self,
        original_name: Option<&str>,
        data: &[u8],
    ) -> Result<String, BlogServiceError> {
        if data.is_empty() {
            return Err(BlogServiceError::validation("file is empty"));
        }
        let file_name = match extension_of(original_name) {
            Some(ext) => format!("{}.{ext}", Uuid::new_v4()),
            None => Uuid::new_v4().to_string(),
        };

        tokio::fs::create_dir_all(&self.media_dir)
            .await
            .context("create media dir")?;
        tokio::fs::write(self.media_dir.join(&file_name), data)
            .await
            .context("write uploaded file")?;

        Ok(format!("{MEDIA_URL_PREFIX}/{file_name}"))
    }
}
