use std::path::{Path, PathBuf};

use axum::{
    extract::multipart::{Field, Multipart},
    http::StatusCode,
    routing::post,
    Extension, Json, Router,
};
use bytes::Bytes;
use chrono::Utc;
use serde_json::{json, Value};
use tokio::{fs::{self, File}, io::AsyncWriteExt};
use tracing::{info, warn};

use crate::{
    error::{bad, io, AppErr, AppResult},
    media::accepts_upload,
    state::{MediaEntry, MediaLog},
};

/// Multipart field carrying the file.
pub const FILE_FIELD: &str = "video";

/// Upload blob store: writes bytes under `dir`, hands back a served locator.
#[derive(Clone, Debug)]
pub struct DiskStore {
    dir: PathBuf,
    max_bytes: u64,
}

#[derive(Debug)]
pub struct StoredBlob {
    pub path: PathBuf,
    pub filename: String,
    pub url: String,
    pub size: u64,
}

impl DiskStore {
    pub fn new(dir: impl AsRef<Path>, max_bytes: u64) -> Self {
        Self { dir: dir.as_ref().to_path_buf(), max_bytes }
    }

    /// Stream one field to disk. Partial files are removed on failure.
    pub async fn store(&self, field: &mut Field<'_>, ext: &str) -> AppResult<StoredBlob> {
        fs::create_dir_all(&self.dir).await.map_err(io)?;
        let filename = format!("{}-{}.{ext}", Utc::now().timestamp_millis(), uuid::Uuid::new_v4().simple());
        let path = self.dir.join(&filename);

        match self.write(field, &path).await {
            Ok(size) => Ok(StoredBlob { url: format!("/uploads/{filename}"), path, filename, size }),
            Err(e) => {
                fs::remove_file(&path).await.ok();
                Err(e)
            }
        }
    }

    async fn write(&self, field: &mut Field<'_>, path: &Path) -> AppResult<u64> {
        let mut file = File::create(path).await.map_err(io)?;
        let mut size: u64 = 0;
        loop {
            let chunk: Bytes = match field.chunk().await {
                Ok(Some(c)) => c,
                Ok(None) => break,
                Err(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                    return Err(AppErr::TooLarge { limit: self.max_bytes })
                }
                Err(e) => return Err(bad(e)),
            };
            size += chunk.len() as u64;
            if size > self.max_bytes {
                return Err(AppErr::TooLarge { limit: self.max_bytes });
            }
            file.write_all(&chunk).await.map_err(io)?;
        }
        file.flush().await.map_err(io)?;
        Ok(size)
    }
}

pub fn router() -> Router {
    Router::new().route("/upload", post(upload_file))
}

pub async fn upload_file(
    Extension(store): Extension<DiskStore>,
    Extension(media): Extension<MediaLog>,
    mut mp: Multipart,
) -> AppResult<Json<Value>> {
    let mut field = loop {
        match mp.next_field().await.map_err(bad)? {
            Some(f) if f.name() == Some(FILE_FIELD) => break f,
            Some(_) => continue,
            None => return Err(bad("No file uploaded")),
        }
    };

    let original = field.file_name().unwrap_or_default().to_string();
    let mime = field.content_type().unwrap_or("application/octet-stream").to_string();
    if !accepts_upload(&original, &mime) {
        warn!(file = %original, %mime, "upload rejected: not a video");
        return Err(AppErr::Unsupported);
    }
    let ext = Path::new(&original)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_else(|| "bin".into());

    let blob = store.store(&mut field, &ext).await.inspect_err(|e| {
        warn!(file = %original, error = %e, "upload failed");
    })?;
    media.write().await.push_back(MediaEntry { path: blob.path.clone(), size: blob.size });
    info!(file = %original, stored = %blob.filename, size = blob.size, "file uploaded");

    Ok(Json(json!({
        "success": true,
        "url": blob.url,
        "filename": blob.filename,
        "originalName": original,
        "size": blob.size,
    })))
}
