//! Sharing a local file with the room.
//!
//! Oversized or non-video files are rejected before any bytes leave the
//! machine. Whatever the reason an upload fails, the participant keeps a
//! local-only handle so they can still watch.

use std::future::Future;
use std::path::{Path, PathBuf};

use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::warn;

use crate::media::{accepts_upload, MediaSource, MAX_UPLOAD_BYTES};

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("File too large: {size} bytes (maximum is 5GB)")]
    TooLarge { size: u64 },
    #[error("Only video files are allowed: {0}")]
    Unsupported(String),
    #[error("IO: {0}")]
    Io(#[from] std::io::Error),
    #[error("HTTP: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Upload failed: {0}")]
    Rejected(String),
}

/// Local checks, no network.
pub fn precheck(file_name: &str, size: u64) -> Result<(), UploadError> {
    if size > MAX_UPLOAD_BYTES {
        return Err(UploadError::TooLarge { size });
    }
    let mime = mime_guess::from_path(file_name).first_or_octet_stream();
    if !accepts_upload(file_name, mime.essence_str()) {
        return Err(UploadError::Unsupported(file_name.to_string()));
    }
    Ok(())
}

/// Blob store reachable from the client: bytes in, served URL out.
pub trait Uploader {
    fn upload(&self, path: &Path) -> impl Future<Output = Result<String, UploadError>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// Everyone in the room can load this.
    Shared(MediaSource),
    /// Only the uploader can play it; `reason` goes to the chat log.
    LocalOnly { source: MediaSource, reason: String },
}

impl UploadOutcome {
    pub fn source(&self) -> &MediaSource {
        match self {
            UploadOutcome::Shared(s) | UploadOutcome::LocalOnly { source: s, .. } => s,
        }
    }
}

pub async fn share_file<U: Uploader>(uploader: &U, path: &Path, size: u64) -> UploadOutcome {
    let local = || MediaSource::Local(path.to_path_buf());
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    let result = match precheck(name, size) {
        Ok(()) => uploader.upload(path).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(url) => UploadOutcome::Shared(MediaSource::Direct(url)),
        Err(e) => {
            warn!(file = %path.display(), error = %e, "upload failed, keeping local copy");
            UploadOutcome::LocalOnly { source: local(), reason: e.to_string() }
        }
    }
}

/// Multipart `POST /api/upload`, file field `video`.
#[derive(Clone)]
pub struct HttpUploader {
    base: String,
    http: reqwest::Client,
}

#[derive(Deserialize)]
struct UploadReply {
    #[serde(default)]
    success: bool,
    url: Option<String>,
    message: Option<String>,
    error: Option<String>,
}

impl HttpUploader {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into().trim_end_matches('/').to_string(), http: reqwest::Client::new() }
    }
}

impl Uploader for HttpUploader {
    async fn upload(&self, path: &Path) -> Result<String, UploadError> {
        let path: PathBuf = path.to_path_buf();
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("upload").to_string();
        let mime = mime_guess::from_path(&path).first_or_octet_stream();
        let file = tokio::fs::File::open(&path).await?;
        let len = file.metadata().await?.len();

        let part = Part::stream_with_length(reqwest::Body::from(file), len)
            .file_name(name)
            .mime_str(mime.essence_str())?;
        let reply: UploadReply = self
            .http
            .post(format!("{}/api/upload", self.base))
            .multipart(Form::new().part("video", part))
            .send()
            .await?
            .json()
            .await?;

        match reply {
            UploadReply { success: true, url: Some(url), .. } => Ok(url),
            UploadReply { message, error, .. } => {
                Err(UploadError::Rejected(message.or(error).unwrap_or_else(|| "unknown error".into())))
            }
        }
    }
}
