//! Media source classification.
//!
//! A loaded source is either an embed locator for a streaming platform
//! (YouTube) or anything else, which is handed to a direct player as-is
//! (served uploads, plain URLs). Locally picked files that were never
//! shared stay `Local`.

use std::path::PathBuf;

pub const EMBED_PREFIX: &str = "https://www.youtube.com/embed/";
const EMBED_MARKER: &str = "youtube.com/embed";
const VIDEO_ID_LEN: usize = 11;

/// Upload ceiling shared by the client pre-check and the server limit.
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024 * 1024;
/// Container formats accepted for upload.
pub const VIDEO_TYPES: [&str; 10] = ["mp4", "avi", "mov", "mkv", "webm", "flv", "wmv", "mpeg", "mpg", "3gp"];

/// URL fragments that precede a video id, tried in this order at each position.
const ID_MARKERS: [&str; 5] = ["youtu.be/", "v/", "embed/", "watch?v=", "&v="];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaSource {
    /// Streaming-platform embed, controlled by the platform's own player.
    Embed(String),
    /// Anything a direct media element can play.
    Direct(String),
    /// A file only this participant can play.
    Local(PathBuf),
}

impl MediaSource {
    /// Classify a source string received from a peer.
    pub fn classify(source: &str) -> Self {
        if source.contains(EMBED_MARKER) {
            MediaSource::Embed(source.to_string())
        } else {
            MediaSource::Direct(source.to_string())
        }
    }

    /// Turn user input into a shareable source: platform links become embeds.
    pub fn from_user_url(url: &str) -> Self {
        match extract_video_id(url) {
            Some(id) => MediaSource::Embed(embed_url(&id)),
            None => MediaSource::Direct(url.to_string()),
        }
    }

    pub fn is_direct(&self) -> bool {
        !matches!(self, MediaSource::Embed(_))
    }

    /// Locator to broadcast, `None` for local-only handles.
    pub fn locator(&self) -> Option<&str> {
        match self {
            MediaSource::Embed(s) | MediaSource::Direct(s) => Some(s),
            MediaSource::Local(_) => None,
        }
    }
}

pub fn embed_url(video_id: &str) -> String {
    format!("{EMBED_PREFIX}{video_id}")
}

/// Pull the 11-character video id out of a YouTube link.
///
/// The last marker occurrence wins; the id runs until `#`, `&` or `?`.
/// Anything that is not exactly 11 characters long is rejected.
pub fn extract_video_id(url: &str) -> Option<String> {
    let starts: Vec<usize> = url.char_indices().map(|(i, _)| i).collect();
    for &at in starts.iter().rev() {
        let rest = &url[at..];
        let Some(tail) = match_marker(rest) else { continue };
        let id: String = tail.chars().take_while(|c| !matches!(c, '#' | '&' | '?')).collect();
        return (id.chars().count() == VIDEO_ID_LEN).then_some(id);
    }
    None
}

fn match_marker(s: &str) -> Option<&str> {
    for marker in ID_MARKERS {
        if let Some(tail) = s.strip_prefix(marker) {
            return Some(tail);
        }
        // `u/<word char>/` sits between `v/` and `embed/` in precedence
        if marker == "v/" {
            if let Some(tail) = user_path(s) {
                return Some(tail);
            }
        }
    }
    None
}

fn user_path(s: &str) -> Option<&str> {
    let rest = s.strip_prefix("u/")?;
    let mut chars = rest.char_indices();
    let (_, c) = chars.next()?;
    if !(c.is_ascii_alphanumeric() || c == '_') {
        return None;
    }
    let (slash_at, slash) = chars.next()?;
    (slash == '/').then(|| &rest[slash_at + 1..])
}

/// Uploads must carry a known video extension and a video mimetype.
pub fn accepts_upload(file_name: &str, mime: &str) -> bool {
    let ext = std::path::Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    let ext_ok = ext.is_some_and(|e| VIDEO_TYPES.contains(&e.as_str()));
    let mime = mime.to_ascii_lowercase();
    let mime_ok = mime.starts_with("video/") || VIDEO_TYPES.iter().any(|t| mime.contains(t));
    ext_ok && mime_ok
}
