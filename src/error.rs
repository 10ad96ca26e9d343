use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::fmt::Display;

pub type AppResult<T> = Result<T, AppErr>;

#[derive(thiserror::Error, Debug)]
pub enum AppErr {
    #[error("Bad request: {0}")]
    Bad(String),

    #[error("Room not found")]
    NotFound,

    #[error("Maximum file size is {limit} bytes")]
    TooLarge { limit: u64 },

    #[error("Only video files are allowed")]
    Unsupported,

    #[error("Config: {0}")]
    Config(String),

    #[error("IO: {0}")]
    Io(#[from] std::io::Error),
}

impl AppErr {
    fn status(&self) -> (StatusCode, &'static str) {
        match self {
            AppErr::Bad(_)          => (StatusCode::BAD_REQUEST, "Bad request"),
            AppErr::NotFound        => (StatusCode::NOT_FOUND, "Room not found"),
            AppErr::TooLarge { .. } => (StatusCode::PAYLOAD_TOO_LARGE, "File too large"),
            AppErr::Unsupported     => (StatusCode::UNSUPPORTED_MEDIA_TYPE, "Unsupported file type"),
            AppErr::Config(_) | AppErr::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal error"),
        }
    }
}

impl IntoResponse for AppErr {
    fn into_response(self) -> axum::response::Response {
        let (code, error) = self.status();
        if code.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (code, Json(json!({ "error": error, "message": self.to_string() }))).into_response()
    }
}

/* ── helpers: turn any error into Bad / Io ── */
pub fn bad<E: Display>(e: E) -> AppErr { AppErr::Bad(e.to_string()) }
pub fn io<E: Into<std::io::Error>>(e: E) -> AppErr {
    AppErr::Io(e.into())
}
