use axum::{extract::DefaultBodyLimit, Extension, Router};
use tower_http::{limit::RequestBodyLimitLayer, services::ServeDir, trace::TraceLayer};

use crate::{config::Config, relay::Relay, state::MediaLog};

pub mod rooms;
pub mod upload;
pub mod ws;

/// Multipart framing around the file itself.
const MULTIPART_SLACK: u64 = 1024 * 1024;

pub fn router() -> Router {
    Router::new()
        .nest("/api", rooms::router().merge(upload::router()))
        .merge(ws::router())
}

/// Full application: API, websocket, served uploads and the front-end.
pub fn app(cfg: &Config, relay: Relay, media: MediaLog) -> Router {
    let body_limit = usize::try_from(cfg.upload_max_bytes + MULTIPART_SLACK).unwrap_or(usize::MAX);
    let store = upload::DiskStore::new(&cfg.upload_dir, cfg.upload_max_bytes);

    router()
        .nest_service("/uploads", ServeDir::new(&cfg.upload_dir))
        .fallback_service(ServeDir::new(&cfg.static_dir))
        .layer(Extension(relay.registry().clone()))
        .layer(Extension(relay))
        .layer(Extension(media))
        .layer(Extension(store))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(TraceLayer::new_for_http())
}
