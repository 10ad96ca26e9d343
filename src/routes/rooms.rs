use axum::{extract::Path, routing::get, Extension, Json, Router};
use serde_json::{json, Value};

use crate::{
    error::{AppErr, AppResult},
    state::{RoomSnapshot, RoomSummary, SharedRegistry},
};

pub fn router() -> Router {
    Router::new()
        .route("/rooms", get(list_rooms))
        .route("/room/:id", get(room_info))
        .route("/room/:id/validate", get(validate_room))
}

async fn list_rooms(Extension(rooms): Extension<SharedRegistry>) -> Json<Vec<RoomSummary>> {
    Json(rooms.summaries())
}

async fn room_info(
    Extension(rooms): Extension<SharedRegistry>,
    Path(id): Path<String>,
) -> AppResult<Json<RoomSnapshot>> {
    rooms.snapshot(&id).map(Json).ok_or(AppErr::NotFound)
}

/* existence only; used before a guest join */
async fn validate_room(
    Extension(rooms): Extension<SharedRegistry>,
    Path(id): Path<String>,
) -> Json<Value> {
    Json(json!({ "exists": rooms.validate(&id), "roomId": id }))
}
