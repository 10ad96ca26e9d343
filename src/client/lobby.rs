//! Joining a room from the participant's side.
//!
//! Input is checked locally before anything touches the network. An empty
//! room field means "host a new room": an id is generated and retried until
//! the server reports it free. Otherwise the room must already exist.

use std::future::Future;

use anyhow::Context;
use serde::Deserialize;
use tracing::info;

use crate::protocol::ClientEvent;
use crate::utils::room_id;

/// Generation attempts before giving up on finding a free id.
pub const MAX_ID_ATTEMPTS: usize = 8;

#[derive(Debug, thiserror::Error)]
pub enum JoinError {
    #[error("Please enter your name")]
    MissingName,
    #[error("Invalid Room ID format. Room ID must be 4-10 characters long and contain only letters and numbers.")]
    InvalidRoomId,
    #[error("Room \"{0}\" does not exist. Please check the Room ID and try again.")]
    RoomNotFound(String),
    #[error("no free room id after {MAX_ID_ATTEMPTS} attempts")]
    NoFreeRoomId,
    #[error("Unable to validate room: {0:#}")]
    Directory(#[from] anyhow::Error),
}

/// Existence lookups against the server's registry.
pub trait RoomDirectory {
    fn exists(&self, room_id: &str) -> impl Future<Output = anyhow::Result<bool>> + Send;
}

/// `GET /api/room/:id/validate` over HTTP.
#[derive(Clone)]
pub struct HttpDirectory {
    base: String,
    http: reqwest::Client,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Validation {
    exists: bool,
    #[allow(dead_code)]
    room_id: String,
}

impl HttpDirectory {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into().trim_end_matches('/').to_string(), http: reqwest::Client::new() }
    }
}

impl RoomDirectory for HttpDirectory {
    async fn exists(&self, room_id: &str) -> anyhow::Result<bool> {
        let url = format!("{}/api/room/{room_id}/validate", self.base);
        let v: Validation = self
            .http
            .get(&url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .with_context(|| format!("GET {url}"))?
            .json()
            .await
            .context("bad validate response")?;
        Ok(v.exists)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinPlan {
    Host { room_id: String, name: String },
    Guest { room_id: String, name: String },
}

impl JoinPlan {
    pub fn room_id(&self) -> &str {
        match self {
            JoinPlan::Host { room_id, .. } | JoinPlan::Guest { room_id, .. } => room_id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            JoinPlan::Host { name, .. } | JoinPlan::Guest { name, .. } => name,
        }
    }

    pub fn is_host(&self) -> bool {
        matches!(self, JoinPlan::Host { .. })
    }

    pub fn join_event(&self) -> ClientEvent {
        ClientEvent::JoinRoom { room_id: self.room_id().to_string(), name: self.name().to_string() }
    }

    /// Welcome line for the local chat log.
    pub fn welcome(&self) -> String {
        match self {
            JoinPlan::Host { room_id, name } => format!("Welcome {name}! You created room {room_id}"),
            JoinPlan::Guest { room_id, name } => format!("Welcome {name}! You joined room {room_id}"),
        }
    }
}

/// Local checks only. Returns the trimmed name and the requested room, if any.
pub fn check_input(name: &str, room_input: &str) -> Result<(String, Option<String>), JoinError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(JoinError::MissingName);
    }
    let room = room_input.trim();
    if room.is_empty() {
        return Ok((name.to_string(), None));
    }
    if !room_id::is_valid(room) {
        return Err(JoinError::InvalidRoomId);
    }
    Ok((name.to_string(), Some(room.to_string())))
}

pub async fn plan_join<D: RoomDirectory>(dir: &D, name: &str, room_input: &str) -> Result<JoinPlan, JoinError> {
    let (name, room) = check_input(name, room_input)?;
    match room {
        Some(room_id) => {
            if dir.exists(&room_id).await? {
                Ok(JoinPlan::Guest { room_id, name })
            } else {
                Err(JoinError::RoomNotFound(room_id))
            }
        }
        None => {
            for _ in 0..MAX_ID_ATTEMPTS {
                let room_id = room_id::generate();
                if !dir.exists(&room_id).await? {
                    info!(room = %room_id, "hosting new room");
                    return Ok(JoinPlan::Host { room_id, name });
                }
            }
            Err(JoinError::NoFreeRoomId)
        }
    }
}
