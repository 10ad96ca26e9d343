//! Wire events exchanged over the room websocket.
//!
//! Every frame is a JSON object tagged by `type`:
//!
//! ```text
//! client → server   joinRoom  mediaEvent  mediaLoad  chatMessage  requestSync
//! server → client   roomJoined  roomState  userJoined  userLeft
//!                   mediaSync  mediaLoaded  chatMessage  syncResponse
//! ```

use serde::{Deserialize, Serialize};

/// Which player a media event or load targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Video,
    Audio,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaAction {
    Play,
    Pause,
    Seek,
}

impl MediaKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MediaKind::Video => "video",
            MediaKind::Audio => "audio",
        }
    }
}

impl MediaAction {
    /// Verb for the chat log ("played the video").
    pub fn past_tense(self) -> &'static str {
        match self {
            MediaAction::Play => "played",
            MediaAction::Pause => "paused",
            MediaAction::Seek => "seeked",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MediaAction::Play => "play",
            MediaAction::Pause => "pause",
            MediaAction::Seek => "seek",
        }
    }
}

/// Authoritative playback snapshot of a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaState {
    pub is_playing: bool,
    pub position: f64,
    /// Sender-side wall clock (ms) of the last accepted event. Display only.
    pub last_update: i64,
    pub media_kind: Option<MediaKind>,
    /// Per-room counter, bumped on every accepted media event.
    pub seq: u64,
}

impl MediaState {
    pub fn new(now_ms: i64) -> Self {
        Self { is_playing: false, position: 0.0, last_update: now_ms, media_kind: None, seq: 0 }
    }
}

/// A source loaded into one of the room's players.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadedMedia {
    pub source: String,
    pub loaded_by: String,
    pub loaded_at: i64,
}

/// Current media per kind. Serialized as `null` on the wire when nothing is loaded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaDescriptor {
    pub video: Option<LoadedMedia>,
    pub audio: Option<LoadedMedia>,
}

impl MediaDescriptor {
    pub fn get(&self, kind: MediaKind) -> Option<&LoadedMedia> {
        match kind {
            MediaKind::Video => self.video.as_ref(),
            MediaKind::Audio => self.audio.as_ref(),
        }
    }

    pub fn set(&mut self, kind: MediaKind, media: LoadedMedia) {
        match kind {
            MediaKind::Video => self.video = Some(media),
            MediaKind::Audio => self.audio = Some(media),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.video.is_none() && self.audio.is_none()
    }
}

/* ------------ client → server ------------ */
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ClientEvent {
    JoinRoom {
        room_id: String,
        name: String,
    },
    MediaEvent {
        room_id: String,
        action: MediaAction,
        media_kind: MediaKind,
        position: f64,
        timestamp: i64,
    },
    MediaLoad {
        room_id: String,
        media_kind: MediaKind,
        source: String,
    },
    /// `name` is accepted for wire compatibility but never trusted.
    ChatMessage {
        #[serde(default)]
        room_id: Option<String>,
        #[serde(default)]
        name: Option<String>,
        text: String,
        timestamp: i64,
    },
    RequestSync {
        room_id: String,
    },
}

/* ------------ server → client ------------ */
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ServerEvent {
    RoomJoined {
        room_id: String,
        name: String,
        count: usize,
        media_descriptor: Option<MediaDescriptor>,
        media_state: MediaState,
    },
    RoomState {
        count: usize,
        all_names: Vec<String>,
        media_descriptor: Option<MediaDescriptor>,
        media_state: MediaState,
    },
    UserJoined {
        name: String,
        count: usize,
        all_names: Vec<String>,
    },
    UserLeft {
        name: String,
        count: usize,
        all_names: Vec<String>,
    },
    MediaSync {
        action: MediaAction,
        media_kind: MediaKind,
        position: f64,
        timestamp: i64,
        name: String,
        seq: u64,
    },
    MediaLoaded {
        media_kind: MediaKind,
        source: String,
        name: String,
    },
    ChatMessage {
        name: String,
        text: String,
        timestamp: i64,
    },
    SyncResponse {
        media_descriptor: Option<MediaDescriptor>,
        media_state: MediaState,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn media_event_uses_camel_case_tag_and_fields() {
        let raw = json!({
            "type": "mediaEvent",
            "roomId": "ABC123",
            "action": "pause",
            "mediaKind": "video",
            "position": 42.5,
            "timestamp": 1_700_000_000_000i64
        });
        let ev: ClientEvent = serde_json::from_value(raw).unwrap();
        assert_eq!(
            ev,
            ClientEvent::MediaEvent {
                room_id: "ABC123".into(),
                action: MediaAction::Pause,
                media_kind: MediaKind::Video,
                position: 42.5,
                timestamp: 1_700_000_000_000,
            }
        );
    }

    #[test]
    fn chat_without_room_or_name_parses() {
        let ev: ClientEvent =
            serde_json::from_str(r#"{"type":"chatMessage","text":"hi","timestamp":1}"#).unwrap();
        assert!(matches!(ev, ClientEvent::ChatMessage { room_id: None, name: None, .. }));
    }

    #[test]
    fn empty_descriptor_is_null_on_the_wire() {
        let ev = ServerEvent::RoomJoined {
            room_id: "ABCD".into(),
            name: "B".into(),
            count: 2,
            media_descriptor: None,
            media_state: MediaState::new(0),
        };
        let v = serde_json::to_value(&ev).unwrap();
        assert_eq!(v["type"], "roomJoined");
        assert!(v["mediaDescriptor"].is_null());
        assert_eq!(v["mediaState"]["isPlaying"], false);
    }
}
