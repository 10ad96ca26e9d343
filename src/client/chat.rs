//! The room chat log as a participant sees it.
//!
//! Besides typed messages the log carries system lines: roster changes from
//! [`PresenceView`](crate::presence::PresenceView), the lobby welcome, and a
//! line for every remote playback action or load the sync engine applied.

use crate::client::engine::Reaction;
use crate::protocol::{ClientEvent, ServerEvent};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatLine {
    /// Typed by this participant; shown without a name.
    Own(String),
    Peer { name: String, text: String },
    System(String),
}

#[derive(Debug, Clone, Default)]
pub struct ChatLog {
    room_id: String,
    lines: Vec<ChatLine>,
}

impl ChatLog {
    pub fn new(room_id: impl Into<String>) -> Self {
        Self { room_id: room_id.into(), lines: Vec::new() }
    }

    pub fn lines(&self) -> &[ChatLine] {
        &self.lines
    }

    /// Trim the input and echo it locally. Returns the frame to send, `None`
    /// when nothing but whitespace was typed.
    pub fn compose(&mut self, input: &str, timestamp: i64) -> Option<ClientEvent> {
        let text = input.trim();
        if text.is_empty() {
            return None;
        }
        self.lines.push(ChatLine::Own(text.to_string()));
        Some(ClientEvent::ChatMessage {
            room_id: Some(self.room_id.clone()),
            name: None,
            text: text.to_string(),
            timestamp,
        })
    }

    pub fn system(&mut self, text: impl Into<String>) {
        self.lines.push(ChatLine::System(text.into()));
    }

    /// Log a server event. `reaction` is what the sync engine made of it:
    /// playback lines are only written for events it actually applied.
    pub fn record(&mut self, ev: &ServerEvent, reaction: Reaction) -> Option<&ChatLine> {
        let line = match (ev, reaction) {
            (ServerEvent::ChatMessage { name, text, .. }, _) => {
                ChatLine::Peer { name: name.clone(), text: text.clone() }
            }
            (ServerEvent::MediaSync { action, media_kind, name, .. }, Reaction::Applied(_)) => {
                ChatLine::System(format!("{name} {} the {}", action.past_tense(), media_kind.as_str()))
            }
            (ServerEvent::MediaLoaded { media_kind, name, .. }, Reaction::Loaded { .. }) => {
                ChatLine::System(format!("{name} loaded {}", media_kind.as_str()))
            }
            _ => return None,
        };
        self.lines.push(line);
        self.lines.last()
    }
}
