//! Event relay: validates client events, applies them to the registry and
//! fans them out to the other members of the sender's room.
//!
//! The sender never receives its own `mediaSync`, `mediaLoaded` or chat
//! line back, and its display name always comes from the name it joined
//! with, never from the payload.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::presence;
use crate::protocol::{ClientEvent, MediaAction, MediaKind, ServerEvent};
use crate::state::{ConnId, Outbox, Participant, SharedRegistry};
use crate::utils::room_id;

/// Room and name a connection joined with. Kept for the whole connection so
/// a bare disconnect can still be announced.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub room_id: String,
    pub name: String,
}

/// Per-connection context owned by the transport task.
#[derive(Debug)]
pub struct Session {
    pub conn: ConnId,
    outbox: Outbox,
    binding: Option<Binding>,
}

impl Session {
    pub fn new(outbox: Outbox) -> Self {
        Self { conn: Uuid::new_v4(), outbox, binding: None }
    }

    pub fn binding(&self) -> Option<&Binding> {
        self.binding.as_ref()
    }
}

#[derive(Clone)]
pub struct Relay {
    registry: SharedRegistry,
    closing: Arc<watch::Sender<bool>>,
}

impl Relay {
    pub fn new(registry: SharedRegistry) -> Self {
        let (closing, _) = watch::channel(false);
        Self { registry, closing: Arc::new(closing) }
    }

    pub fn registry(&self) -> &SharedRegistry {
        &self.registry
    }

    /// Flips to `true` once the relay is shutting down.
    pub fn closing(&self) -> watch::Receiver<bool> {
        self.closing.subscribe()
    }

    /// Stop accepting traffic and tear the registry down.
    pub fn close(&self) {
        self.closing.send_replace(true);
        self.registry.shutdown();
    }

    pub fn handle(&self, session: &mut Session, ev: ClientEvent) {
        match ev {
            ClientEvent::JoinRoom { room_id, name } => self.join(session, room_id, name),
            ClientEvent::MediaEvent { room_id, action, media_kind, position, timestamp } => {
                self.media_event(session, &room_id, action, media_kind, position, timestamp)
            }
            ClientEvent::MediaLoad { room_id, media_kind, source } => {
                self.media_load(session, &room_id, media_kind, &source)
            }
            ClientEvent::ChatMessage { room_id, text, timestamp, .. } => {
                self.chat(session, room_id.as_deref(), text, timestamp)
            }
            ClientEvent::RequestSync { room_id } => self.request_sync(session, &room_id),
        }
    }

    /// Transport-level disconnect, treated exactly like a leave.
    pub fn disconnect(&self, session: &mut Session) {
        if let Some(b) = session.binding.take() {
            self.registry.leave(&b.room_id, session.conn, presence::announce_leave);
        }
    }

    fn join(&self, session: &mut Session, room_id: String, name: String) {
        let name = name.trim().to_string();
        if !room_id::is_valid(&room_id) || name.is_empty() {
            warn!(conn = %session.conn, room = %room_id, "rejected malformed join");
            return;
        }
        let participant = Participant::new(session.conn, name.clone(), session.outbox.clone());
        let same_room = session.binding.as_ref().is_some_and(|b| b.room_id == room_id);
        if same_room {
            // already a member: replace in place, no leave/join churn
            let room = self.registry.join(&room_id, participant);
            presence::announce_rejoin(&room, session.conn);
        } else {
            // a connection sits in at most one room
            self.disconnect(session);
            let room = self.registry.join(&room_id, participant);
            presence::announce_join(&room, session.conn);
        }
        session.binding = Some(Binding { room_id, name });
    }

    /// Resolve the sender's room; drops events aimed at a room it is not in.
    fn bound<'a>(&self, session: &'a Session, claimed: Option<&str>) -> Option<&'a Binding> {
        let b = session.binding.as_ref()?;
        match claimed {
            Some(r) if r != b.room_id => {
                debug!(conn = %session.conn, claimed = r, bound = %b.room_id, "event for foreign room dropped");
                None
            }
            _ => Some(b),
        }
    }

    fn media_event(
        &self,
        session: &Session,
        room_id: &str,
        action: MediaAction,
        kind: MediaKind,
        position: f64,
        timestamp: i64,
    ) {
        let Some(b) = self.bound(session, Some(room_id)) else { return };
        if !position.is_finite() || position < 0.0 {
            warn!(conn = %session.conn, position, "media event with bad position dropped");
            return;
        }
        let Some(room) = self.registry.apply_media_event(&b.room_id, action, kind, position, timestamp) else {
            return;
        };
        let ev = ServerEvent::MediaSync {
            action,
            media_kind: kind,
            position,
            timestamp,
            name: b.name.clone(),
            seq: room.state().seq,
        };
        let n = room.broadcast_except(session.conn, &ev);
        debug!(room = %b.room_id, action = action.as_str(), position, delivered = n, "media sync");
    }

    fn media_load(&self, session: &Session, room_id: &str, kind: MediaKind, source: &str) {
        let Some(b) = self.bound(session, Some(room_id)) else { return };
        if source.trim().is_empty() {
            return;
        }
        let Some(room) = self.registry.apply_media_load(&b.room_id, kind, source, &b.name) else {
            return;
        };
        room.broadcast_except(
            session.conn,
            &ServerEvent::MediaLoaded { media_kind: kind, source: source.to_string(), name: b.name.clone() },
        );
        tracing::info!(room = %b.room_id, ?kind, source, "media loaded");
    }

    fn chat(&self, session: &Session, room_id: Option<&str>, text: String, timestamp: i64) {
        let Some(b) = self.bound(session, room_id) else { return };
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        let text = text.to_string();
        let Some(room) = self.registry.room(&b.room_id) else { return };
        let ev = ServerEvent::ChatMessage { name: b.name.clone(), text, timestamp };
        let n = room.broadcast_except(session.conn, &ev);
        debug!(room = %b.room_id, from = %b.name, delivered = n, "chat message");
    }

    fn request_sync(&self, session: &Session, room_id: &str) {
        let Some(b) = self.bound(session, Some(room_id)) else { return };
        let Some(room) = self.registry.room(&b.room_id) else { return };
        room.send_to(
            session.conn,
            ServerEvent::SyncResponse { media_descriptor: room.descriptor(), media_state: room.state().clone() },
        );
    }
}
