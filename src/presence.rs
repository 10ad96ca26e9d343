//! Room membership notifications.
//!
//! The server side turns registry joins/leaves into roster events; the client
//! side folds those events into a [`PresenceView`] for display.

use tracing::info;

use crate::protocol::ServerEvent;
use crate::state::{ConnId, Participant, Room};

/* ------------ server ------------ */

/// Tell the room about a member that was just inserted.
///
/// Existing members get `userJoined`; the joiner alone gets the catch-up
/// snapshot (`roomJoined` followed by `roomState`).
pub fn announce_join(room: &Room, joiner: ConnId) {
    let Some(p) = room.participant(joiner) else { return };
    room.broadcast_except(
        joiner,
        &ServerEvent::UserJoined { name: p.name.clone(), count: room.count(), all_names: room.names() },
    );
    send_snapshot(room, joiner);
    info!(room = %room.id, name = %p.name, count = room.count(), "user joined");
}

/// A member re-sent its join for the room it already sits in: refresh the
/// joiner's snapshot, the rest of the room hears nothing.
pub fn announce_rejoin(room: &Room, joiner: ConnId) {
    send_snapshot(room, joiner);
    info!(room = %room.id, conn = %joiner, "user rejoined");
}

fn send_snapshot(room: &Room, joiner: ConnId) {
    let Some(p) = room.participant(joiner) else { return };
    room.send_to(
        joiner,
        ServerEvent::RoomJoined {
            room_id: room.id.clone(),
            name: p.name.clone(),
            count: room.count(),
            media_descriptor: room.descriptor(),
            media_state: room.state().clone(),
        },
    );
    room.send_to(
        joiner,
        ServerEvent::RoomState {
            count: room.count(),
            all_names: room.names(),
            media_descriptor: room.descriptor(),
            media_state: room.state().clone(),
        },
    );
}

/// Tell the remaining members that `departed` is gone.
pub fn announce_leave(room: &Room, departed: &Participant) {
    let count = room.count();
    let ev = ServerEvent::UserLeft { name: departed.name.clone(), count, all_names: room.names() };
    room.broadcast_except(departed.conn, &ev);
    info!(room = %room.id, name = %departed.name, count, "user left");
}

/* ------------ client ------------ */

/// What a participant knows about the room roster.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PresenceView {
    pub room_id: Option<String>,
    pub count: usize,
    pub names: Vec<String>,
}

impl PresenceView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a server event in. Returns a system line for the chat log when
    /// the event is worth announcing.
    pub fn apply(&mut self, ev: &ServerEvent) -> Option<String> {
        match ev {
            ServerEvent::RoomJoined { room_id, count, .. } => {
                self.room_id = Some(room_id.clone());
                self.count = *count;
                None
            }
            ServerEvent::RoomState { count, all_names, .. } => {
                self.count = *count;
                self.names = all_names.clone();
                None
            }
            ServerEvent::UserJoined { name, count, all_names } => {
                self.count = *count;
                self.names = all_names.clone();
                Some(format!("{name} joined the room"))
            }
            ServerEvent::UserLeft { name, count, all_names } => {
                self.count = *count;
                self.names = all_names.clone();
                Some(format!("{name} left the room"))
            }
            _ => None,
        }
    }

    /// "A, B online"
    pub fn online_line(&self) -> String {
        format!("{} online", self.names.join(", "))
    }
}
