use std::{
    collections::VecDeque,
    path::PathBuf,
    sync::Arc,
};

use chrono::{DateTime, Utc};
use dashmap::{mapref::one::RefMut, DashMap};
use serde::Serialize;
use tokio::sync::{
    mpsc::{self, error::TrySendError},
    Notify, RwLock,
};
use tracing::info;
use uuid::Uuid;

use crate::protocol::{LoadedMedia, MediaAction, MediaDescriptor, MediaKind, MediaState, ServerEvent};

/// Transport-assigned connection identity.
pub type ConnId = Uuid;
/// A room locked for mutation. Dropping it releases the room.
pub type RoomHandle<'a> = RefMut<'a, String, Room>;

/// Frames queued per connection before it is treated as gone.
pub const OUTBOX_CAPACITY: usize = 100;

/* ------------ outbox ------------ */

/// Per-connection bounded outbound queue, drained by the socket writer.
///
/// A send that finds the queue full is dropped and trips `overflow`, which
/// the transport watches to close a peer that stopped reading.
#[derive(Debug, Clone)]
pub struct Outbox {
    tx: mpsc::Sender<ServerEvent>,
    overflow: Arc<Notify>,
}

impl Outbox {
    pub fn channel() -> (Self, mpsc::Receiver<ServerEvent>) {
        Self::with_capacity(OUTBOX_CAPACITY)
    }

    pub fn with_capacity(cap: usize) -> (Self, mpsc::Receiver<ServerEvent>) {
        let (tx, rx) = mpsc::channel(cap);
        (Self { tx, overflow: Arc::new(Notify::new()) }, rx)
    }

    pub fn send(&self, ev: ServerEvent) -> bool {
        match self.tx.try_send(ev) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                self.overflow.notify_one();
                false
            }
            Err(TrySendError::Closed(_)) => false,
        }
    }

    /// Resolves once a send has found the queue full.
    pub async fn overflowed(&self) {
        self.overflow.notified().await
    }
}

/* ------------ participants ------------ */
#[derive(Debug, Clone)]
pub struct Participant {
    pub conn: ConnId,
    pub name: String,
    pub joined_at: DateTime<Utc>,
    outbox: Outbox,
}

impl Participant {
    pub fn new(conn: ConnId, name: impl Into<String>, outbox: Outbox) -> Self {
        Self { conn, name: name.into(), joined_at: Utc::now(), outbox }
    }

    /// Queue an event for this connection. A closed or full queue means the
    /// socket is going away and its disconnect will clean up.
    pub fn send(&self, ev: ServerEvent) -> bool {
        self.outbox.send(ev)
    }
}

/* ------------ rooms ------------ */
#[derive(Debug)]
pub struct Room {
    pub id: String,
    members: Vec<Participant>,
    media: MediaDescriptor,
    state: MediaState,
    pub created_at: DateTime<Utc>,
}

impl Room {
    fn new(id: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            members: Vec::new(),
            media: MediaDescriptor::default(),
            state: MediaState::new(now.timestamp_millis()),
            created_at: now,
        }
    }

    pub fn count(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Display names in join order.
    pub fn names(&self) -> Vec<String> {
        self.members.iter().map(|p| p.name.clone()).collect()
    }

    pub fn participant(&self, conn: ConnId) -> Option<&Participant> {
        self.members.iter().find(|p| p.conn == conn)
    }

    pub fn contains(&self, conn: ConnId) -> bool {
        self.participant(conn).is_some()
    }

    /// `None` while nothing has been loaded.
    pub fn descriptor(&self) -> Option<MediaDescriptor> {
        (!self.media.is_empty()).then(|| self.media.clone())
    }

    pub fn state(&self) -> &MediaState {
        &self.state
    }

    pub fn send_to(&self, conn: ConnId, ev: ServerEvent) -> bool {
        self.participant(conn).map(|p| p.send(ev)).unwrap_or(false)
    }

    /// Deliver to every member except `sender`. Returns how many were queued.
    pub fn broadcast_except(&self, sender: ConnId, ev: &ServerEvent) -> usize {
        self.members
            .iter()
            .filter(|p| p.conn != sender)
            .filter(|p| p.send(ev.clone()))
            .count()
    }

    fn insert(&mut self, p: Participant) {
        match self.members.iter_mut().find(|m| m.conn == p.conn) {
            Some(existing) => *existing = p,
            None => self.members.push(p),
        }
    }

    fn remove(&mut self, conn: ConnId) -> Option<Participant> {
        let at = self.members.iter().position(|p| p.conn == conn)?;
        Some(self.members.remove(at))
    }

    fn apply_event(&mut self, action: MediaAction, kind: MediaKind, position: f64, timestamp: i64) {
        let is_playing = match action {
            MediaAction::Play => true,
            MediaAction::Pause => false,
            MediaAction::Seek => self.state.is_playing,
        };
        self.state = MediaState {
            is_playing,
            position,
            last_update: timestamp,
            media_kind: Some(kind),
            seq: self.state.seq + 1,
        };
    }

    pub fn snapshot(&self) -> RoomSnapshot {
        RoomSnapshot {
            id: self.id.clone(),
            count: self.count(),
            names: self.names(),
            media_descriptor: self.descriptor(),
            media_state: self.state.clone(),
        }
    }

    pub fn summary(&self) -> RoomSummary {
        RoomSummary {
            id: self.id.clone(),
            count: self.count(),
            names: self.names(),
            has_media: !self.media.is_empty(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSnapshot {
    pub id: String,
    pub count: usize,
    pub names: Vec<String>,
    pub media_descriptor: Option<MediaDescriptor>,
    pub media_state: MediaState,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummary {
    pub id: String,
    pub count: usize,
    pub names: Vec<String>,
    pub has_media: bool,
}

/* ------------ registry ------------ */

/// Every live room, keyed by identifier.
///
/// Each room sits behind its map entry lock, so membership, media descriptor
/// and playback state of one room are only ever touched by one handler at a
/// time. A room exists exactly while it has at least one participant.
/// Which room a connection sits in is tracked by its relay session.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    rooms: DashMap<String, Room>,
}

pub type SharedRegistry = Arc<SessionRegistry>;

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `participant` into `room_id`, creating the room on first join.
    /// A participant already in the room is replaced in place.
    ///
    /// The returned handle keeps the room locked, so the caller can announce
    /// the join before any other event for this room is processed.
    pub fn join(&self, room_id: &str, participant: Participant) -> RoomHandle<'_> {
        let mut room = self.rooms.entry(room_id.to_string()).or_insert_with(|| {
            info!(room = room_id, "room created");
            Room::new(room_id.to_string())
        });
        room.insert(participant);
        room
    }

    /// Remove `conn` from `room_id`, deleting the room once empty.
    ///
    /// `notify` runs under the room lock with the remaining room and the
    /// departed participant. Leaving twice, or without having joined, is a no-op.
    pub fn leave<F>(&self, room_id: &str, conn: ConnId, notify: F) -> Option<Participant>
    where
        F: FnOnce(&Room, &Participant),
    {
        let mut departed = None;
        let removed = self.rooms.remove_if_mut(room_id, |_, room| {
            if let Some(p) = room.remove(conn) {
                notify(room, &p);
                departed = Some(p);
            }
            room.is_empty()
        });
        if removed.is_some() {
            info!(room = room_id, "room deleted (empty)");
        }
        departed
    }

    /// Overwrite the room's playback state. `None` if the room is gone.
    pub fn apply_media_event(
        &self,
        room_id: &str,
        action: MediaAction,
        kind: MediaKind,
        position: f64,
        timestamp: i64,
    ) -> Option<RoomHandle<'_>> {
        let mut room = self.rooms.get_mut(room_id)?;
        room.apply_event(action, kind, position, timestamp);
        Some(room)
    }

    /// Replace the media loaded for `kind`. `None` if the room is gone.
    pub fn apply_media_load(
        &self,
        room_id: &str,
        kind: MediaKind,
        source: &str,
        loader: &str,
    ) -> Option<RoomHandle<'_>> {
        let mut room = self.rooms.get_mut(room_id)?;
        room.media.set(
            kind,
            LoadedMedia {
                source: source.to_string(),
                loaded_by: loader.to_string(),
                loaded_at: Utc::now().timestamp_millis(),
            },
        );
        Some(room)
    }

    /// Lock a room without changing it.
    pub fn room(&self, room_id: &str) -> Option<RoomHandle<'_>> {
        self.rooms.get_mut(room_id)
    }

    pub fn validate(&self, room_id: &str) -> bool {
        self.rooms.contains_key(room_id)
    }

    pub fn snapshot(&self, room_id: &str) -> Option<RoomSnapshot> {
        self.rooms.get(room_id).map(|r| r.snapshot())
    }

    pub fn summaries(&self) -> Vec<RoomSummary> {
        let mut list: Vec<_> = self.rooms.iter().map(|r| r.summary()).collect();
        list.sort_by(|a, b| a.id.cmp(&b.id));
        list
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Drop every room. Participant outboxes close with them, which ends
    /// the socket writers.
    pub fn shutdown(&self) {
        let n = self.rooms.len();
        self.rooms.clear();
        info!(rooms = n, "session registry torn down");
    }
}

/* ------------ uploaded media log -------------- */
#[derive(Clone, Debug)]
pub struct MediaEntry {
    pub path: PathBuf,
    pub size: u64,
}
pub type MediaLog = Arc<RwLock<VecDeque<MediaEntry>>>;
