//! Client-side playback synchronization.
//!
//! ```text
//!            load            remote event accepted
//!   Idle ──────────▶ Loaded ───────────────────────▶ Reconciling
//!                      ▲                                  │
//!                      └──────── SUPPRESS elapsed ────────┘
//! ```
//!
//! While `Reconciling`, callbacks fired by the local player (a programmatic
//! seek reports `Seeked` some time after the call returns) are swallowed
//! instead of broadcast, which is what keeps two participants from bouncing
//! the same action back and forth. Remote events closer than `DEBOUNCE` to
//! the last applied one are discarded.
//!
//! Time is always passed in, so every transition can be driven from tests.

use std::time::{Duration, Instant};

use chrono::Utc;
use tracing::{debug, info};

use crate::media::MediaSource;
use crate::protocol::{ClientEvent, MediaAction, MediaDescriptor, MediaKind, MediaState, ServerEvent};

/// Minimum spacing between two applied remote events.
pub const DEBOUNCE: Duration = Duration::from_millis(500);
/// How long outbound broadcast stays muted after applying a remote change.
pub const SUPPRESS: Duration = Duration::from_millis(1000);
/// Drift (seconds) above which play/pause also re-seeks a direct player.
pub const DRIFT_CORRECTION: f64 = 2.0;
/// Advisory self-check cadence and tolerance.
pub const CHECK_INTERVAL: Duration = Duration::from_secs(5);
pub const SYNC_TOLERANCE: f64 = 1.0;

#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum PlaybackError {
    #[error("autoplay blocked by player policy")]
    AutoplayBlocked,
    #[error("player failed: {0}")]
    Player(String),
}

/// Whatever actually renders media. Calls are expected to return at once;
/// the player reports completion later through [`PlayerEvent`]s.
pub trait MediaPlayer {
    fn load(&mut self, source: &MediaSource);
    fn play(&mut self) -> Result<(), PlaybackError>;
    fn pause(&mut self);
    fn seek(&mut self, position: f64);
    fn position(&self) -> f64;
    fn is_paused(&self) -> bool;
}

/// Callbacks from the local player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerEvent {
    Played,
    Paused,
    Seeked,
}

impl PlayerEvent {
    fn action(self) -> MediaAction {
        match self {
            PlayerEvent::Played => MediaAction::Play,
            PlayerEvent::Paused => MediaAction::Pause,
            PlayerEvent::Seeked => MediaAction::Seek,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loaded,
    Reconciling { until: Instant },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    Synced,
    OutOfSync,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ignored {
    OwnEcho,
    Debounced,
    Stale,
    OtherKind,
    NoMedia,
}

/// What the engine did with a server event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    Applied(MediaAction),
    /// A peer loaded new media; `autoplay` is false when the player refused
    /// to start and a manual play affordance should be shown.
    Loaded { autoplay: bool },
    CaughtUp,
    Ignored(Ignored),
    /// Not a playback event.
    Unhandled,
}

/// Last position we believe the room agreed on.
#[derive(Debug, Clone, Copy)]
struct Reference {
    position: f64,
    playing: bool,
    at: Instant,
}

impl Reference {
    fn expected(&self, now: Instant) -> f64 {
        if self.playing {
            self.position + now.saturating_duration_since(self.at).as_secs_f64()
        } else {
            self.position
        }
    }
}

pub struct SyncEngine<P> {
    room_id: String,
    name: String,
    kind: MediaKind,
    player: P,
    phase: Phase,
    source: Option<MediaSource>,
    last_remote: Option<Instant>,
    last_seq: u64,
    reference: Option<Reference>,
    last_check: Option<Instant>,
    status: SyncStatus,
    needs_manual_play: bool,
}

impl<P: MediaPlayer> SyncEngine<P> {
    pub fn new(room_id: impl Into<String>, name: impl Into<String>, kind: MediaKind, player: P) -> Self {
        Self {
            room_id: room_id.into(),
            name: name.into(),
            kind,
            player,
            phase: Phase::Idle,
            source: None,
            last_remote: None,
            last_seq: 0,
            reference: None,
            last_check: None,
            status: SyncStatus::Synced,
            needs_manual_play: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut P {
        &mut self.player
    }

    pub fn source(&self) -> Option<&MediaSource> {
        self.source.as_ref()
    }

    pub fn status(&self) -> SyncStatus {
        self.status
    }

    pub fn needs_manual_play(&self) -> bool {
        self.needs_manual_play
    }

    /// `isSyncing`: outbound broadcast is muted.
    pub fn is_syncing(&self, now: Instant) -> bool {
        matches!(self.phase, Phase::Reconciling { until } if now < until)
    }

    /// Timer transition out of `Reconciling`.
    pub fn tick(&mut self, now: Instant) {
        if let Phase::Reconciling { until } = self.phase {
            if now >= until {
                self.phase = Phase::Loaded;
            }
        }
    }

    /// Deadline of the pending `Reconciling → Loaded` transition, for the
    /// caller's timer.
    pub fn next_deadline(&self) -> Option<Instant> {
        match self.phase {
            Phase::Reconciling { until } => Some(until),
            _ => None,
        }
    }

    /* ------------ local side ------------ */

    /// The local user picked new media. Returns the load to broadcast, or
    /// `None` for a local-only handle.
    pub fn load_local(&mut self, source: MediaSource, now: Instant) -> Option<ClientEvent> {
        self.attach(source, now);
        self.tick(now);
        let locator = self.source.as_ref()?.locator()?.to_string();
        Some(ClientEvent::MediaLoad { room_id: self.room_id.clone(), media_kind: self.kind, source: locator })
    }

    /// A player callback. Returns the event to broadcast unless it was caused
    /// by reconciliation or nothing is loaded.
    pub fn on_player_event(&mut self, ev: PlayerEvent, now: Instant) -> Option<ClientEvent> {
        self.tick(now);
        if self.phase == Phase::Idle {
            return None;
        }
        if ev == PlayerEvent::Played {
            self.needs_manual_play = false;
        }
        if self.is_syncing(now) {
            debug!(?ev, "player callback during reconciliation suppressed");
            return None;
        }
        let position = self.player.position();
        let action = ev.action();
        self.reference = Some(Reference { position, playing: !self.player.is_paused(), at: now });
        self.status = SyncStatus::Synced;
        Some(ClientEvent::MediaEvent {
            room_id: self.room_id.clone(),
            action,
            media_kind: self.kind,
            position,
            timestamp: Utc::now().timestamp_millis(),
        })
    }

    /// The user pressed the fallback play control after autoplay was refused.
    pub fn manual_play(&mut self) -> Result<(), PlaybackError> {
        self.player.play()?;
        self.needs_manual_play = false;
        Ok(())
    }

    /// Periodic advisory check, meant to be called on every time update.
    /// Reports a status at most every `CHECK_INTERVAL`; never corrects.
    pub fn on_time_update(&mut self, now: Instant) -> Option<SyncStatus> {
        self.tick(now);
        if self.phase == Phase::Idle {
            return None;
        }
        if matches!(self.last_check, Some(t) if now.saturating_duration_since(t) < CHECK_INTERVAL) {
            return None;
        }
        self.last_check = Some(now);
        self.status = match self.reference {
            Some(r) if (self.player.position() - r.expected(now)).abs() >= SYNC_TOLERANCE => SyncStatus::OutOfSync,
            _ => SyncStatus::Synced,
        };
        Some(self.status)
    }

    /* ------------ remote side ------------ */

    pub fn handle(&mut self, ev: &ServerEvent, now: Instant) -> Reaction {
        self.tick(now);
        match ev {
            ServerEvent::MediaSync { action, media_kind, position, name, seq, .. } => {
                self.remote_sync(*action, *media_kind, *position, name, *seq, now)
            }
            ServerEvent::MediaLoaded { media_kind, source, name } => {
                self.remote_load(*media_kind, source, name, now)
            }
            ServerEvent::RoomJoined { media_descriptor, media_state, .. }
            | ServerEvent::SyncResponse { media_descriptor, media_state } => {
                self.catch_up(media_descriptor.as_ref(), media_state, now)
            }
            _ => Reaction::Unhandled,
        }
    }

    fn remote_sync(
        &mut self,
        action: MediaAction,
        kind: MediaKind,
        position: f64,
        sender: &str,
        seq: u64,
        now: Instant,
    ) -> Reaction {
        if kind != self.kind {
            return Reaction::Ignored(Ignored::OtherKind);
        }
        if sender == self.name {
            return Reaction::Ignored(Ignored::OwnEcho);
        }
        if seq <= self.last_seq {
            return Reaction::Ignored(Ignored::Stale);
        }
        if matches!(self.last_remote, Some(t) if now.saturating_duration_since(t) < DEBOUNCE) {
            debug!(action = action.as_str(), "remote event debounced");
            return Reaction::Ignored(Ignored::Debounced);
        }
        if self.phase == Phase::Idle {
            return Reaction::Ignored(Ignored::NoMedia);
        }

        self.begin_reconcile(now);
        self.last_remote = Some(now);
        self.last_seq = seq;

        let direct = self.source.as_ref().is_some_and(MediaSource::is_direct);
        let drift = (self.player.position() - position).abs();
        match action {
            MediaAction::Seek => self.player.seek(position),
            MediaAction::Play => {
                if direct && drift > DRIFT_CORRECTION {
                    self.player.seek(position);
                }
                if self.player.is_paused() {
                    self.start_playback();
                }
            }
            MediaAction::Pause => {
                if direct && drift > DRIFT_CORRECTION {
                    self.player.seek(position);
                }
                if !self.player.is_paused() {
                    self.player.pause();
                }
            }
        }
        let playing = match action {
            MediaAction::Play => true,
            MediaAction::Pause => false,
            MediaAction::Seek => !self.player.is_paused(),
        };
        self.reference = Some(Reference { position, playing, at: now });
        self.status = SyncStatus::Synced;
        info!(from = sender, action = action.as_str(), position, "applied remote playback event");
        Reaction::Applied(action)
    }

    fn remote_load(&mut self, kind: MediaKind, source: &str, sender: &str, now: Instant) -> Reaction {
        if kind != self.kind {
            return Reaction::Ignored(Ignored::OtherKind);
        }
        if sender == self.name {
            return Reaction::Ignored(Ignored::OwnEcho);
        }
        self.attach(MediaSource::classify(source), now);
        self.begin_reconcile(now);
        let autoplay = self.start_playback();
        info!(from = sender, source, autoplay, "remote media loaded");
        Reaction::Loaded { autoplay }
    }

    /// Adopt the room snapshot received on join or in a sync response.
    fn catch_up(&mut self, descriptor: Option<&MediaDescriptor>, state: &MediaState, now: Instant) -> Reaction {
        let Some(media) = descriptor.and_then(|d| d.get(self.kind)) else {
            return Reaction::Ignored(Ignored::NoMedia);
        };
        let source = MediaSource::classify(&media.source);
        if self.source.as_ref() != Some(&source) {
            self.attach(source, now);
        }
        self.begin_reconcile(now);
        self.last_seq = self.last_seq.max(state.seq);

        if state.media_kind.map_or(true, |k| k == self.kind) {
            self.player.seek(state.position);
            if state.is_playing {
                self.start_playback();
            } else if !self.player.is_paused() {
                self.player.pause();
            }
            self.reference = Some(Reference { position: state.position, playing: state.is_playing, at: now });
        }
        Reaction::CaughtUp
    }

    fn attach(&mut self, source: MediaSource, now: Instant) {
        self.player.load(&source);
        self.source = Some(source);
        self.reference = Some(Reference { position: 0.0, playing: false, at: now });
        self.last_check = None;
        self.needs_manual_play = false;
        if self.phase == Phase::Idle {
            self.phase = Phase::Loaded;
        }
    }

    fn begin_reconcile(&mut self, now: Instant) {
        self.phase = Phase::Reconciling { until: now + SUPPRESS };
    }

    /// Returns whether playback actually started.
    fn start_playback(&mut self) -> bool {
        match self.player.play() {
            Ok(()) => true,
            Err(e) => {
                info!(error = %e, "playback refused, waiting for manual play");
                self.needs_manual_play = true;
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::LoadedMedia;

    #[derive(Default)]
    struct FakePlayer {
        position: f64,
        paused: bool,
        loaded: Option<MediaSource>,
        block_autoplay: bool,
        seeks: Vec<f64>,
        plays: usize,
        pauses: usize,
    }

    impl MediaPlayer for FakePlayer {
        fn load(&mut self, source: &MediaSource) {
            self.loaded = Some(source.clone());
            self.position = 0.0;
            self.paused = true;
        }
        fn play(&mut self) -> Result<(), PlaybackError> {
            if self.block_autoplay {
                return Err(PlaybackError::AutoplayBlocked);
            }
            self.plays += 1;
            self.paused = false;
            Ok(())
        }
        fn pause(&mut self) {
            self.pauses += 1;
            self.paused = true;
        }
        fn seek(&mut self, position: f64) {
            self.seeks.push(position);
            self.position = position;
        }
        fn position(&self) -> f64 {
            self.position
        }
        fn is_paused(&self) -> bool {
            self.paused
        }
    }

    fn engine(now: Instant) -> SyncEngine<FakePlayer> {
        let mut e = SyncEngine::new("K3X9QZ", "B", MediaKind::Video, FakePlayer::default());
        e.load_local(MediaSource::Direct("/uploads/movie.mp4".into()), now);
        e
    }

    fn sync(action: MediaAction, position: f64, name: &str, seq: u64) -> ServerEvent {
        ServerEvent::MediaSync { action, media_kind: MediaKind::Video, position, timestamp: 0, name: name.into(), seq }
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn remote_pause_mutes_completion_callback() {
        let t0 = Instant::now();
        let mut e = engine(t0);
        e.player_mut().paused = false;
        e.player_mut().position = 42.0;

        assert_eq!(e.handle(&sync(MediaAction::Pause, 42.5, "A", 1), t0), Reaction::Applied(MediaAction::Pause));
        assert!(e.player().paused);
        assert!(e.is_syncing(t0));
        assert_eq!(e.next_deadline(), Some(t0 + SUPPRESS));

        // the player reports its pause 200ms later
        assert_eq!(e.on_player_event(PlayerEvent::Paused, t0 + ms(200)), None);
        assert!(matches!(e.phase(), Phase::Reconciling { .. }));

        // once the window closes, user actions broadcast again
        assert!(!e.is_syncing(t0 + SUPPRESS));
        let out = e.on_player_event(PlayerEvent::Played, t0 + SUPPRESS).unwrap();
        assert!(matches!(out, ClientEvent::MediaEvent { action: MediaAction::Play, .. }));
        assert_eq!(e.phase(), Phase::Loaded);
    }

    #[test]
    fn remote_seek_mutes_seeked_callback() {
        let t0 = Instant::now();
        let mut e = engine(t0);
        e.handle(&sync(MediaAction::Seek, 120.0, "A", 1), t0);
        assert_eq!(e.player().seeks, vec![120.0]);
        assert_eq!(e.on_player_event(PlayerEvent::Seeked, t0 + ms(999)), None);
    }

    #[test]
    fn second_event_within_debounce_is_discarded() {
        let t0 = Instant::now();
        let mut e = engine(t0);
        assert_eq!(e.handle(&sync(MediaAction::Seek, 10.0, "A", 1), t0), Reaction::Applied(MediaAction::Seek));
        assert_eq!(
            e.handle(&sync(MediaAction::Seek, 20.0, "C", 2), t0 + ms(499)),
            Reaction::Ignored(Ignored::Debounced)
        );
        assert_eq!(e.player().seeks, vec![10.0]);
        assert_eq!(e.handle(&sync(MediaAction::Seek, 30.0, "C", 3), t0 + ms(500)), Reaction::Applied(MediaAction::Seek));
    }

    #[test]
    fn own_echo_and_stale_events_are_ignored() {
        let t0 = Instant::now();
        let mut e = engine(t0);
        assert_eq!(e.handle(&sync(MediaAction::Play, 1.0, "B", 1), t0), Reaction::Ignored(Ignored::OwnEcho));
        assert_eq!(e.handle(&sync(MediaAction::Play, 1.0, "A", 5), t0), Reaction::Applied(MediaAction::Play));
        assert_eq!(
            e.handle(&sync(MediaAction::Pause, 1.0, "A", 4), t0 + ms(800)),
            Reaction::Ignored(Ignored::Stale)
        );
    }

    #[test]
    fn small_drift_is_tolerated_large_drift_corrected() {
        let t0 = Instant::now();
        let mut e = engine(t0);
        e.player_mut().position = 50.0;
        e.handle(&sync(MediaAction::Play, 51.5, "A", 1), t0);
        assert!(e.player().seeks.is_empty());
        assert!(!e.player().paused);

        e.handle(&sync(MediaAction::Pause, 80.0, "A", 2), t0 + ms(600));
        assert_eq!(e.player().seeks, vec![80.0]);
        assert!(e.player().paused);
    }

    #[test]
    fn play_on_playing_player_does_not_restart() {
        let t0 = Instant::now();
        let mut e = engine(t0);
        e.player_mut().paused = false;
        e.handle(&sync(MediaAction::Play, 0.0, "A", 1), t0);
        assert_eq!(e.player().plays, 0);
    }

    #[test]
    fn embed_media_skips_drift_correction() {
        let t0 = Instant::now();
        let mut e = SyncEngine::new("K3X9QZ", "B", MediaKind::Video, FakePlayer::default());
        let reaction = e.handle(
            &ServerEvent::MediaLoaded {
                media_kind: MediaKind::Video,
                source: "https://www.youtube.com/embed/abc12345678".into(),
                name: "A".into(),
            },
            t0,
        );
        assert_eq!(reaction, Reaction::Loaded { autoplay: true });
        assert_eq!(e.source(), Some(&MediaSource::Embed("https://www.youtube.com/embed/abc12345678".into())));

        e.handle(&sync(MediaAction::Pause, 300.0, "A", 1), t0 + ms(600));
        assert!(e.player().seeks.is_empty());
        assert!(e.player().paused);
    }

    #[test]
    fn blocked_autoplay_surfaces_manual_play() {
        let t0 = Instant::now();
        let mut e = SyncEngine::new("K3X9QZ", "B", MediaKind::Video, FakePlayer::default());
        e.player_mut().block_autoplay = true;
        let reaction = e.handle(
            &ServerEvent::MediaLoaded { media_kind: MediaKind::Video, source: "/uploads/x.mp4".into(), name: "A".into() },
            t0,
        );
        assert_eq!(reaction, Reaction::Loaded { autoplay: false });
        assert!(e.needs_manual_play());

        assert_eq!(e.manual_play(), Err(PlaybackError::AutoplayBlocked));
        e.player_mut().block_autoplay = false;
        assert_eq!(e.manual_play(), Ok(()));
        assert!(!e.needs_manual_play());
    }

    #[test]
    fn remote_load_of_own_source_or_other_kind_is_ignored() {
        let t0 = Instant::now();
        let mut e = engine(t0);
        let own = ServerEvent::MediaLoaded { media_kind: MediaKind::Video, source: "x".into(), name: "B".into() };
        let audio = ServerEvent::MediaLoaded { media_kind: MediaKind::Audio, source: "x".into(), name: "A".into() };
        assert_eq!(e.handle(&own, t0), Reaction::Ignored(Ignored::OwnEcho));
        assert_eq!(e.handle(&audio, t0), Reaction::Ignored(Ignored::OtherKind));
        assert_eq!(e.source(), Some(&MediaSource::Direct("/uploads/movie.mp4".into())));
    }

    #[test]
    fn idle_engine_neither_applies_nor_broadcasts() {
        let t0 = Instant::now();
        let mut e = SyncEngine::new("K3X9QZ", "B", MediaKind::Video, FakePlayer::default());
        assert_eq!(e.handle(&sync(MediaAction::Play, 1.0, "A", 1), t0), Reaction::Ignored(Ignored::NoMedia));
        assert_eq!(e.on_player_event(PlayerEvent::Played, t0), None);
        assert_eq!(e.on_time_update(t0), None);
    }

    #[test]
    fn local_only_source_is_not_broadcast() {
        let t0 = Instant::now();
        let mut e = SyncEngine::new("K3X9QZ", "B", MediaKind::Video, FakePlayer::default());
        assert_eq!(e.load_local(MediaSource::Local("/home/b/movie.mkv".into()), t0), None);
        assert_eq!(e.phase(), Phase::Loaded);

        let shared = e.load_local(MediaSource::from_user_url("https://youtu.be/abc12345678"), t0);
        assert_eq!(
            shared,
            Some(ClientEvent::MediaLoad {
                room_id: "K3X9QZ".into(),
                media_kind: MediaKind::Video,
                source: "https://www.youtube.com/embed/abc12345678".into(),
            })
        );
    }

    #[test]
    fn self_check_is_periodic_and_advisory() {
        let t0 = Instant::now();
        let mut e = engine(t0);
        e.handle(&sync(MediaAction::Pause, 10.0, "A", 1), t0);
        e.player_mut().position = 10.2;
        assert_eq!(e.on_time_update(t0 + ms(1100)), Some(SyncStatus::Synced));
        assert_eq!(e.on_time_update(t0 + ms(2000)), None);

        e.player_mut().position = 25.0;
        assert_eq!(e.on_time_update(t0 + ms(6100)), Some(SyncStatus::OutOfSync));
        assert_eq!(e.status(), SyncStatus::OutOfSync);
        // only the pause re-seeked; the check itself never corrects
        assert_eq!(e.player().seeks, vec![10.0]);
        assert_eq!(e.player().position, 25.0);
    }

    #[test]
    fn joining_catches_up_to_room_snapshot() {
        let t0 = Instant::now();
        let mut e = SyncEngine::new("K3X9QZ", "B", MediaKind::Video, FakePlayer::default());
        let joined = ServerEvent::RoomJoined {
            room_id: "K3X9QZ".into(),
            name: "B".into(),
            count: 2,
            media_descriptor: Some(MediaDescriptor {
                video: Some(LoadedMedia { source: "/uploads/m.mp4".into(), loaded_by: "A".into(), loaded_at: 0 }),
                audio: None,
            }),
            media_state: MediaState {
                is_playing: true,
                position: 33.0,
                last_update: 0,
                media_kind: Some(MediaKind::Video),
                seq: 7,
            },
        };
        assert_eq!(e.handle(&joined, t0), Reaction::CaughtUp);
        assert_eq!(e.player().loaded, Some(MediaSource::Direct("/uploads/m.mp4".into())));
        assert_eq!(e.player().seeks, vec![33.0]);
        assert!(!e.player().paused);
        assert!(e.is_syncing(t0));
        // anything older than the snapshot is stale
        assert_eq!(
            e.handle(&sync(MediaAction::Pause, 1.0, "A", 7), t0 + ms(600)),
            Reaction::Ignored(Ignored::Stale)
        );
    }

    #[test]
    fn empty_snapshot_leaves_engine_idle() {
        let t0 = Instant::now();
        let mut e = SyncEngine::new("K3X9QZ", "B", MediaKind::Video, FakePlayer::default());
        let joined = ServerEvent::RoomJoined {
            room_id: "K3X9QZ".into(),
            name: "B".into(),
            count: 2,
            media_descriptor: None,
            media_state: MediaState::new(0),
        };
        assert_eq!(e.handle(&joined, t0), Reaction::Ignored(Ignored::NoMedia));
        assert_eq!(e.phase(), Phase::Idle);
    }

    #[test]
    fn chat_log_follows_what_was_applied() {
        use crate::client::chat::{ChatLine, ChatLog};

        let t0 = Instant::now();
        let mut e = engine(t0);
        let mut log = ChatLog::new("K3X9QZ");

        let play = sync(MediaAction::Play, 5.0, "A", 1);
        log.record(&play, e.handle(&play, t0 + ms(1500)));
        // inside the debounce window: dropped, so not logged either
        let pause = sync(MediaAction::Pause, 6.0, "A", 2);
        log.record(&pause, e.handle(&pause, t0 + ms(1700)));

        assert_eq!(log.lines(), &[ChatLine::System("A played the video".into())]);
    }
}
