//! Participant-side logic: joining, sharing media and keeping the local
//! player in step with the room.

pub mod chat;
pub mod engine;
pub mod lobby;
pub mod upload;

pub use chat::{ChatLine, ChatLog};
pub use engine::{MediaPlayer, PlaybackError, PlayerEvent, Reaction, SyncEngine, SyncStatus};
pub use lobby::{plan_join, HttpDirectory, JoinError, JoinPlan, RoomDirectory};
pub use upload::{share_file, HttpUploader, UploadError, UploadOutcome, Uploader};
