//! SyncWatch: rooms of participants watching the same media in lockstep.
//!
//! The server half (`state`, `relay`, `presence`, `routes`) keeps the
//! authoritative per-room media state and relays control events; the
//! `client` half holds the sync engine and lobby logic a viewer runs.

pub mod client;
pub mod config;
pub mod error;
pub mod media;
pub mod presence;
pub mod protocol;
pub mod relay;
pub mod routes;
pub mod state;
pub mod utils;
