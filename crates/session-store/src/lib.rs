//! Session Store
//!
//! Shared coordination state for one CCTV/monitor pair, keyed by a short
//! room code. Sessions are held in memory with a broadcast change feed;
//! there is no durable persistence by design.

mod record;
mod store;

pub use record::{RoomCode, SessionRecord, SessionUpdate};
pub use store::SessionStore;

use thiserror::Error;

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Room not found: {0}")]
    RoomNotFound(String),

    #[error("Invalid room code: {0}")]
    InvalidRoomCode(String),

    #[error("Store lock poisoned")]
    LockPoisoned,
}
