//! In-memory session repository

use crate::record::{RoomCode, SessionRecord, SessionUpdate};
use crate::StoreError;
use std::collections::HashMap;
use std::sync::Mutex;
use tokio::sync::broadcast;
use tracing::{debug, info};

const CHANGE_FEED_CAPACITY: usize = 64;

/// Session repository with a change feed
///
/// One instance per deployment, shared by reference between the roles and
/// the API surface; every mutation is broadcast to subscribers as the
/// full updated record. Slow subscribers lose messages rather than slow
/// the writer (broadcast semantics).
pub struct SessionStore {
    sessions: Mutex<HashMap<RoomCode, SessionRecord>>,
    changes: broadcast::Sender<SessionRecord>,
}

impl SessionStore {
    pub fn new() -> Self {
        info!("creating in-memory session store");
        let (changes, _) = broadcast::channel(CHANGE_FEED_CAPACITY);
        Self {
            sessions: Mutex::new(HashMap::new()),
            changes,
        }
    }

    /// Create a new session under a freshly generated room code
    pub fn create_session(&self) -> Result<SessionRecord, StoreError> {
        let mut sessions = self.sessions.lock().map_err(|_| StoreError::LockPoisoned)?;

        // Regenerate on the (unlikely) collision
        let mut code = RoomCode::generate();
        while sessions.contains_key(&code) {
            code = RoomCode::generate();
        }

        let record = SessionRecord::new(code.clone());
        sessions.insert(code.clone(), record.clone());
        info!(room = %code, "session created");
        Ok(record)
    }

    /// Fetch a session by room code
    pub fn get(&self, room: &RoomCode) -> Result<SessionRecord, StoreError> {
        let sessions = self.sessions.lock().map_err(|_| StoreError::LockPoisoned)?;
        sessions
            .get(room)
            .cloned()
            .ok_or_else(|| StoreError::RoomNotFound(room.to_string()))
    }

    /// Apply a partial update and broadcast the new record
    pub fn update(&self, room: &RoomCode, update: SessionUpdate) -> Result<SessionRecord, StoreError> {
        let record = {
            let mut sessions = self.sessions.lock().map_err(|_| StoreError::LockPoisoned)?;
            let record = sessions
                .get_mut(room)
                .ok_or_else(|| StoreError::RoomNotFound(room.to_string()))?;

            update.apply(record);
            record.updated_at = chrono::Utc::now();
            record.clone()
        };

        debug!(room = %room, level = record.current_blue_level, "session updated");
        // No subscribers is fine; the feed is best-effort
        let _ = self.changes.send(record.clone());
        Ok(record)
    }

    /// Subscribe to the change feed (all rooms; filter by room code)
    pub fn subscribe(&self) -> broadcast::Receiver<SessionRecord> {
        self.changes.subscribe()
    }

    /// Number of live sessions
    pub fn session_count(&self) -> usize {
        self.sessions.lock().map(|s| s.len()).unwrap_or(0)
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
