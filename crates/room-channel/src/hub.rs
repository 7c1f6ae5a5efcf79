//! In-process room channel hub

use crate::message::RoomMessage;
use session_store::RoomCode;
use std::collections::HashMap;
use std::sync::Mutex;
use tokio::sync::broadcast;
use tracing::debug;

const ROOM_CHANNEL_CAPACITY: usize = 32;

/// Per-room broadcast hub
///
/// One instance per deployment, shared by reference. Rooms are created
/// lazily on first subscribe or publish and stay cheap: an idle room is
/// one broadcast sender.
pub struct RoomChannelHub {
    rooms: Mutex<HashMap<RoomCode, broadcast::Sender<RoomMessage>>>,
}

impl RoomChannelHub {
    pub fn new() -> Self {
        Self {
            rooms: Mutex::new(HashMap::new()),
        }
    }

    /// Subscribe to a room's messages
    pub fn subscribe(&self, room: &RoomCode) -> broadcast::Receiver<RoomMessage> {
        self.room_sender(room).subscribe()
    }

    /// Publish to a room, returning how many subscribers received it
    ///
    /// Zero subscribers is not an error; the channel is best-effort.
    pub fn publish(&self, room: &RoomCode, message: RoomMessage) -> usize {
        let sender = self.room_sender(room);
        match sender.send(message) {
            Ok(receivers) => receivers,
            Err(_) => {
                debug!(room = %room, "no subscribers, message dropped");
                0
            }
        }
    }

    fn room_sender(&self, room: &RoomCode) -> broadcast::Sender<RoomMessage> {
        let mut rooms = self.rooms.lock().expect("room hub lock");
        rooms
            .entry(room.clone())
            .or_insert_with(|| broadcast::channel(ROOM_CHANNEL_CAPACITY).0)
            .clone()
    }
}

impl Default for RoomChannelHub {
    fn default() -> Self {
        Self::new()
    }
}
