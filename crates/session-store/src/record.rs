//! Session records and room codes

use crate::StoreError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Room code character set: uppercase alphanumerics
const ROOM_CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Room code length
pub const ROOM_CODE_LEN: usize = 6;

/// Six-character room code linking one CCTV role and one monitor role
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomCode(String);

impl RoomCode {
    /// Generate a fresh room code from v4 UUID entropy
    pub fn generate() -> Self {
        let uuid = Uuid::new_v4();
        let code: String = uuid
            .as_bytes()
            .iter()
            .take(ROOM_CODE_LEN)
            .map(|b| ROOM_CODE_ALPHABET[*b as usize % ROOM_CODE_ALPHABET.len()] as char)
            .collect();
        Self(code)
    }

    /// Parse user input, normalizing to uppercase
    pub fn parse(input: &str) -> Result<Self, StoreError> {
        let normalized = input.trim().to_ascii_uppercase();
        if normalized.len() != ROOM_CODE_LEN
            || !normalized.bytes().all(|b| b.is_ascii_alphanumeric())
        {
            return Err(StoreError::InvalidRoomCode(input.to_string()));
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Shared session state for one room
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub room_code: RoomCode,
    pub cctv_connected: bool,
    pub monitor_connected: bool,
    /// Occupancy fraction above which the monitor alerts, in (0, 1]
    pub blue_threshold: f64,
    /// Last level reported by the CCTV role, in [0, 1]
    pub current_blue_level: f64,
    pub updated_at: DateTime<Utc>,
}

impl SessionRecord {
    /// Fresh session: both roles disconnected, default sensitivity
    pub fn new(room_code: RoomCode) -> Self {
        Self {
            room_code,
            cctv_connected: false,
            monitor_connected: false,
            blue_threshold: 0.1,
            current_blue_level: 0.0,
            updated_at: Utc::now(),
        }
    }
}

/// Partial update of a session record
///
/// Unset fields keep their current value; any applied update bumps
/// `updated_at`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionUpdate {
    pub cctv_connected: Option<bool>,
    pub monitor_connected: Option<bool>,
    pub blue_threshold: Option<f64>,
    pub current_blue_level: Option<f64>,
}

impl SessionUpdate {
    pub fn cctv_connected(connected: bool) -> Self {
        Self {
            cctv_connected: Some(connected),
            ..Default::default()
        }
    }

    pub fn monitor_connected(connected: bool) -> Self {
        Self {
            monitor_connected: Some(connected),
            ..Default::default()
        }
    }

    pub fn blue_threshold(threshold: f64) -> Self {
        Self {
            blue_threshold: Some(threshold.clamp(0.01, 1.0)),
            ..Default::default()
        }
    }

    pub fn blue_level(level: f64) -> Self {
        Self {
            current_blue_level: Some(level),
            ..Default::default()
        }
    }

    /// Apply onto a record; unset fields keep their current value
    pub(crate) fn apply(&self, record: &mut SessionRecord) {
        if let Some(v) = self.cctv_connected {
            record.cctv_connected = v;
        }
        if let Some(v) = self.monitor_connected {
            record.monitor_connected = v;
        }
        if let Some(v) = self.blue_threshold {
            record.blue_threshold = v;
        }
        if let Some(v) = self.current_blue_level {
            record.current_blue_level = v;
        }
    }
}
