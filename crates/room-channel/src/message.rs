//! Room message types

use serde::{Deserialize, Serialize};

/// Messages delivered over a room channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RoomMessage {
    /// Session state changed (subset the monitor renders)
    SessionChanged {
        current_blue_level: f64,
        blue_threshold: f64,
        cctv_connected: bool,
    },

    /// Rising-edge alert from the CCTV role
    BlueAlert {
        level: f64,
        threshold: f64,
        triggered: bool,
        /// RFC 3339 wall-clock timestamp at the sensor
        timestamp: String,
    },
}

impl RoomMessage {
    /// Build an alert event stamped with the current wall clock
    pub fn blue_alert(level: f64, threshold: f64) -> Self {
        Self::BlueAlert {
            level,
            threshold,
            triggered: true,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alert_serializes_with_event_tag() {
        let msg = RoomMessage::BlueAlert {
            level: 0.42,
            threshold: 0.1,
            triggered: true,
            timestamp: "2026-01-01T00:00:00Z".into(),
        };

        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["event"], "blue_alert");
        assert_eq!(json["level"], 0.42);
        assert_eq!(json["triggered"], true);
    }

    #[test]
    fn session_change_round_trips() {
        let msg = RoomMessage::SessionChanged {
            current_blue_level: 0.2,
            blue_threshold: 0.1,
            cctv_connected: true,
        };

        let json = serde_json::to_string(&msg).unwrap();
        let back: RoomMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, msg);
    }
}
