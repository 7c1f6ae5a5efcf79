//! Room Channel
//!
//! Low-latency pub/sub scoped to a room, independent of the session
//! store's change feed:
//! - In-process hub delivering messages between the two roles
//! - MQTT relay mirroring room traffic to an external broker
//!
//! Delivery is best-effort by design: no subscriber, a lagging
//! subscriber, or a lost broker connection drops messages without
//! failing the publisher. At-most-once presentation is enforced by the
//! monitor's state machine, not here.

mod hub;
mod message;
mod mqtt;

pub use hub::RoomChannelHub;
pub use message::RoomMessage;
pub use mqtt::{MqttRelay, RelayConfig};

use thiserror::Error;

/// Channel errors
#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Publish failed: {0}")]
    Publish(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Relay not connected")]
    NotConnected,
}
