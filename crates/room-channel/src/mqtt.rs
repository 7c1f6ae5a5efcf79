//! MQTT relay
//!
//! Mirrors a room's channel traffic to an external broker so off-box
//! consumers (dashboards, recorders) can follow alerts without joining
//! the in-process hub. Publish-only; QoS 0 to match the channel's
//! best-effort contract.

use crate::hub::RoomChannelHub;
use crate::message::RoomMessage;
use crate::ChannelError;
use rumqttc::{AsyncClient, Event, MqttOptions, QoS};
use session_store::RoomCode;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Relay configuration
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// MQTT broker host
    pub broker_url: String,
    /// MQTT broker port
    pub broker_port: u16,
    /// Topic prefix; room topics are `{prefix}/{room_code}/events`
    pub topic_prefix: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            broker_url: "localhost".to_string(),
            broker_port: 1883,
            topic_prefix: "rooms".to_string(),
        }
    }
}

/// MQTT mirror of room channel traffic
pub struct MqttRelay {
    config: RelayConfig,
    client: Option<AsyncClient>,
}

impl MqttRelay {
    pub fn new(config: RelayConfig) -> Self {
        Self {
            config,
            client: None,
        }
    }

    /// Connect to the broker and start the client event loop
    pub async fn connect(&mut self) -> Result<(), ChannelError> {
        let client_id = format!("bluewatch-relay-{}", Uuid::new_v4().simple());
        let mut options = MqttOptions::new(
            client_id,
            &self.config.broker_url,
            self.config.broker_port,
        );
        options.set_keep_alive(Duration::from_secs(30));

        let (client, mut eventloop) = AsyncClient::new(options, 10);

        tokio::spawn(async move {
            loop {
                match eventloop.poll().await {
                    Ok(Event::Incoming(incoming)) => {
                        debug!("MQTT incoming: {:?}", incoming);
                    }
                    Err(e) => {
                        error!("MQTT error: {}", e);
                        tokio::time::sleep(Duration::from_secs(5)).await;
                    }
                    _ => {}
                }
            }
        });

        self.client = Some(client);
        info!("connected to MQTT broker: {}", self.config.broker_url);
        Ok(())
    }

    /// Publish one room message to the broker
    pub async fn publish(&self, room: &RoomCode, message: &RoomMessage) -> Result<(), ChannelError> {
        let client = self.client.as_ref().ok_or(ChannelError::NotConnected)?;

        let topic = format!("{}/{}/events", self.config.topic_prefix, room);
        let payload =
            serde_json::to_vec(message).map_err(|e| ChannelError::Serialization(e.to_string()))?;

        client
            .publish(topic, QoS::AtMostOnce, false, payload)
            .await
            .map_err(|e| ChannelError::Publish(e.to_string()))?;

        debug!(room = %room, "message mirrored to broker");
        Ok(())
    }

    /// Mirror all traffic for one room; abort the returned handle to stop
    ///
    /// Relay failures are logged and skipped; mirroring never interrupts
    /// in-process delivery.
    pub fn mirror(self: Arc<Self>, hub: &RoomChannelHub, room: RoomCode) -> JoinHandle<()> {
        let mut rx = hub.subscribe(&room);
        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(message) => {
                        if let Err(e) = self.publish(&room, &message).await {
                            warn!(room = %room, "mirror publish failed: {}", e);
                        }
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(missed)) => {
                        warn!(room = %room, missed, "mirror lagged, messages dropped");
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
                }
            }
            debug!(room = %room, "mirror stopped");
        })
    }
}
