//! Monitor session runtime

use crate::MonitorError;
use alerting::{
    AlertConfig, AlertDispatcher, AlertInput, AlertRecord, AlertSnapshot, DispatcherHandle,
    MonitorSettings, Presenter,
};
use room_channel::{RoomChannelHub, RoomMessage};
use session_store::{RoomCode, SessionRecord, SessionStore, SessionUpdate};
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// One connected monitor role
///
/// The session owns the alert dispatcher plus two bridge tasks feeding
/// its inbox: session-store changes become `Observe` inputs, room
/// broadcasts become `AlertSignal` inputs. The bridges only enqueue;
/// every transition decision happens on the dispatcher task.
pub struct MonitorSession {
    room: RoomCode,
    store: Arc<SessionStore>,
    dispatcher: DispatcherHandle,
    bridges: Vec<JoinHandle<()>>,
}

impl MonitorSession {
    /// Join a room as the monitor role
    ///
    /// Fails on an unknown room code. On success the session is marked
    /// connected, the dispatcher is running, and both feeds are bridged.
    pub async fn connect<P>(
        store: Arc<SessionStore>,
        hub: Arc<RoomChannelHub>,
        room: RoomCode,
        alert_config: AlertConfig,
        presenter: P,
        settings: MonitorSettings,
    ) -> Result<Self, MonitorError>
    where
        P: Presenter + 'static,
    {
        store.get(&room)?;
        store.update(&room, SessionUpdate::monitor_connected(true))?;

        let dispatcher = AlertDispatcher::spawn(alert_config, presenter, settings);
        let bridges = vec![
            spawn_store_bridge(store.subscribe(), dispatcher.inbox(), room.clone()),
            spawn_hub_bridge(hub.subscribe(&room), dispatcher.inbox(), room.clone()),
        ];

        info!(room = %room, "monitor connected");
        Ok(Self {
            room,
            store,
            dispatcher,
            bridges,
        })
    }

    /// User action: clear the active alert
    pub async fn manual_stop(&self) {
        self.dispatcher.send(AlertInput::ManualStop).await;
    }

    /// Update the shared sensitivity; the CCTV role picks it up from the
    /// store feed
    pub fn set_threshold(&self, threshold: f64) -> Result<SessionRecord, MonitorError> {
        Ok(self
            .store
            .update(&self.room, SessionUpdate::blue_threshold(threshold))?)
    }

    /// Current session record (level gauge, connection badges)
    pub fn session(&self) -> Result<SessionRecord, MonitorError> {
        Ok(self.store.get(&self.room)?)
    }

    /// Whether an alert is currently active
    pub fn alert_active(&self) -> bool {
        self.dispatcher.snapshot().active
    }

    /// Alert history, newest first
    pub fn history(&self) -> Vec<AlertRecord> {
        self.dispatcher.snapshot().history
    }

    /// Watch feed of alert state changes, for rendering
    pub fn subscribe(&self) -> watch::Receiver<AlertSnapshot> {
        self.dispatcher.subscribe()
    }

    /// Leave the room
    ///
    /// Stops the bridges, forces the machine idle with presentation
    /// cleanup, and marks the role disconnected. Nothing outlives the
    /// session: the dispatcher exits before this returns, so no pending
    /// auto-clear can fire afterwards.
    pub async fn teardown(self) -> Result<(), MonitorError> {
        for bridge in self.bridges {
            bridge.abort();
            let _ = bridge.await;
        }

        self.store
            .update(&self.room, SessionUpdate::monitor_connected(false))?;
        self.dispatcher.shutdown().await;

        info!(room = %self.room, "monitor disconnected");
        Ok(())
    }
}

fn spawn_store_bridge(
    mut changes: tokio::sync::broadcast::Receiver<SessionRecord>,
    inbox: mpsc::Sender<AlertInput>,
    room: RoomCode,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match changes.recv().await {
                Ok(record) if record.room_code == room => {
                    let input = AlertInput::Observe {
                        level: record.current_blue_level,
                        threshold: record.blue_threshold,
                    };
                    if inbox.send(input).await.is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(RecvError::Lagged(missed)) => {
                    warn!(room = %room, missed, "store feed lagged, observations dropped");
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}

fn spawn_hub_bridge(
    mut messages: tokio::sync::broadcast::Receiver<RoomMessage>,
    inbox: mpsc::Sender<AlertInput>,
    room: RoomCode,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match messages.recv().await {
                Ok(RoomMessage::BlueAlert { level, .. }) => {
                    if inbox.send(AlertInput::AlertSignal { level }).await.is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(RecvError::Lagged(missed)) => {
                    warn!(room = %room, missed, "room channel lagged, signals dropped");
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}
