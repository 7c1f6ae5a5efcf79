//! CCTV session runtime

use crate::CctvError;
use blue_detection::{detect_blue_level, DetectionConfig};
use frame_capture::{CaptureConfig, FrameSource};
use room_channel::{RoomChannelHub, RoomMessage};
use session_store::{RoomCode, SessionStore, SessionUpdate};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// CCTV runtime configuration
#[derive(Debug, Clone, Default)]
pub struct CctvConfig {
    /// Capture resolution and detection cadence
    pub capture: CaptureConfig,
    /// Classifier settings; threshold is replaced by the session's value
    pub detection: DetectionConfig,
}

impl CctvConfig {
    fn sample_interval(&self) -> Duration {
        Duration::from_millis(self.capture.sample_interval_ms)
    }
}

/// One connected CCTV role
///
/// Owns the detection cadence for its room. The alert edge is tracked
/// locally: a broadcast fires only when the level crosses from below to
/// above the threshold, and re-arms once it falls back.
pub struct CctvSession {
    room: RoomCode,
    store: Arc<SessionStore>,
    hub: Arc<RoomChannelHub>,
    config: CctvConfig,
    threshold: f64,
    alert_triggered: bool,
}

impl CctvSession {
    /// Join a room as the CCTV role
    ///
    /// Fails on an unknown room code; on success the session is marked
    /// connected and the stored sensitivity becomes the active threshold.
    pub async fn connect(
        store: Arc<SessionStore>,
        hub: Arc<RoomChannelHub>,
        room: RoomCode,
        config: CctvConfig,
    ) -> Result<Self, CctvError> {
        let record = store.get(&room)?;
        store.update(&room, SessionUpdate::cctv_connected(true))?;
        info!(room = %room, threshold = record.blue_threshold, "cctv connected");

        Ok(Self {
            room,
            store,
            hub,
            config,
            threshold: record.blue_threshold,
            alert_triggered: false,
        })
    }

    /// Run one detection cycle on a captured frame
    ///
    /// Classifies, persists the level, and fires the rising-edge
    /// broadcast. Returns the computed level.
    pub fn step(&mut self, frame: &frame_capture::FrameBuffer) -> Result<f64, CctvError> {
        let detection = DetectionConfig {
            threshold: self.threshold,
            ..self.config.detection.clone()
        };
        let level = detect_blue_level(frame, &detection);

        let should_trigger = level > self.threshold;
        if should_trigger && !self.alert_triggered {
            info!(
                room = %self.room,
                level,
                threshold = self.threshold,
                "threshold crossed, broadcasting alert"
            );
            self.alert_triggered = true;
            self.hub
                .publish(&self.room, RoomMessage::blue_alert(level, self.threshold));
        } else if !should_trigger && self.alert_triggered {
            debug!(room = %self.room, level, "level back under threshold");
            self.alert_triggered = false;
        }

        self.store
            .update(&self.room, SessionUpdate::blue_level(level))?;
        Ok(level)
    }

    /// Drive the detection loop until `stop` flips true
    ///
    /// Capture errors skip the cycle: a camera hiccup must not kill
    /// detection. Sensitivity updates from the store feed apply on the
    /// next cycle.
    pub async fn run<S: FrameSource>(
        &mut self,
        source: &mut S,
        mut stop: watch::Receiver<bool>,
    ) -> Result<(), CctvError> {
        let mut changes = self.store.subscribe();
        let mut cadence = tokio::time::interval(self.config.sample_interval());
        cadence.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = cadence.tick() => {
                    match source.next_frame() {
                        Ok(frame) => {
                            self.step(&frame)?;
                        }
                        Err(e) => {
                            warn!(room = %self.room, "frame capture failed, skipping cycle: {}", e);
                        }
                    }
                }
                change = changes.recv() => {
                    if let Ok(record) = change {
                        if record.room_code == self.room && record.blue_threshold != self.threshold {
                            info!(
                                room = %self.room,
                                threshold = record.blue_threshold,
                                "sensitivity updated"
                            );
                            self.threshold = record.blue_threshold;
                        }
                    }
                }
                _ = stop.changed() => {
                    if *stop.borrow() {
                        break;
                    }
                }
            }
        }

        Ok(())
    }

    /// Current alert edge state
    pub fn alert_triggered(&self) -> bool {
        self.alert_triggered
    }

    /// Active threshold
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Leave the room: mark the role disconnected
    pub async fn disconnect(self) -> Result<(), CctvError> {
        self.store
            .update(&self.room, SessionUpdate::cctv_connected(false))?;
        info!(room = %self.room, "cctv disconnected");
        Ok(())
    }
}
