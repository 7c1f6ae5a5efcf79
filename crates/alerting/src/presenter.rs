//! Presentation capability trait
//!
//! Audio, vibration, and notification are platform capabilities the
//! dispatcher drives on raise/clear. Implementations are best-effort:
//! the dispatcher logs failures and never lets them block a transition.

use thiserror::Error;
use tracing::debug;

/// Vibration pattern on alert: pulse, pause, pulse, pause, long pulse (ms)
pub const ALERT_VIBRATION_PATTERN: [u64; 5] = [200, 100, 200, 100, 400];

/// Notification tag: repeated alerts replace instead of stacking
pub const ALERT_NOTIFICATION_TAG: &str = "blue-alert";

/// Presentation error types
#[derive(Error, Debug)]
pub enum PresentError {
    #[error("Capability unavailable: {0}")]
    Unavailable(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Playback failed: {0}")]
    Playback(String),
}

/// Per-monitor presentation toggles
#[derive(Debug, Clone)]
pub struct MonitorSettings {
    /// Play the looping alert sound on raise
    pub sound_enabled: bool,
    /// Run the vibration pattern on raise
    pub vibration_enabled: bool,
    /// Show a local notification on raise
    pub notifications_enabled: bool,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            vibration_enabled: true,
            notifications_enabled: true,
        }
    }
}

impl MonitorSettings {
    /// All presentation off (history and state tracking only)
    pub fn silent() -> Self {
        Self {
            sound_enabled: false,
            vibration_enabled: false,
            notifications_enabled: false,
        }
    }
}

/// Platform presentation surface for alerts
///
/// Stop operations are infallible: tearing presentation down must always
/// succeed from the state machine's point of view.
pub trait Presenter: Send {
    /// Start the looping alert sound from the beginning
    fn play_alert_audio(&mut self) -> Result<(), PresentError>;

    /// Stop the alert sound
    fn stop_alert_audio(&mut self);

    /// Run a vibration pattern (alternating pulse/pause durations in ms)
    fn vibrate(&mut self, pattern: &[u64]) -> Result<(), PresentError>;

    /// Cancel any running vibration
    fn cancel_vibration(&mut self);

    /// Show a local notification; `tag` replaces earlier ones
    fn show_notification(&mut self, title: &str, body: &str, tag: &str)
        -> Result<(), PresentError>;
}

/// Presenter that only logs, for headless monitors
#[derive(Debug, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn play_alert_audio(&mut self) -> Result<(), PresentError> {
        debug!("audio loop started");
        Ok(())
    }

    fn stop_alert_audio(&mut self) {
        debug!("audio loop stopped");
    }

    fn vibrate(&mut self, pattern: &[u64]) -> Result<(), PresentError> {
        debug!(?pattern, "vibration requested");
        Ok(())
    }

    fn cancel_vibration(&mut self) {
        debug!("vibration cancelled");
    }

    fn show_notification(
        &mut self,
        title: &str,
        body: &str,
        tag: &str,
    ) -> Result<(), PresentError> {
        debug!(title, body, tag, "notification shown");
        Ok(())
    }
}

/// Presenter recording every call, for assertions in tests
#[derive(Debug, Default)]
pub struct MemoryPresenter {
    pub audio_started: usize,
    pub audio_stopped: usize,
    pub vibrations: Vec<Vec<u64>>,
    pub vibration_cancels: usize,
    pub notifications: Vec<(String, String, String)>,
    /// When set, fallible calls return this error kind
    pub fail_all: bool,
}

impl Presenter for MemoryPresenter {
    fn play_alert_audio(&mut self) -> Result<(), PresentError> {
        self.audio_started += 1;
        if self.fail_all {
            return Err(PresentError::Playback("blocked by platform policy".into()));
        }
        Ok(())
    }

    fn stop_alert_audio(&mut self) {
        self.audio_stopped += 1;
    }

    fn vibrate(&mut self, pattern: &[u64]) -> Result<(), PresentError> {
        self.vibrations.push(pattern.to_vec());
        if self.fail_all {
            return Err(PresentError::Unavailable("vibration unsupported".into()));
        }
        Ok(())
    }

    fn cancel_vibration(&mut self) {
        self.vibration_cancels += 1;
    }

    fn show_notification(
        &mut self,
        title: &str,
        body: &str,
        tag: &str,
    ) -> Result<(), PresentError> {
        self.notifications
            .push((title.to_string(), body.to_string(), tag.to_string()));
        if self.fail_all {
            return Err(PresentError::PermissionDenied("notifications denied".into()));
        }
        Ok(())
    }
}
