//! Alert state machine

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Alert timing configuration
#[derive(Debug, Clone)]
pub struct AlertConfig {
    /// Minimum interval between two accepted triggers
    pub cooldown: Duration,
    /// Automatic return to idle after a trigger, absent an earlier
    /// de-escalating observation
    pub auto_clear: Duration,
    /// Bounded history capacity (newest first, oldest evicted)
    pub history_capacity: usize,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            cooldown: Duration::from_secs(30),
            auto_clear: Duration::from_secs(10),
            history_capacity: 10,
        }
    }
}

impl AlertConfig {
    /// Short windows for interactive testing
    pub fn rapid() -> Self {
        Self {
            cooldown: Duration::from_secs(3),
            auto_clear: Duration::from_secs(1),
            history_capacity: 10,
        }
    }
}

/// Inputs to the state machine, serialized through one inbox
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AlertInput {
    /// Session state changed: current occupancy level vs. threshold
    Observe { level: f64, threshold: f64 },
    /// Explicit alert event from the broadcast channel
    AlertSignal { level: f64 },
    /// User cleared the alert
    ManualStop,
    /// Auto-clear deadline reached
    Tick,
}

/// Machine phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AlertPhase {
    #[default]
    Idle,
    Active,
}

/// Presentation effect requested by a transition
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AlertEffect {
    /// Start audio/vibration/notification presentation
    Raised { level: f64 },
    /// Stop audio and vibration, cancel pending auto-clear
    Cleared,
}

/// One entry in the bounded alert history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRecord {
    /// Local wall-clock time of the trigger (HH:MM:SS)
    pub timestamp_local: String,
    /// Occupancy level that triggered the alert
    pub level: f64,
}

/// Alert state machine
///
/// Owned by exactly one monitor session and driven from a single queue;
/// the transition function is total over [`AlertInput`] and performs no
/// I/O. Two guards prevent double presentation: the active-state check
/// (the state-sync feed and the broadcast channel can both report the
/// same real-world event) and the cooldown window (occupancy oscillating
/// near the threshold must not re-trigger rapidly).
#[derive(Debug)]
pub struct AlertStateMachine {
    config: AlertConfig,
    phase: AlertPhase,
    last_triggered_at: Option<Instant>,
    auto_clear_deadline: Option<Instant>,
    history: VecDeque<AlertRecord>,
}

impl AlertStateMachine {
    pub fn new(config: AlertConfig) -> Self {
        Self {
            config,
            phase: AlertPhase::Idle,
            last_triggered_at: None,
            auto_clear_deadline: None,
            history: VecDeque::new(),
        }
    }

    /// Apply one input at the given instant
    ///
    /// Returns the presentation effect the caller must carry out, if any.
    /// Inputs that do not apply in the current phase are no-ops.
    pub fn handle(&mut self, input: AlertInput, now: Instant) -> Option<AlertEffect> {
        match input {
            AlertInput::Observe { level, threshold } => {
                if level > threshold {
                    self.try_raise(level, now)
                } else if self.phase == AlertPhase::Active {
                    debug!(level, threshold, "level back under threshold, clearing");
                    Some(self.clear())
                } else {
                    None
                }
            }
            AlertInput::AlertSignal { level } => self.try_raise(level, now),
            AlertInput::ManualStop => {
                if self.phase == AlertPhase::Active {
                    info!("alert stopped manually");
                    Some(self.clear())
                } else {
                    None
                }
            }
            AlertInput::Tick => {
                if self.phase == AlertPhase::Active {
                    info!("alert auto-cleared");
                    Some(self.clear())
                } else {
                    None
                }
            }
        }
    }

    /// Force the machine idle with full cleanup, regardless of phase
    ///
    /// Used on session teardown; the returned effect is always `Cleared`
    /// so the caller stops any presentation unconditionally.
    pub fn force_idle(&mut self) -> AlertEffect {
        self.clear()
    }

    fn try_raise(&mut self, level: f64, now: Instant) -> Option<AlertEffect> {
        if self.phase == AlertPhase::Active {
            debug!(level, "alert already active, suppressing duplicate trigger");
            return None;
        }

        if let Some(last) = self.last_triggered_at {
            let since = now.saturating_duration_since(last);
            if since < self.config.cooldown {
                debug!(
                    level,
                    elapsed_ms = since.as_millis() as u64,
                    "trigger suppressed by cooldown"
                );
                return None;
            }
        }

        self.phase = AlertPhase::Active;
        self.last_triggered_at = Some(now);
        self.auto_clear_deadline = Some(now + self.config.auto_clear);

        self.history.push_front(AlertRecord {
            timestamp_local: chrono::Local::now().format("%H:%M:%S").to_string(),
            level,
        });
        self.history.truncate(self.config.history_capacity);

        info!(level, "alert raised");
        Some(AlertEffect::Raised { level })
    }

    fn clear(&mut self) -> AlertEffect {
        self.phase = AlertPhase::Idle;
        self.auto_clear_deadline = None;
        AlertEffect::Cleared
    }

    pub fn phase(&self) -> AlertPhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == AlertPhase::Active
    }

    /// Pending auto-clear deadline, set exactly while active
    pub fn auto_clear_deadline(&self) -> Option<Instant> {
        self.auto_clear_deadline
    }

    pub fn last_triggered_at(&self) -> Option<Instant> {
        self.last_triggered_at
    }

    /// Alert history, newest first
    pub fn history(&self) -> impl Iterator<Item = &AlertRecord> {
        self.history.iter()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}

impl Default for AlertStateMachine {
    fn default() -> Self {
        Self::new(AlertConfig::default())
    }
}
