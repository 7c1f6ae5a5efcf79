//! Single-queue alert dispatcher
//!
//! All inputs (state-sync observations, broadcast signals, manual stops,
//! and the auto-clear timer) are serialized into one inbox and applied
//! to the state machine one at a time, in arrival order. External feeds
//! only enqueue; nothing mutates the machine from outside this task, so
//! the active-state guard cannot race a concurrent trigger.
//!
//! The auto-clear timer is a select arm recomputed from machine state
//! after every input. Clearing the deadline disarms the timer; no
//! callback can fire into a session that already cleared or tore down.

use crate::machine::{AlertConfig, AlertEffect, AlertInput, AlertRecord, AlertStateMachine};
use crate::presenter::{
    MonitorSettings, Presenter, ALERT_NOTIFICATION_TAG, ALERT_VIBRATION_PATTERN,
};
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

const INBOX_CAPACITY: usize = 64;

/// Read-only view of machine state for rendering
#[derive(Debug, Clone, Default)]
pub struct AlertSnapshot {
    /// Alert currently active
    pub active: bool,
    /// History, newest first, at most the configured capacity
    pub history: Vec<AlertRecord>,
}

/// Spawns and owns the dispatcher task
pub struct AlertDispatcher;

impl AlertDispatcher {
    /// Spawn the dispatcher with its machine and presenter
    pub fn spawn<P>(config: AlertConfig, presenter: P, settings: MonitorSettings) -> DispatcherHandle
    where
        P: Presenter + 'static,
    {
        let (inbox_tx, inbox_rx) = mpsc::channel(INBOX_CAPACITY);
        let (snapshot_tx, snapshot_rx) = watch::channel(AlertSnapshot::default());

        let machine = AlertStateMachine::new(config);
        let task = tokio::spawn(run(machine, presenter, settings, inbox_rx, snapshot_tx));

        info!("alert dispatcher started");
        DispatcherHandle {
            inbox: inbox_tx,
            snapshot: snapshot_rx,
            task,
        }
    }
}

/// Handle to a running dispatcher
///
/// Dropping every inbox sender (this handle plus any clones held by
/// bridge tasks) shuts the dispatcher down with full cleanup.
pub struct DispatcherHandle {
    inbox: mpsc::Sender<AlertInput>,
    snapshot: watch::Receiver<AlertSnapshot>,
    task: JoinHandle<()>,
}

impl DispatcherHandle {
    /// Enqueue an input; dropped with a warning if the dispatcher is gone
    pub async fn send(&self, input: AlertInput) {
        if self.inbox.send(input).await.is_err() {
            warn!(?input, "alert inbox closed, input dropped");
        }
    }

    /// Clone of the inbox sender for bridge tasks
    pub fn inbox(&self) -> mpsc::Sender<AlertInput> {
        self.inbox.clone()
    }

    /// Current machine state
    pub fn snapshot(&self) -> AlertSnapshot {
        self.snapshot.borrow().clone()
    }

    /// Watch feed of state changes
    pub fn subscribe(&self) -> watch::Receiver<AlertSnapshot> {
        self.snapshot.clone()
    }

    /// Close the inbox and wait for the dispatcher to clean up and exit
    ///
    /// Callers must drop any inbox clones first, or the dispatcher keeps
    /// waiting for them.
    pub async fn shutdown(self) {
        drop(self.inbox);
        if let Err(e) = self.task.await {
            warn!("alert dispatcher task failed: {}", e);
        }
    }
}

async fn run<P: Presenter>(
    mut machine: AlertStateMachine,
    mut presenter: P,
    settings: MonitorSettings,
    mut inbox: mpsc::Receiver<AlertInput>,
    snapshot_tx: watch::Sender<AlertSnapshot>,
) {
    loop {
        let deadline = machine.auto_clear_deadline().map(tokio::time::Instant::from_std);
        let armed = deadline.is_some();
        let wake = deadline
            .unwrap_or_else(|| tokio::time::Instant::now() + Duration::from_secs(86_400));

        let input = tokio::select! {
            maybe = inbox.recv() => match maybe {
                Some(input) => input,
                None => break,
            },
            _ = tokio::time::sleep_until(wake), if armed => AlertInput::Tick,
        };

        if let Some(effect) = machine.handle(input, Instant::now()) {
            apply_effect(&mut presenter, &settings, effect);
            publish(&snapshot_tx, &machine);
        }
    }

    // Inbox closed: session teardown. Unconditional cleanup.
    let effect = machine.force_idle();
    apply_effect(&mut presenter, &settings, effect);
    publish(&snapshot_tx, &machine);
    info!("alert dispatcher stopped");
}

fn publish(snapshot_tx: &watch::Sender<AlertSnapshot>, machine: &AlertStateMachine) {
    let snapshot = AlertSnapshot {
        active: machine.is_active(),
        history: machine.history().cloned().collect(),
    };
    // Receivers may all be gone during teardown
    let _ = snapshot_tx.send(snapshot);
}

/// Carry out a presentation effect, best-effort
///
/// Failures are logged and ignored: a blocked audio device or a denied
/// notification permission never reverses a state transition.
fn apply_effect<P: Presenter>(presenter: &mut P, settings: &MonitorSettings, effect: AlertEffect) {
    match effect {
        AlertEffect::Raised { level } => {
            if settings.sound_enabled {
                if let Err(e) = presenter.play_alert_audio() {
                    warn!("alert audio failed: {}", e);
                }
            }
            if settings.vibration_enabled {
                if let Err(e) = presenter.vibrate(&ALERT_VIBRATION_PATTERN) {
                    warn!("vibration failed: {}", e);
                }
            }
            if settings.notifications_enabled {
                let body = format!("Blue level at {:.1}%", level * 100.0);
                if let Err(e) =
                    presenter.show_notification("BlueWatch alert", &body, ALERT_NOTIFICATION_TAG)
                {
                    warn!("notification failed: {}", e);
                }
            }
        }
        AlertEffect::Cleared => {
            presenter.stop_alert_audio();
            presenter.cancel_vibration();
            debug!("presentation stopped");
        }
    }
}
