//! Alerting System
//!
//! Monitor-side alert handling:
//! - State machine deciding when a threshold crossing becomes a visible,
//!   debounced, rate-limited alert (cooldown, auto-clear, duplicate
//!   suppression)
//! - Bounded alert history for the monitoring UI
//! - Presentation capability trait (audio, vibration, notification)
//! - Single-queue async dispatcher serializing all inputs

mod dispatcher;
mod machine;
mod presenter;

pub use dispatcher::{AlertDispatcher, AlertSnapshot, DispatcherHandle};
pub use machine::{AlertConfig, AlertEffect, AlertInput, AlertPhase, AlertRecord, AlertStateMachine};
pub use presenter::{MemoryPresenter, MonitorSettings, NullPresenter, PresentError, Presenter};
