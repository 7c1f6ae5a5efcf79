//! CCTV Role
//!
//! Sensor side of a BlueWatch session:
//! - Captures one frame per detection cycle (1s cadence)
//! - Classifies blue occupancy and persists the level to the session
//! - Broadcasts a `blue_alert` on the rising edge of a threshold crossing
//! - Picks up sensitivity changes pushed by the monitor

mod session;

pub use session::{CctvConfig, CctvSession};

use frame_capture::CameraError;
use session_store::StoreError;
use thiserror::Error;

/// CCTV role errors
#[derive(Debug, Error)]
pub enum CctvError {
    #[error("Session error: {0}")]
    Store(#[from] StoreError),

    #[error("Camera error: {0}")]
    Camera(#[from] CameraError),
}
