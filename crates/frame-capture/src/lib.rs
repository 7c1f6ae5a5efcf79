//! Frame Capture Library for BlueWatch
//!
//! Provides RGBA frame acquisition for the CCTV role:
//! - Raw RGBA8 frame buffer type shared with the detection pipeline
//! - Frame source abstraction (one frame per detection cycle)
//! - Synthetic and still-image sources for tests and calibration

pub mod frame;
pub mod source;

pub use frame::FrameBuffer;
pub use source::{FrameSource, StillImageSource, SyntheticCamera};

use thiserror::Error;

/// Camera error types
#[derive(Error, Debug)]
pub enum CameraError {
    #[error("Failed to open camera: {0}")]
    Open(String),

    #[error("Invalid frame data: {0}")]
    Format(String),

    #[error("Image decode failed: {0}")]
    Decode(String),

    #[error("Capture timeout")]
    Timeout,

    #[error("Camera not initialized")]
    NotInitialized,
}

/// Capture configuration
#[derive(Debug, Clone)]
pub struct CaptureConfig {
    /// Requested capture width
    pub width: u32,
    /// Requested capture height
    pub height: u32,
    /// Detection cadence in milliseconds (one classified frame per tick)
    pub sample_interval_ms: u64,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            sample_interval_ms: 1000,
        }
    }
}

impl CaptureConfig {
    /// Low-resolution config for constrained devices
    pub fn low_res() -> Self {
        Self {
            width: 640,
            height: 480,
            sample_interval_ms: 1000,
        }
    }
}
