//! Detection configuration

use serde::{Deserialize, Serialize};

/// Blue detection configuration
///
/// `threshold` is the occupancy fraction above which callers treat the
/// condition as met; the classifier itself only computes occupancy and
/// never reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Occupancy fraction for alerting, in (0, 1]
    pub threshold: f64,

    /// Minimum blue channel value for a pixel to qualify (0-255)
    pub min_blue_intensity: u8,

    /// Enable debug overlay rendering in the capture UI
    pub debug_mode: bool,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            min_blue_intensity: 100,
            debug_mode: false,
        }
    }
}

impl DetectionConfig {
    /// Sensitive config (small patches of blue already alert)
    pub fn sensitive() -> Self {
        Self {
            threshold: 0.02,
            ..Default::default()
        }
    }

    /// Relaxed config (most of the frame must be blue)
    pub fn relaxed() -> Self {
        Self {
            threshold: 0.5,
            ..Default::default()
        }
    }

    /// Override the alerting threshold, clamped to (0, 1]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold.clamp(0.01, 1.0);
        self
    }
}
