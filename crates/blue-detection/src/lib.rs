//! Blue-Dominance Detection
//!
//! Frame-level color classification for the CCTV role:
//! - RGB predicate classifier producing an occupancy level in [0, 1]
//! - Alternate HSL-based classifier for calibration comparison
//! - Debug overlay renderer visualizing the per-pixel decision
//!
//! All operations are pure and total: they borrow a frame read-only,
//! never fail, and are safe to call concurrently.

pub mod classify;
pub mod config;
pub mod hsl;
pub mod overlay;

pub use classify::detect_blue_level;
pub use config::DetectionConfig;
pub use hsl::{detect_blue_level_hsl, rgb_to_hsl};
pub use overlay::render_debug_overlay;
