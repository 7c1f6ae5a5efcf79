//! Frame sources
//!
//! A [`FrameSource`] hands one frame per detection cycle to the CCTV role.
//! Production builds plug a platform camera in here; the sources below back
//! tests, calibration, and demo runs.

use crate::frame::FrameBuffer;
use crate::CameraError;
use tracing::debug;

fn now_ms() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

/// Supplies frames to the detection loop, one per call
///
/// Capture must be synchronous and bounded; the caller owns the cadence.
pub trait FrameSource: Send {
    /// Produce the next frame
    fn next_frame(&mut self) -> Result<FrameBuffer, CameraError>;
}

/// Synthetic camera producing frames with a configurable blue fill fraction
///
/// Pixels in the leading fraction of the buffer are a saturated blue, the
/// rest a neutral gray. Useful for exercising the detection pipeline
/// without hardware.
pub struct SyntheticCamera {
    width: u32,
    height: u32,
    blue_fraction: f64,
    sequence: u32,
}

impl SyntheticCamera {
    pub fn new(width: u32, height: u32, blue_fraction: f64) -> Self {
        Self {
            width,
            height,
            blue_fraction: blue_fraction.clamp(0.0, 1.0),
            sequence: 0,
        }
    }

    /// Change the simulated blue coverage for subsequent frames
    pub fn set_blue_fraction(&mut self, fraction: f64) {
        self.blue_fraction = fraction.clamp(0.0, 1.0);
    }
}

impl FrameSource for SyntheticCamera {
    fn next_frame(&mut self) -> Result<FrameBuffer, CameraError> {
        let total = self.width as usize * self.height as usize;
        let blue_pixels = (total as f64 * self.blue_fraction).round() as usize;

        let mut data = Vec::with_capacity(total * 4);
        for i in 0..total {
            if i < blue_pixels {
                data.extend_from_slice(&[20, 30, 220, 255]);
            } else {
                data.extend_from_slice(&[120, 120, 120, 255]);
            }
        }

        let mut frame = FrameBuffer::new(data, self.width, self.height)?;
        self.sequence = self.sequence.wrapping_add(1);
        frame.sequence = self.sequence;
        frame.timestamp_ms = now_ms();
        debug!(sequence = frame.sequence, "synthetic frame produced");
        Ok(frame)
    }
}

/// Frame source backed by pre-decoded still images, cycled in order
///
/// Intended for calibration runs against captured snapshots.
pub struct StillImageSource {
    frames: Vec<FrameBuffer>,
    cursor: usize,
    sequence: u32,
}

impl StillImageSource {
    /// Build a source from encoded image bytes (PNG, JPEG, ...)
    pub fn from_encoded(images: &[&[u8]]) -> Result<Self, CameraError> {
        if images.is_empty() {
            return Err(CameraError::Open("no images supplied".into()));
        }
        let frames = images
            .iter()
            .map(|bytes| FrameBuffer::from_image_bytes(bytes))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            frames,
            cursor: 0,
            sequence: 0,
        })
    }

    /// Build a source from already-decoded frames
    pub fn from_frames(frames: Vec<FrameBuffer>) -> Result<Self, CameraError> {
        if frames.is_empty() {
            return Err(CameraError::Open("no frames supplied".into()));
        }
        Ok(Self {
            frames,
            cursor: 0,
            sequence: 0,
        })
    }
}

impl FrameSource for StillImageSource {
    fn next_frame(&mut self) -> Result<FrameBuffer, CameraError> {
        let mut frame = self.frames[self.cursor].clone();
        self.cursor = (self.cursor + 1) % self.frames.len();
        self.sequence = self.sequence.wrapping_add(1);
        frame.sequence = self.sequence;
        frame.timestamp_ms = now_ms();
        Ok(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthetic_camera_fills_requested_fraction() {
        let mut camera = SyntheticCamera::new(10, 10, 0.25);
        let frame = camera.next_frame().unwrap();

        let blue = frame
            .pixels()
            .filter(|p| p[2] > 200 && p[0] < 100)
            .count();
        assert_eq!(blue, 25);
        assert_eq!(frame.sequence, 1);
    }

    #[test]
    fn synthetic_camera_sequence_advances() {
        let mut camera = SyntheticCamera::new(2, 2, 1.0);
        assert_eq!(camera.next_frame().unwrap().sequence, 1);
        assert_eq!(camera.next_frame().unwrap().sequence, 2);
    }

    #[test]
    fn still_source_cycles_frames() {
        let a = FrameBuffer::solid(1, 1, [0, 0, 255, 255]);
        let b = FrameBuffer::solid(1, 1, [255, 0, 0, 255]);
        let mut source = StillImageSource::from_frames(vec![a, b]).unwrap();

        assert_eq!(source.next_frame().unwrap().pixel_at(0, 0).unwrap()[2], 255);
        assert_eq!(source.next_frame().unwrap().pixel_at(0, 0).unwrap()[0], 255);
        // wraps around
        assert_eq!(source.next_frame().unwrap().pixel_at(0, 0).unwrap()[2], 255);
    }

    #[test]
    fn still_source_rejects_empty_input() {
        assert!(StillImageSource::from_frames(Vec::new()).is_err());
    }
}
