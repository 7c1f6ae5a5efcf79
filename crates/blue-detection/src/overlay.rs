//! Debug overlay renderer
//!
//! Visualizes the per-pixel decision for calibration: qualifying pixels
//! become a fixed highlight blue, everything else collapses to grayscale.
//! The predicate is duplicated from the classifier on purpose so both
//! paths stay independently testable against the same fixtures.

use crate::config::DetectionConfig;
use frame_capture::FrameBuffer;

/// Highlight color for qualifying pixels (RGBA)
const HIGHLIGHT: [u8; 4] = [0, 150, 255, 200];

/// Render the classifier decision as an overlay frame
///
/// Output has identical dimensions. Qualifying pixels are replaced with
/// the highlight blue; all others become their unweighted channel mean in
/// gray, keeping the original alpha. Unlike the classifier, the overlay
/// applies the predicate to every pixel regardless of alpha: the
/// transparency gate belongs to occupancy counting, not to visualization.
pub fn render_debug_overlay(frame: &FrameBuffer, config: &DetectionConfig) -> FrameBuffer {
    let mut out = Vec::with_capacity(frame.data().len());

    for pixel in frame.pixels() {
        let (r, g, b, a) = (pixel[0], pixel[1], pixel[2], pixel[3]);

        let blue_ratio = b as f64 / r.max(g).max(1) as f64;
        let is_blue = b > config.min_blue_intensity
            && b as f64 > r as f64 * 1.2
            && b as f64 > g as f64 * 1.2
            && blue_ratio > 1.2;

        if is_blue {
            out.extend_from_slice(&HIGHLIGHT);
        } else {
            let gray = ((r as u16 + g as u16 + b as u16) / 3) as u8;
            out.extend_from_slice(&[gray, gray, gray, a]);
        }
    }

    FrameBuffer::new(out, frame.width(), frame.height())
        .expect("overlay preserves input dimensions")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame_from_pixels(width: u32, height: u32, pixels: &[[u8; 4]]) -> FrameBuffer {
        let data: Vec<u8> = pixels.iter().flatten().copied().collect();
        FrameBuffer::new(data, width, height).unwrap()
    }

    #[test]
    fn qualifying_pixels_become_highlight_blue() {
        let frame = frame_from_pixels(1, 1, &[[10, 10, 220, 255]]);
        let overlay = render_debug_overlay(&frame, &DetectionConfig::default());
        assert_eq!(overlay.pixel_at(0, 0), Some([0, 150, 255, 200]));
    }

    #[test]
    fn other_pixels_become_channel_mean_gray() {
        let frame = frame_from_pixels(1, 1, &[[30, 60, 90, 210]]);
        let overlay = render_debug_overlay(&frame, &DetectionConfig::default());
        // (30 + 60 + 90) / 3 = 60, original alpha preserved
        assert_eq!(overlay.pixel_at(0, 0), Some([60, 60, 60, 210]));
    }

    #[test]
    fn overlay_ignores_alpha_when_classifying() {
        // Transparent blue still highlights, unlike occupancy counting.
        let frame = frame_from_pixels(1, 1, &[[0, 0, 220, 0]]);
        let overlay = render_debug_overlay(&frame, &DetectionConfig::default());
        assert_eq!(overlay.pixel_at(0, 0), Some([0, 150, 255, 200]));
    }

    #[test]
    fn overlay_preserves_dimensions() {
        let frame = FrameBuffer::solid(7, 3, [100, 100, 100, 255]);
        let overlay = render_debug_overlay(&frame, &DetectionConfig::default());
        assert_eq!(overlay.width(), 7);
        assert_eq!(overlay.height(), 3);
        assert_eq!(overlay.data().len(), frame.data().len());
    }

    #[test]
    fn overlay_agrees_with_classifier_on_shared_fixture() {
        // Same 2x2 fixture the classifier tests use: two qualifying
        // pixels, two rejected.
        let frame = frame_from_pixels(
            2,
            2,
            &[
                [0, 0, 200, 255],
                [10, 10, 220, 255],
                [255, 255, 255, 255],
                [0, 0, 50, 255],
            ],
        );
        let overlay = render_debug_overlay(&frame, &DetectionConfig::default());

        let highlighted = overlay
            .pixels()
            .filter(|p| *p == [0, 150, 255, 200])
            .count();
        assert_eq!(highlighted, 2);
    }

    #[test]
    fn empty_frame_renders_empty_overlay() {
        let frame = FrameBuffer::new(Vec::new(), 0, 0).unwrap();
        let overlay = render_debug_overlay(&frame, &DetectionConfig::default());
        assert_eq!(overlay.pixel_count(), 0);
    }
}
