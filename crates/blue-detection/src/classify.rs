//! RGB predicate classifier

use crate::config::DetectionConfig;
use frame_capture::FrameBuffer;

/// Per-pixel blue predicate
///
/// A pixel qualifies when the blue channel clears the configured floor and
/// dominates red and green by at least 20%. The ratio clause is implied by
/// the channel comparisons over the reals, but the `max(r, g, 1)` floor
/// makes it reject near-black pixels the other clauses let through, and it
/// must stay an explicit separate check for exact numeric compatibility.
fn is_blue_pixel(r: u8, g: u8, b: u8, min_blue_intensity: u8) -> bool {
    let blue_ratio = b as f64 / r.max(g).max(1) as f64;
    b > min_blue_intensity
        && b as f64 > r as f64 * 1.2
        && b as f64 > g as f64 * 1.2
        && blue_ratio > 1.2
}

/// Compute the blue occupancy level of a frame, in [0, 1]
///
/// Pixels with alpha < 128 are skipped from the match count, but the
/// denominator stays the total pixel count (`width * height`), not the
/// opaque count. Transparent regions therefore dilute the level. This is
/// load-bearing for numeric compatibility with existing deployments; do
/// not change it to an opaque-pixel denominator.
///
/// Zero-pixel frames return exactly 0.0.
pub fn detect_blue_level(frame: &FrameBuffer, config: &DetectionConfig) -> f64 {
    let total_pixels = frame.pixel_count();
    if total_pixels == 0 {
        return 0.0;
    }

    let mut blue_pixels = 0usize;
    for pixel in frame.pixels() {
        let (r, g, b, a) = (pixel[0], pixel[1], pixel[2], pixel[3]);

        // Transparent pixels never qualify
        if a < 128 {
            continue;
        }

        if is_blue_pixel(r, g, b, config.min_blue_intensity) {
            blue_pixels += 1;
        }
    }

    blue_pixels as f64 / total_pixels as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame_from_pixels(width: u32, height: u32, pixels: &[[u8; 4]]) -> FrameBuffer {
        let data: Vec<u8> = pixels.iter().flatten().copied().collect();
        FrameBuffer::new(data, width, height).unwrap()
    }

    #[test]
    fn mixed_frame_counts_qualifying_pixels() {
        // Pixels 1 and 2 qualify; pixel 3 fails the dominance tests,
        // pixel 4 fails the intensity floor.
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
        let level = detect_blue_level(&frame, &DetectionConfig::default());
        assert_eq!(level, 0.5);
    }

    #[test]
    fn all_channels_below_intensity_floor_yields_zero() {
        let frame = FrameBuffer::solid(8, 8, [90, 90, 99, 255]);
        assert_eq!(detect_blue_level(&frame, &DetectionConfig::default()), 0.0);
    }

    #[test]
    fn fully_transparent_frame_yields_zero() {
        let frame = FrameBuffer::solid(8, 8, [0, 0, 255, 0]);
        assert_eq!(detect_blue_level(&frame, &DetectionConfig::default()), 0.0);
    }

    #[test]
    fn zero_dimension_frame_yields_zero_not_nan() {
        let frame = FrameBuffer::new(Vec::new(), 0, 0).unwrap();
        let level = detect_blue_level(&frame, &DetectionConfig::default());
        assert_eq!(level, 0.0);
        assert!(!level.is_nan());
    }

    #[test]
    fn transparent_pixels_dilute_the_denominator() {
        // 2 opaque blue + 2 transparent: numerator 2, denominator 4.
        let frame = frame_from_pixels(
            2,
            2,
            &[
                [0, 0, 255, 255],
                [0, 0, 255, 255],
                [0, 0, 255, 0],
                [0, 0, 255, 0],
            ],
        );
        assert_eq!(detect_blue_level(&frame, &DetectionConfig::default()), 0.5);
    }

    #[test]
    fn alpha_cutoff_is_exactly_128() {
        let frame = frame_from_pixels(2, 1, &[[0, 0, 255, 127], [0, 0, 255, 128]]);
        assert_eq!(detect_blue_level(&frame, &DetectionConfig::default()), 0.5);
    }

    #[test]
    fn ratio_floor_rejects_near_black_blue() {
        // r = g = 0 passes both dominance tests for any b > 0, but the
        // ratio denominator floors at 1: b = 1 gives ratio 1.0 (reject),
        // b = 2 gives ratio 2.0 (accept).
        let config = DetectionConfig {
            min_blue_intensity: 0,
            ..Default::default()
        };
        let rejected = frame_from_pixels(1, 1, &[[0, 0, 1, 255]]);
        let accepted = frame_from_pixels(1, 1, &[[0, 0, 2, 255]]);
        assert_eq!(detect_blue_level(&rejected, &config), 0.0);
        assert_eq!(detect_blue_level(&accepted, &config), 1.0);
    }

    #[test]
    fn dominance_boundary_is_strict() {
        // 10 * 1.2 rounds to exactly 12.0 in f64, so b = 12 is rejected
        // and b = 13 accepted.
        let config = DetectionConfig {
            min_blue_intensity: 0,
            ..Default::default()
        };
        let at_boundary = frame_from_pixels(1, 1, &[[10, 10, 12, 255]]);
        let above_boundary = frame_from_pixels(1, 1, &[[10, 10, 13, 255]]);
        assert_eq!(detect_blue_level(&at_boundary, &config), 0.0);
        assert_eq!(detect_blue_level(&above_boundary, &config), 1.0);
    }

    #[test]
    fn intensity_floor_is_strict() {
        let config = DetectionConfig::default();
        let at_floor = frame_from_pixels(1, 1, &[[0, 0, 100, 255]]);
        let above_floor = frame_from_pixels(1, 1, &[[0, 0, 101, 255]]);
        assert_eq!(detect_blue_level(&at_floor, &config), 0.0);
        assert_eq!(detect_blue_level(&above_floor, &config), 1.0);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn arb_frame(max_side: u32) -> impl Strategy<Value = FrameBuffer> {
            (1..=max_side, 1..=max_side)
                .prop_flat_map(|(w, h)| {
                    let len = (w * h * 4) as usize;
                    (Just(w), Just(h), proptest::collection::vec(any::<u8>(), len))
                })
                .prop_map(|(w, h, data)| FrameBuffer::new(data, w, h).unwrap())
        }

        proptest! {
            #[test]
            fn level_is_always_in_unit_interval(frame in arb_frame(16)) {
                let level = detect_blue_level(&frame, &DetectionConfig::default());
                prop_assert!((0.0..=1.0).contains(&level));
            }

            #[test]
            fn classification_is_idempotent(frame in arb_frame(16)) {
                let config = DetectionConfig::default();
                prop_assert_eq!(
                    detect_blue_level(&frame, &config),
                    detect_blue_level(&frame, &config)
                );
            }

            #[test]
            fn adding_qualifying_pixels_never_decreases_level(
                frame in arb_frame(12),
                index in any::<prop::sample::Index>(),
            ) {
                let config = DetectionConfig::default();
                let before = detect_blue_level(&frame, &config);

                let mut data = frame.data().to_vec();
                let pixel = index.index(frame.pixel_count()) * 4;
                data[pixel..pixel + 4].copy_from_slice(&[0, 0, 255, 255]);
                let brighter =
                    FrameBuffer::new(data, frame.width(), frame.height()).unwrap();

                prop_assert!(detect_blue_level(&brighter, &config) >= before);
            }
        }
    }
}
