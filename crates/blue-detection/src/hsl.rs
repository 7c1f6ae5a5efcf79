//! HSL-based alternate classifier
//!
//! Not wired into the default pipeline; kept for calibration comparison
//! against the RGB predicate on the same footage.

use frame_capture::FrameBuffer;

/// Convert 8-bit RGB to (hue in degrees, saturation, lightness)
///
/// Hue is in [0, 360), saturation and lightness in [0, 1]. Achromatic
/// pixels (max == min) report hue and saturation 0.
pub fn rgb_to_hsl(r: u8, g: u8, b: u8) -> (f64, f64, f64) {
    let r = r as f64 / 255.0;
    let g = g as f64 / 255.0;
    let b = b as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return (0.0, 0.0, l);
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };

    let h = if max == r {
        ((g - b) / d + if g < b { 6.0 } else { 0.0 }) / 6.0
    } else if max == g {
        ((b - r) / d + 2.0) / 6.0
    } else {
        ((r - g) / d + 4.0) / 6.0
    };

    (h * 360.0, s, l)
}

/// Compute the blue occupancy level via HSL classification
///
/// A pixel qualifies when hue falls in [200°, 240°], saturation exceeds
/// 0.5, and lightness is strictly between 0.2 and 0.8. Exclusion and
/// denominator semantics match [`crate::detect_blue_level`]: alpha < 128
/// skips the pixel, the denominator stays `width * height`, and
/// zero-pixel frames return 0.0.
pub fn detect_blue_level_hsl(frame: &FrameBuffer) -> f64 {
    let total_pixels = frame.pixel_count();
    if total_pixels == 0 {
        return 0.0;
    }

    let mut blue_pixels = 0usize;
    for pixel in frame.pixels() {
        let (r, g, b, a) = (pixel[0], pixel[1], pixel[2], pixel[3]);

        if a < 128 {
            continue;
        }

        let (h, s, l) = rgb_to_hsl(r, g, b);
        if (200.0..=240.0).contains(&h) && s > 0.5 && l > 0.2 && l < 0.8 {
            blue_pixels += 1;
        }
    }

    blue_pixels as f64 / total_pixels as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_colors_convert_to_expected_hues() {
        let (h, s, l) = rgb_to_hsl(255, 0, 0);
        assert_eq!(h, 0.0);
        assert_eq!(s, 1.0);
        assert_eq!(l, 0.5);

        let (h, _, _) = rgb_to_hsl(0, 255, 0);
        assert_eq!(h, 120.0);

        let (h, _, _) = rgb_to_hsl(0, 0, 255);
        assert_eq!(h, 240.0);
    }

    #[test]
    fn achromatic_pixels_have_zero_hue_and_saturation() {
        let (h, s, l) = rgb_to_hsl(128, 128, 128);
        assert_eq!(h, 0.0);
        assert_eq!(s, 0.0);
        assert!((l - 128.0 / 255.0).abs() < 1e-9);
    }

    #[test]
    fn pure_blue_qualifies() {
        let frame = FrameBuffer::solid(4, 4, [0, 0, 255, 255]);
        assert_eq!(detect_blue_level_hsl(&frame), 1.0);
    }

    #[test]
    fn dark_blue_fails_the_lightness_band() {
        // (0, 0, 90): l ~= 0.176, below the 0.2 floor
        let frame = FrameBuffer::solid(4, 4, [0, 0, 90, 255]);
        assert_eq!(detect_blue_level_hsl(&frame), 0.0);
    }

    #[test]
    fn washed_out_blue_fails_the_saturation_floor() {
        // (150, 150, 180): saturated well below 0.5
        let frame = FrameBuffer::solid(4, 4, [150, 150, 180, 255]);
        assert_eq!(detect_blue_level_hsl(&frame), 0.0);
    }

    #[test]
    fn cyan_is_outside_the_hue_band() {
        // (0, 255, 255): hue 180
        let frame = FrameBuffer::solid(4, 4, [0, 255, 255, 255]);
        assert_eq!(detect_blue_level_hsl(&frame), 0.0);
    }

    #[test]
    fn transparent_pixels_dilute_the_denominator() {
        let data = vec![
            0, 0, 255, 255, //
            0, 0, 255, 0, //
        ];
        let frame = FrameBuffer::new(data, 2, 1).unwrap();
        assert_eq!(detect_blue_level_hsl(&frame), 0.5);
    }

    #[test]
    fn zero_dimension_frame_yields_zero() {
        let frame = FrameBuffer::new(Vec::new(), 0, 0).unwrap();
        assert_eq!(detect_blue_level_hsl(&frame), 0.0);
    }
}
