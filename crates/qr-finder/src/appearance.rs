use nalgebra::Point2;
use qr_finder_core::{sample_bilinear, GrayImageView};

use crate::frame::CanonicalFrame;

/// Number of samples per scan line, one per module of the 7-module pattern.
pub(crate) const SAMPLES: usize = 7;

/// Does the candidate square look like a position pattern?
///
/// A horizontal and a vertical scan line through the middle of the square are
/// sampled in the canonical frame; each must show the
/// dark/light/dark/dark/dark/light/dark sequence of the 1:1:3:1:1 finder
/// pattern rings. Degenerate corner geometry rejects the candidate.
pub fn check_appearance(
    gray: &GrayImageView<'_>,
    frame: &CanonicalFrame,
    square: &[Point2<f32>; 4],
    gray_threshold: f32,
) -> bool {
    let Some(to_image) = frame.map_to_image(square) else {
        return false;
    };

    let module = frame.side() / SAMPLES as f32;
    let mid = frame.side() / 2.0;
    let mut line_x = [0.0_f32; SAMPLES];
    let mut line_y = [0.0_f32; SAMPLES];

    for i in 0..SAMPLES {
        // Sample at the center of module i.
        let location = module * i as f32 + module / 2.0;

        let px = to_image.apply(Point2::new(location, mid));
        line_x[i] = sample_bilinear(gray, px.x, px.y);

        let py = to_image.apply(Point2::new(mid, location));
        line_y[i] = sample_bilinear(gray, py.x, py.y);
    }

    scan_line_matches_pattern(&line_x, gray_threshold)
        && scan_line_matches_pattern(&line_y, gray_threshold)
}

/// Test a sampled scan line against the expected `X.XXX.X` sequence, where
/// `X` is below the threshold (dark) and `.` above it (light).
pub fn scan_line_matches_pattern(values: &[f32; SAMPLES], threshold: f32) -> bool {
    if values[0] > threshold || values[1] < threshold {
        return false;
    }
    if values[2] > threshold || values[3] > threshold || values[4] > threshold {
        return false;
    }
    if values[5] < threshold || values[6] > threshold {
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: f32 = 128.0;
    const DARK: f32 = 30.0;
    const LIGHT: f32 = 220.0;

    fn finder_line() -> [f32; SAMPLES] {
        [DARK, LIGHT, DARK, DARK, DARK, LIGHT, DARK]
    }

    #[test]
    fn accepts_finder_sequence() {
        assert!(scan_line_matches_pattern(&finder_line(), T));
    }

    #[test]
    fn rejects_any_flipped_sample() {
        for i in 0..SAMPLES {
            let mut line = finder_line();
            line[i] = if line[i] < T { LIGHT } else { DARK };
            assert!(
                !scan_line_matches_pattern(&line, T),
                "flipping sample {i} should reject"
            );
        }
    }

    #[test]
    fn rejects_inverted_pattern() {
        let inverted = finder_line().map(|v| 255.0 - v);
        assert!(!scan_line_matches_pattern(&inverted, T));
    }
}
