use nalgebra::Point2;
use qr_finder_core::{homography_from_4pt, Homography};

/// Perspective normalizer: maps a canonical axis-aligned square frame onto an
/// image quadrilateral.
///
/// The classifier samples scan lines in canonical coordinates and reads
/// pixels at the mapped image positions, which removes the perspective
/// distortion of the candidate square.
#[derive(Clone, Copy, Debug)]
pub struct CanonicalFrame {
    side: f32,
}

impl CanonicalFrame {
    pub fn new(side: f32) -> Self {
        Self { side }
    }

    pub fn side(&self) -> f32 {
        self.side
    }

    /// Homography taking canonical coordinates `[0, side]²` to image
    /// coordinates, given the 4 corners of the observed quadrilateral.
    ///
    /// Corner order fixes which image corner the canonical origin lands on;
    /// any consistent winding works for the symmetric sampling the classifier
    /// does. Returns `None` for degenerate (collinear or collapsed) corners,
    /// which can never belong to a position pattern.
    pub fn map_to_image(&self, corners: &[Point2<f32>; 4]) -> Option<Homography> {
        let s = self.side;
        let canonical = [
            Point2::new(0.0, 0.0),
            Point2::new(s, 0.0),
            Point2::new(s, s),
            Point2::new(0.0, s),
        ];
        homography_from_4pt(&canonical, corners)
    }
}
