use nalgebra::Point2;

/// Committed connection between two position patterns.
///
/// Recorded symmetrically: if side `s` of node `a` holds
/// `PatternEdge { neighbor: b, neighbor_side: t, .. }`, then side `t` of
/// node `b` holds the mirrored record. `length_sq` is the squared
/// center-to-center distance, kept as a relation weight for downstream
/// disambiguation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PatternEdge {
    pub neighbor: usize,
    pub neighbor_side: usize,
    pub length_sq: f32,
}

/// One accepted position pattern candidate, stored in the detector's arena
/// and addressed by index.
#[derive(Clone, Debug)]
pub struct PositionPattern {
    /// Ordered corners, winding as emitted by the square source.
    pub square: [Point2<f32>; 4],
    /// Corner centroid.
    pub center: Point2<f32>,
    /// Midpoint of the inside/outside edge intensities; the binary decision
    /// boundary used when classifying sampled pixels.
    pub gray_threshold: f32,
    /// Length of side `i`, from corner `i` to corner `(i + 1) % 4`.
    pub side_lengths: [f32; 4],
    pub largest_side: f32,
    pub smallest_side: f32,
    /// At most one committed connection per side.
    pub edges: [Option<PatternEdge>; 4],
}

impl PositionPattern {
    /// Build a node from an accepted square, deriving the geometric fields
    /// once at registration.
    pub fn from_square(square: [Point2<f32>; 4], gray_threshold: f32) -> Self {
        let mut cx = 0.0_f32;
        let mut cy = 0.0_f32;
        for p in &square {
            cx += p.x;
            cy += p.y;
        }
        let center = Point2::new(cx / 4.0, cy / 4.0);

        let mut side_lengths = [0.0_f32; 4];
        let mut largest_side = 0.0_f32;
        let mut smallest_side = f32::MAX;
        for i in 0..4 {
            let len = (square[(i + 1) % 4] - square[i]).norm();
            side_lengths[i] = len;
            largest_side = largest_side.max(len);
            smallest_side = smallest_side.min(len);
        }

        Self {
            square,
            center,
            gray_threshold,
            side_lengths,
            largest_side,
            smallest_side,
            edges: [None; 4],
        }
    }

    /// Number of committed edges on this node.
    pub fn edge_count(&self) -> usize {
        self.edges.iter().flatten().count()
    }
}
