use nalgebra::Point2;
use qr_finder_core::GrayImageView;

/// Winding order of the corner sequence a square source emits, in image
/// coordinates (y grows downward).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Winding {
    Clockwise,
    CounterClockwise,
}

/// One 4-sided polygon candidate produced by a square source.
#[derive(Clone, Copy, Debug)]
pub struct PolygonCandidate {
    /// Ordered corners; winding must match `SquareSource::winding` for every
    /// candidate.
    pub square: [Point2<f32>; 4],
    /// Whether the contour had a nested internal contour. A finder pattern
    /// always does, so candidates without one are skipped before
    /// classification.
    pub has_internal: bool,
    /// Mean intensity just inside the polygon edge.
    pub edge_inside: f32,
    /// Mean intensity just outside the polygon edge.
    pub edge_outside: f32,
}

/// External polygon detector feeding the position pattern pipeline.
///
/// The detector validates `side_range` and `winding` once at construction;
/// they describe the source's fixed configuration, not per-frame state.
pub trait SquareSource {
    /// Minimum and maximum number of sides of emitted polygons.
    fn side_range(&self) -> (u32, u32);

    /// Corner ordering of emitted polygons.
    fn winding(&self) -> Winding;

    /// Run detection on one frame.
    fn process(&mut self, gray: &GrayImageView<'_>, binary: &GrayImageView<'_>);

    /// Candidates found by the last `process` call.
    fn candidates(&self) -> &[PolygonCandidate];
}

/// Replays a fixed candidate list, for feeding polygons detected elsewhere
/// into the pipeline.
#[derive(Clone, Debug, Default)]
pub struct StaticSquareSource {
    candidates: Vec<PolygonCandidate>,
}

impl StaticSquareSource {
    pub fn new(candidates: Vec<PolygonCandidate>) -> Self {
        Self { candidates }
    }

    /// Replace the candidate list replayed by the next `process` call.
    pub fn set_candidates(&mut self, candidates: Vec<PolygonCandidate>) {
        self.candidates = candidates;
    }
}

impl SquareSource for StaticSquareSource {
    fn side_range(&self) -> (u32, u32) {
        (4, 4)
    }

    fn winding(&self) -> Winding {
        Winding::CounterClockwise
    }

    fn process(&mut self, _gray: &GrayImageView<'_>, _binary: &GrayImageView<'_>) {}

    fn candidates(&self) -> &[PolygonCandidate] {
        &self.candidates
    }
}
