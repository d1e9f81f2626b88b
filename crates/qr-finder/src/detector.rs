use kiddo::{KdTree, SquaredEuclidean};
use log::debug;
use qr_finder_core::GrayImageView;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::appearance::check_appearance;
use crate::error::ConfigError;
use crate::frame::CanonicalFrame;
use crate::graph::PatternGraph;
use crate::node::PositionPattern;
use crate::params::{search_radius_sq, PositionPatternParams};
use crate::source::{SquareSource, Winding};

/// Detects QR position patterns and assembles them into a graph of
/// potentially connected markers.
///
/// One `process` call handles one frame. Node storage and the search-point
/// scratch buffer are reused across frames; both are fully reset at the start
/// of each cycle, which wholesale-invalidates every edge of the previous
/// graph before new candidates are considered.
pub struct PositionPatternDetector<S> {
    source: S,
    params: PositionPatternParams,
    frame: CanonicalFrame,
    graph: PatternGraph,
    patterns: Vec<PositionPattern>,
    search_points: Vec<[f32; 2]>,
}

impl<S: SquareSource> PositionPatternDetector<S> {
    /// Validates the square source contract. A source emitting anything but
    /// counter-clockwise quadrilaterals cannot feed this pipeline; that is a
    /// configuration error, not a per-frame condition.
    pub fn new(source: S, params: PositionPatternParams) -> Result<Self, ConfigError> {
        let (min, max) = source.side_range();
        if min != 4 || max != 4 {
            return Err(ConfigError::WrongSideCount { min, max });
        }
        if source.winding() != Winding::CounterClockwise {
            return Err(ConfigError::WrongWinding);
        }

        let frame = CanonicalFrame::new(params.canonical_side);
        let graph = PatternGraph::new(params.connect.clone());

        Ok(Self {
            source,
            params,
            frame,
            graph,
            patterns: Vec::new(),
            search_points: Vec::new(),
        })
    }

    /// Run one full detection cycle on a gray image and its thresholded
    /// binary mask. Results are retrieved through `patterns`.
    #[cfg_attr(
        feature = "tracing",
        instrument(
            level = "info",
            skip(self, gray, binary),
            fields(width = gray.width, height = gray.height)
        )
    )]
    pub fn process(&mut self, gray: &GrayImageView<'_>, binary: &GrayImageView<'_>) {
        self.patterns.clear();

        self.source.process(gray, binary);
        self.collect_patterns(gray);
        self.build_graph();
    }

    /// Classify source candidates and register the accepted ones.
    fn collect_patterns(&mut self, gray: &GrayImageView<'_>) {
        let candidates = self.source.candidates();

        for info in candidates {
            // A finder pattern always has a nested contour.
            if !info.has_internal {
                continue;
            }

            let gray_threshold = (info.edge_inside + info.edge_outside) / 2.0;
            if !check_appearance(gray, &self.frame, &info.square, gray_threshold) {
                continue;
            }

            self.patterns
                .push(PositionPattern::from_square(info.square, gray_threshold));
        }

        debug!(
            "accepted {} position patterns from {} candidates",
            self.patterns.len(),
            candidates.len()
        );
    }

    /// Rebuild the center index and consider every distance-bounded pair for
    /// a connection.
    fn build_graph(&mut self) {
        self.search_points.clear();
        self.search_points
            .extend(self.patterns.iter().map(|p| [p.center.x, p.center.y]));

        if self.patterns.len() < 2 {
            return;
        }

        let tree: KdTree<f32, 2> = (&self.search_points).into();

        for i in 0..self.patterns.len() {
            // The radius covers the largest marker this pattern could belong
            // to at the configured maximum version.
            let radius_sq = search_radius_sq(
                self.patterns[i].largest_side,
                self.params.max_version,
                self.params.search_fudge,
            );

            let hits = tree.within_unsorted::<SquaredEuclidean>(&self.search_points[i], radius_sq);
            if hits.len() <= 1 {
                continue;
            }

            for hit in hits {
                let j = hit.item as usize;
                if j == i {
                    continue;
                }
                self.graph.consider_connect(&mut self.patterns, i, j);
            }
        }

        debug!(
            "committed {} edges between {} patterns",
            PatternGraph::edge_count(&self.patterns),
            self.patterns.len()
        );
    }

    /// Accepted position patterns of the last cycle, edges populated.
    pub fn patterns(&self) -> &[PositionPattern] {
        &self.patterns
    }

    /// Number of committed edges in the last cycle's graph.
    pub fn edge_count(&self) -> usize {
        PatternGraph::edge_count(&self.patterns)
    }

    pub fn params(&self) -> &PositionPatternParams {
        &self.params
    }

    pub fn graph(&self) -> &PatternGraph {
        &self.graph
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{PolygonCandidate, StaticSquareSource};

    struct MisconfiguredSource {
        sides: (u32, u32),
        winding: Winding,
    }

    impl SquareSource for MisconfiguredSource {
        fn side_range(&self) -> (u32, u32) {
            self.sides
        }

        fn winding(&self) -> Winding {
            self.winding
        }

        fn process(&mut self, _gray: &GrayImageView<'_>, _binary: &GrayImageView<'_>) {}

        fn candidates(&self) -> &[PolygonCandidate] {
            &[]
        }
    }

    #[test]
    fn rejects_non_quadrilateral_source() {
        let source = MisconfiguredSource {
            sides: (3, 6),
            winding: Winding::CounterClockwise,
        };
        let err = PositionPatternDetector::new(source, PositionPatternParams::default())
            .err()
            .expect("must fail");
        assert!(matches!(err, ConfigError::WrongSideCount { min: 3, max: 6 }));
    }

    #[test]
    fn rejects_clockwise_source() {
        let source = MisconfiguredSource {
            sides: (4, 4),
            winding: Winding::Clockwise,
        };
        let err = PositionPatternDetector::new(source, PositionPatternParams::default())
            .err()
            .expect("must fail");
        assert!(matches!(err, ConfigError::WrongWinding));
    }

    #[test]
    fn accepts_static_source() {
        let detector = PositionPatternDetector::new(
            StaticSquareSource::default(),
            PositionPatternParams::default(),
        );
        assert!(detector.is_ok());
    }
}
