use nalgebra::{Point2, Vector2};

use crate::geom::{acute_angle, segment_intersection};
use crate::node::{PatternEdge, PositionPattern};
use crate::params::ConnectParams;

/// Edge operations over the position pattern arena.
///
/// Nodes are addressed by index into the detector's arena; edges are written
/// symmetrically onto both endpoints. The at-most-one-edge-per-side invariant
/// is enforced here, in the commit step, and nowhere else.
#[derive(Clone, Debug)]
pub struct PatternGraph {
    params: ConnectParams,
}

fn side_direction(node: &PositionPattern, side: usize) -> Vector2<f32> {
    node.square[(side + 1) % 4] - node.square[side]
}

impl PatternGraph {
    pub fn new(params: ConnectParams) -> Self {
        Self { params }
    }

    /// Which side of `node` does the segment `a..b` cross, and where?
    ///
    /// For a convex quadrilateral and a segment from the node's center to a
    /// point outside, exactly one side qualifies. A segment passing exactly
    /// through a corner touches two sides; the lower-indexed one wins.
    pub fn find_side_intersect(
        node: &PositionPattern,
        a: Point2<f32>,
        b: Point2<f32>,
    ) -> Option<(usize, Point2<f32>)> {
        for side in 0..4 {
            let c0 = node.square[side];
            let c1 = node.square[(side + 1) % 4];
            if let Some(hit) = segment_intersection(a, b, c0, c1) {
                return Some((side, hit));
            }
        }
        None
    }

    /// Are the two chosen sides the most-nearly-parallel pair between the two
    /// squares?
    ///
    /// Perspective distortion keeps facing sides from being exactly parallel,
    /// but their acute angle still beats every pair formed with an adjacent
    /// side.
    pub fn almost_parallel(
        a: &PositionPattern,
        side_a: usize,
        b: &PositionPattern,
        side_b: usize,
    ) -> bool {
        let selected = acute_angle(side_direction(a, side_a), side_direction(b, side_b));

        for step in [1usize, 3] {
            let adj_a = acute_angle(
                side_direction(a, (side_a + step) % 4),
                side_direction(b, side_b),
            );
            let adj_b = acute_angle(
                side_direction(a, side_a),
                side_direction(b, (side_b + step) % 4),
            );
            if adj_a < selected || adj_b < selected {
                return false;
            }
        }
        true
    }

    /// Geometric consistency cascade deciding whether nodes `i` and `j` sit
    /// on the same seam. Every failed check silently aborts the attempt;
    /// rejection is the expected common case, not an error.
    pub fn consider_connect(&self, nodes: &mut [PositionPattern], i: usize, j: usize) {
        let center_i = nodes[i].center;
        let center_j = nodes[j].center;

        // The line between the centers must cross one side of each square.
        let Some((side_i, hit_i)) = Self::find_side_intersect(&nodes[i], center_i, center_j)
        else {
            return;
        };
        let Some((side_j, hit_j)) = Self::find_side_intersect(&nodes[j], center_i, center_j)
        else {
            return;
        };

        let len_i = nodes[i].side_lengths[side_i];
        let len_j = nodes[j].side_lengths[side_j];

        // It should cross near the middle of each side, not near a corner.
        let loc_i = (hit_i - nodes[i].square[side_i]).norm() / len_i;
        let loc_j = (hit_j - nodes[j].square[side_j]).norm() / len_j;
        let tol = self.params.side_location_tolerance;
        if (loc_i - 0.5).abs() > tol || (loc_j - 0.5).abs() > tol {
            return;
        }

        // Connecting sides must be of similar length.
        if (len_i - len_j).abs() / len_i.max(len_j) > self.params.max_side_error {
            return;
        }

        if !Self::almost_parallel(&nodes[i], side_i, &nodes[j], side_j) {
            return;
        }

        let ratio = (nodes[i].smallest_side / nodes[j].largest_side)
            .max(nodes[j].smallest_side / nodes[i].largest_side);
        if ratio > self.params.max_size_ratio {
            return;
        }

        let length_sq = (center_j - center_i).norm_squared();
        Self::check_connect(nodes, i, side_i, j, side_j, length_sq);
    }

    /// Commit step. A side slot holding a farther edge is freed for the new
    /// candidate; the edge is written only when both slots are free, which
    /// keeps the closest passing candidate per side.
    pub fn check_connect(
        nodes: &mut [PositionPattern],
        i: usize,
        side_i: usize,
        j: usize,
        side_j: usize,
        length_sq: f32,
    ) {
        if let Some(existing) = nodes[i].edges[side_i] {
            if existing.length_sq > length_sq {
                Self::detach_edge(nodes, i, side_i);
            }
        }
        if let Some(existing) = nodes[j].edges[side_j] {
            if existing.length_sq > length_sq {
                Self::detach_edge(nodes, j, side_j);
            }
        }

        if nodes[i].edges[side_i].is_none() && nodes[j].edges[side_j].is_none() {
            nodes[i].edges[side_i] = Some(PatternEdge {
                neighbor: j,
                neighbor_side: side_j,
                length_sq,
            });
            nodes[j].edges[side_j] = Some(PatternEdge {
                neighbor: i,
                neighbor_side: side_i,
                length_sq,
            });
        }
    }

    /// Remove the edge on `(node, side)` from both of its endpoints.
    pub fn detach_edge(nodes: &mut [PositionPattern], node: usize, side: usize) {
        if let Some(edge) = nodes[node].edges[side].take() {
            nodes[edge.neighbor].edges[edge.neighbor_side] = None;
        }
    }

    /// Total number of committed edges (each counted once).
    pub fn edge_count(nodes: &[PositionPattern]) -> usize {
        nodes.iter().map(PositionPattern::edge_count).sum::<usize>() / 2
    }
}
