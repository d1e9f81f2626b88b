use serde::{Deserialize, Serialize};

/// Thresholds of the edge consistency cascade in `PatternGraph`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConnectParams {
    /// How far from the side midpoint the center-connecting line may cross,
    /// as a fraction of the side length. 0.35 admits crossings over the
    /// middle 70 % of the side.
    pub side_location_tolerance: f32,

    /// Maximum relative difference between the two intersected side lengths.
    pub max_side_error: f32,

    /// Maximum `smallest/largest` side ratio across the two nodes, taken the
    /// more extreme way for each ordering.
    pub max_size_ratio: f32,
}

impl Default for ConnectParams {
    fn default() -> Self {
        Self {
            side_location_tolerance: 0.35,
            max_side_error: 0.25,
            max_size_ratio: 1.3,
        }
    }
}

/// Parameters of the position pattern detector.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PositionPatternParams {
    /// Maximum QR code version the detector supports. Bounds the
    /// neighbor-search radius: higher versions put finder patterns further
    /// apart relative to their own size.
    pub max_version: u32,

    /// Fudge factor widening the neighbor-search radius beyond the nominal
    /// marker width.
    pub search_fudge: f32,

    /// Side length of the canonical sampling frame used by the appearance
    /// classifier.
    pub canonical_side: f32,

    pub connect: ConnectParams,
}

impl Default for PositionPatternParams {
    fn default() -> Self {
        Self {
            max_version: 40,
            search_fudge: 1.2,
            canonical_side: 70.0,
            connect: ConnectParams::default(),
        }
    }
}

/// Squared neighbor-search radius around a pattern's center.
///
/// A position pattern is 7 modules wide and a version `v` QR code
/// `17 + 4 v` modules; the search runs center-to-center, hence the `- 7`.
pub fn search_radius_sq(largest_side: f32, max_version: u32, fudge: f32) -> f32 {
    let max_marker_width = largest_side * (17.0 + 4.0 * max_version as f32 - 7.0) / 7.0;
    let radius = fudge * max_marker_width;
    radius * radius
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radius_grows_with_version() {
        let mut previous = 0.0;
        for version in 1..=40 {
            let r = search_radius_sq(70.0, version, 1.2);
            assert!(
                r > previous,
                "radius must strictly grow: v{version} gave {r} after {previous}"
            );
            previous = r;
        }
    }

    #[test]
    fn radius_scales_with_pattern_size() {
        assert!(search_radius_sq(140.0, 5, 1.2) > search_radius_sq(70.0, 5, 1.2));
    }

    #[test]
    fn params_round_trip_through_json() {
        let params = PositionPatternParams {
            max_version: 10,
            ..Default::default()
        };
        let json = serde_json::to_string(&params).expect("serialize");
        let back: PositionPatternParams = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.max_version, 10);
        assert_eq!(
            back.connect.side_location_tolerance,
            params.connect.side_location_tolerance
        );
    }
}
