//! QR position pattern detector.
//!
//! Squares found by an external polygon detector are classified by their
//! appearance (the dark/light/dark finder pattern rings, sampled through a
//! perspective-removing homography) and the accepted ones are assembled into
//! a graph: an edge means two patterns were judged to sit on the same seam of
//! one QR code. Downstream decoders walk that graph to group the three finder
//! patterns of each marker.
//!
//! ## Quickstart
//!
//! ```no_run
//! use nalgebra::Point2;
//! use qr_finder::{
//!     PolygonCandidate, PositionPatternDetector, PositionPatternParams, StaticSquareSource,
//! };
//! use qr_finder_core::GrayImageView;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! # let (gray_buf, mask_buf) = (vec![0u8; 640 * 480], vec![0u8; 640 * 480]);
//! let gray = GrayImageView::new(640, 480, &gray_buf).unwrap();
//! let binary = GrayImageView::new(640, 480, &mask_buf).unwrap();
//!
//! // Polygons come from an external square detector.
//! let source = StaticSquareSource::new(vec![PolygonCandidate {
//!     square: [
//!         Point2::new(100.0, 100.0),
//!         Point2::new(100.0, 170.0),
//!         Point2::new(170.0, 170.0),
//!         Point2::new(170.0, 100.0),
//!     ],
//!     has_internal: true,
//!     edge_inside: 30.0,
//!     edge_outside: 220.0,
//! }]);
//!
//! let mut detector = PositionPatternDetector::new(source, PositionPatternParams::default())?;
//! detector.process(&gray, &binary);
//! for (i, pattern) in detector.patterns().iter().enumerate() {
//!     println!("pattern {i} at {:?}, {} edges", pattern.center, pattern.edge_count());
//! }
//! # Ok(())
//! # }
//! ```

mod appearance;
mod detector;
mod error;
mod frame;
mod geom;
mod graph;
mod node;
mod params;
mod source;

pub use appearance::{check_appearance, scan_line_matches_pattern};
pub use detector::PositionPatternDetector;
pub use error::ConfigError;
pub use frame::CanonicalFrame;
pub use graph::PatternGraph;
pub use node::{PatternEdge, PositionPattern};
pub use params::{ConnectParams, PositionPatternParams};
pub use source::{PolygonCandidate, SquareSource, StaticSquareSource, Winding};

#[cfg(feature = "image")]
pub mod detect;
