//! Renders three finder patterns in an L arrangement, feeds their polygons
//! through a static square source, and logs the assembled graph.

use std::str::FromStr;

use log::{info, LevelFilter};
use nalgebra::Point2;
use qr_finder::detect::{binarize, mean_intensity};
use qr_finder::{
    PolygonCandidate, PositionPatternDetector, PositionPatternParams, StaticSquareSource,
};
use qr_finder_core::{init_with_level, GrayImage};

const DARK: u8 = 20;
const LIGHT: u8 = 235;
const MODULE: usize = 12;
const SIDE: usize = 7 * MODULE;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|v| LevelFilter::from_str(&v).ok())
        .unwrap_or(LevelFilter::Info);
    init_with_level(level)?;

    run()
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (img, candidates) = synthetic_scene();
    info!(
        "synthetic scene: {}x{} px, {} candidate squares",
        img.width,
        img.height,
        candidates.len()
    );

    let params = PositionPatternParams {
        max_version: 4,
        ..Default::default()
    };
    let mut detector = PositionPatternDetector::new(StaticSquareSource::new(candidates), params)?;

    let gray = img.view();
    let mask = binarize(&gray, mean_intensity(&gray) as u8);
    detector.process(&gray, &mask.view());

    info!(
        "detected {} position patterns, {} edges",
        detector.patterns().len(),
        detector.edge_count()
    );

    for (i, pattern) in detector.patterns().iter().enumerate() {
        info!(
            "pattern {i}: center ({:.1}, {:.1}), threshold {:.1}",
            pattern.center.x, pattern.center.y, pattern.gray_threshold
        );
        for (side, edge) in pattern.edges.iter().enumerate() {
            if let Some(edge) = edge {
                info!(
                    "  side {side} -> pattern {} (side {}), seam length {:.1} px",
                    edge.neighbor,
                    edge.neighbor_side,
                    edge.length_sq.sqrt()
                );
            }
        }
    }

    Ok(())
}

/// Three finder patterns placed like the corners of a QR code.
fn synthetic_scene() -> (GrayImage, Vec<PolygonCandidate>) {
    let spacing = 3 * SIDE;
    let margin = 40;
    let extent = margin * 2 + spacing + SIDE;

    let mut img = GrayImage::new(extent, extent, LIGHT);
    let corners = [
        (margin, margin),
        (margin + spacing, margin),
        (margin, margin + spacing),
    ];

    let mut candidates = Vec::new();
    for &(x0, y0) in &corners {
        render_finder_pattern(&mut img, x0, y0);
        candidates.push(candidate_at(x0 as f32, y0 as f32));
    }
    (img, candidates)
}

/// Draw a 7x7-module finder pattern: dark ring, light ring, dark 3x3 center.
fn render_finder_pattern(img: &mut GrayImage, x0: usize, y0: usize) {
    for row in 0..7 {
        for col in 0..7 {
            let center = (2..=4).contains(&row) && (2..=4).contains(&col);
            let border = row == 0 || row == 6 || col == 0 || col == 6;
            if !(center || border) {
                continue;
            }
            for dy in 0..MODULE {
                for dx in 0..MODULE {
                    let px = x0 + col * MODULE + dx;
                    let py = y0 + row * MODULE + dy;
                    img.data[py * img.width + px] = DARK;
                }
            }
        }
    }
}

fn candidate_at(x0: f32, y0: f32) -> PolygonCandidate {
    let s = SIDE as f32;
    PolygonCandidate {
        square: [
            Point2::new(x0, y0),
            Point2::new(x0, y0 + s),
            Point2::new(x0 + s, y0 + s),
            Point2::new(x0 + s, y0),
        ],
        has_internal: true,
        edge_inside: DARK as f32,
        edge_outside: LIGHT as f32,
    }
}
