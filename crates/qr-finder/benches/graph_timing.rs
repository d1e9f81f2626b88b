use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nalgebra::Point2;
use qr_finder::{
    PolygonCandidate, PositionPatternDetector, PositionPatternParams, StaticSquareSource,
};
use qr_finder_core::GrayImage;

const DARK: u8 = 20;
const LIGHT: u8 = 235;
const MODULE: usize = 10;
const SIDE: usize = 7 * MODULE;

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

/// A grid of finder patterns: every horizontally or vertically adjacent pair
/// is a connection candidate, which keeps the graph stage busy.
fn pattern_grid(cols: usize, rows: usize) -> (GrayImage, Vec<PolygonCandidate>) {
    let spacing = 2 * SIDE;
    let margin = 30;
    let width = margin * 2 + (cols - 1) * spacing + SIDE;
    let height = margin * 2 + (rows - 1) * spacing + SIDE;

    let mut img = GrayImage::new(width, height, LIGHT);
    let mut candidates = Vec::new();
    for r in 0..rows {
        for c in 0..cols {
            let x0 = margin + c * spacing;
            let y0 = margin + r * spacing;
            render_finder_pattern(&mut img, x0, y0);
            candidates.push(candidate_at(x0 as f32, y0 as f32));
        }
    }
    (img, candidates)
}

fn bench_process(c: &mut Criterion) {
    let (img, candidates) = pattern_grid(4, 4);
    let mask = GrayImage::new(img.width, img.height, 0);
    let params = PositionPatternParams {
        max_version: 2,
        ..Default::default()
    };
    let mut detector = PositionPatternDetector::new(StaticSquareSource::new(candidates), params)
        .expect("valid source");

    c.bench_function("process_4x4_pattern_grid", |b| {
        b.iter(|| {
            detector.process(&img.view(), &mask.view());
            black_box(detector.edge_count())
        })
    });
}

criterion_group!(benches, bench_process);
criterion_main!(benches);
