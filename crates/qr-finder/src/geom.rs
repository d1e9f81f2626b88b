use nalgebra::{Point2, Vector2};

/// Intersection of segments `a0..a1` and `b0..b1`, or `None` when they are
/// parallel or meet outside either segment. Endpoint contact counts as an
/// intersection.
pub fn segment_intersection(
    a0: Point2<f32>,
    a1: Point2<f32>,
    b0: Point2<f32>,
    b1: Point2<f32>,
) -> Option<Point2<f32>> {
    let da = a1 - a0;
    let db = b1 - b0;
    let denom = da.x * db.y - da.y * db.x;
    if denom.abs() < 1e-12 {
        return None;
    }

    let w = b0 - a0;
    let t = (w.x * db.y - w.y * db.x) / denom;
    let u = (w.x * da.y - w.y * da.x) / denom;
    if !(0.0..=1.0).contains(&t) || !(0.0..=1.0).contains(&u) {
        return None;
    }

    Some(a0 + da * t)
}

/// Acute angle between two undirected directions, in `[0, π/2]`.
pub fn acute_angle(a: Vector2<f32>, b: Vector2<f32>) -> f32 {
    let na = a.norm();
    let nb = b.norm();
    if na < 1e-12 || nb < 1e-12 {
        return 0.0;
    }
    let c = (a.dot(&b) / (na * nb)).abs().min(1.0);
    c.acos()
}
