//! Fixed-resolution flattening of cubic Bézier segments.
use glam::Vec2;
use lyon_geom::{point, CubicBezierSegment};

/// Number of line segments each cubic is split into when building boundaries.
pub const DEFAULT_FLATTEN_SEGMENTS: usize = 8;

/// Sample the cubic at `t = k / segments` for `k = 0..=segments`.
///
/// The first and last points are exactly `p0` and `p3`. A coordinate shared by all
/// four control points is kept exact, so axis-aligned straight edges stay
/// axis-aligned. A `segments` of zero is treated as one.
pub fn flatten_cubic(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, segments: usize) -> Vec<Vec2> {
    let segments = segments.max(1);
    let curve = CubicBezierSegment {
        from: point(p0.x, p0.y),
        ctrl1: point(p1.x, p1.y),
        ctrl2: point(p2.x, p2.y),
        to: point(p3.x, p3.y),
    };
    let fixed_x = (p0.x == p1.x && p1.x == p2.x && p2.x == p3.x).then_some(p0.x);
    let fixed_y = (p0.y == p1.y && p1.y == p2.y && p2.y == p3.y).then_some(p0.y);

    let mut points = Vec::with_capacity(segments + 1);
    points.push(p0);
    for k in 1..segments {
        let sample = curve.sample(k as f32 / segments as f32);
        points.push(Vec2::new(
            fixed_x.unwrap_or(sample.x),
            fixed_y.unwrap_or(sample.y),
        ));
    }
    points.push(p3);
    points
}
