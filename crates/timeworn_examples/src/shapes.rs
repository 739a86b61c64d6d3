use std::f32::consts::TAU;

use glam::Vec2;
use timeworn::prelude::{Anchor, Contour, PathShape};

/// Handle length factor for approximating a quarter circle with one cubic.
const KAPPA: f32 = 0.552_284_8;

/// Counter-clockwise circle made of four cubic segments.
pub fn circle_contour(center: Vec2, radius: f32) -> Contour {
    let k = radius * KAPPA;
    let anchors = [Vec2::X, Vec2::Y, Vec2::NEG_X, Vec2::NEG_Y]
        .into_iter()
        .map(|dir| {
            let point = center + dir * radius;
            let tangent = dir.perp() * k;
            Anchor::new(point - tangent, point, point + tangent)
        })
        .collect();
    Contour::new(anchors)
}

/// Disk with a concentric hole.
pub fn ring(center: Vec2, outer: f32, inner: f32) -> PathShape {
    PathShape::new(vec![
        circle_contour(center, outer),
        circle_contour(center, inner),
    ])
}

/// Smooth closed blob whose radius swells `lobes` times around the center.
pub fn lobed_blob(center: Vec2, radius: f32, lobes: usize, depth: f32) -> PathShape {
    let count = (lobes * 4).max(8);
    let points: Vec<Vec2> = (0..count)
        .map(|i| {
            let angle = i as f32 / count as f32 * TAU;
            let r = radius * (1.0 + depth * (angle * lobes as f32).sin());
            center + Vec2::from_angle(angle) * r
        })
        .collect();
    let anchors = (0..count)
        .map(|i| {
            let prev = points[(i + count - 1) % count];
            let next = points[(i + 1) % count];
            let handle = (next - prev) / 6.0;
            Anchor::new(points[i] - handle, points[i], points[i] + handle)
        })
        .collect();
    PathShape::from_contour(Contour::new(anchors))
}
