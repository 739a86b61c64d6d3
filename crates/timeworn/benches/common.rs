use std::time::Duration;

use criterion::{Criterion, Throughput};
use glam::Vec2;
use timeworn::prelude::{Anchor, Contour, PathShape};

pub const SAMPLE_SIZE: usize = 20;
pub const WARM_UP: Duration = Duration::from_secs(1);
pub const MEASUREMENT_TIME: Duration = Duration::from_secs(2);

pub fn default_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(SAMPLE_SIZE)
        .warm_up_time(WARM_UP)
        .measurement_time(MEASUREMENT_TIME)
}

pub fn elements_throughput(elements: usize) -> Throughput {
    Throughput::Elements(elements.max(1) as u64)
}

/// Star-shaped blob with `points` smooth anchors, radius alternating around `radius`.
#[allow(dead_code)]
pub fn wobbly_shape(center: Vec2, radius: f32, points: usize) -> PathShape {
    let anchors = (0..points)
        .map(|i| {
            let dir = Vec2::from_angle(i as f32 / points as f32 * std::f32::consts::TAU);
            let r = if i % 2 == 0 { radius } else { radius * 0.7 };
            let p = center + dir * r;
            let handle = dir.perp() * r * 0.2;
            Anchor::new(p - handle, p, p + handle)
        })
        .collect();
    PathShape::from_contour(Contour::new(anchors))
}

/// Square with a square hole.
#[allow(dead_code)]
pub fn frame_shape(size: f32) -> PathShape {
    let inset = size * 0.3;
    PathShape::new(vec![
        Contour::polygon([
            Vec2::ZERO,
            Vec2::new(size, 0.0),
            Vec2::splat(size),
            Vec2::new(0.0, size),
        ]),
        Contour::polygon([
            Vec2::splat(inset),
            Vec2::new(size - inset, inset),
            Vec2::splat(size - inset),
            Vec2::new(inset, size - inset),
        ]),
    ])
}
