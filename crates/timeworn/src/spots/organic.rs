//! Smooth organic blobs.
use std::f32::consts::TAU;

use glam::Vec2;
use rand::RngCore;

use crate::geometry::PathCommand;
use crate::sampling::uniform_inclusive;
use crate::spots::outline::Outline;
use crate::spots::{elongate, normalized_radius_multipliers, Spot};

pub const MIN_POINTS: usize = 6;
pub const MAX_POINTS: usize = 12;
/// Scale of the neighbor differences used as Bézier handles.
pub const SMOOTHING: f32 = 0.25;

/// Outline points of an organic blob: evenly spaced angles, jittered radii.
pub fn blob_points(spot: &Spot, rng: &mut dyn RngCore) -> Vec<Vec2> {
    let count = uniform_inclusive(rng, MIN_POINTS, MAX_POINTS);
    let multipliers = normalized_radius_multipliers(count, spot.irregularity, rng);
    let half = spot.size * 0.5;

    multipliers
        .iter()
        .enumerate()
        .map(|(i, m)| {
            let angle = i as f32 / count as f32 * TAU;
            spot.position + elongate(angle, spot.elongation, spot.elongation_angle) * (half * m)
        })
        .collect()
}

/// Closed blob made of one cubic per point pair.
///
/// The first handle leaves point `i` along `(next − prev) · 0.25`; the second sits a
/// quarter of the chord back from `next`.
pub fn organic_blob(spot: &Spot, rng: &mut dyn RngCore) -> Outline {
    smooth_closed_curve(&blob_points(spot, rng))
}

pub(crate) fn smooth_closed_curve(points: &[Vec2]) -> Outline {
    let n = points.len();
    if n == 0 {
        return Outline::default();
    }
    let mut commands = Vec::with_capacity(n + 2);
    commands.push(PathCommand::MoveTo(points[0]));
    for i in 0..n {
        let current = points[i];
        let next = points[(i + 1) % n];
        let prev = points[(i + n - 1) % n];
        let c1 = current + (next - prev) * SMOOTHING;
        let c2 = next - (next - current) * SMOOTHING;
        commands.push(PathCommand::CubicTo(c1, c2, next));
    }
    commands.push(PathCommand::Close);
    Outline::from_commands(commands)
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::spots::SpotKind;

    fn spot(irregularity: f32, elongation: f32, angle: f32) -> Spot {
        Spot {
            position: Vec2::new(10.0, -4.0),
            size: 6.0,
            irregularity,
            elongation,
            elongation_angle: angle,
            kind: SpotKind::Organic,
        }
    }

    #[test]
    fn outline_is_closed_and_curved() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let o = organic_blob(&spot(0.6, 1.4, 0.3), &mut rng);
            let cmds = o.commands();
            assert!(o.is_closed());
            let middle = &cmds[1..cmds.len() - 1];
            assert!((MIN_POINTS..=MAX_POINTS).contains(&middle.len()));
            assert!(middle
                .iter()
                .all(|c| matches!(c, PathCommand::CubicTo(..))));
        }
    }

    #[test]
    fn regular_blob_is_a_circle() {
        let mut rng = StdRng::seed_from_u64(10);
        let s = spot(0.0, 1.0, 1.1);
        let pts = blob_points(&s, &mut rng);
        let n = pts.len();
        for (i, p) in pts.iter().enumerate() {
            let expected = s.position + Vec2::from_angle(i as f32 / n as f32 * TAU) * 3.0;
            assert!(p.distance(expected) < 1e-5, "{p} vs {expected}");
        }
    }

    #[test]
    fn mean_radius_matches_half_size() {
        let mut rng = StdRng::seed_from_u64(19);
        let s = spot(1.0, 1.0, 0.0);
        for _ in 0..20 {
            let pts = blob_points(&s, &mut rng);
            let mean = pts.iter().map(|p| p.distance(s.position)).sum::<f32>() / pts.len() as f32;
            assert!((mean - 3.0).abs() < 1e-4, "{mean}");
        }
    }

    #[test]
    fn first_point_lies_on_elongation_axis_at_zero_angle() {
        let mut rng = StdRng::seed_from_u64(2);
        let s = spot(0.0, 2.0, 0.0);
        let pts = blob_points(&s, &mut rng);
        assert!((pts[0] - (s.position + Vec2::new(6.0, 0.0))).length() < 1e-5);
    }

    #[test]
    fn smoothing_handles_follow_neighbors() {
        let pts = [
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(-1.0, 0.0),
            Vec2::new(0.0, -1.0),
        ];
        let o = smooth_closed_curve(&pts);
        match o.commands()[1] {
            PathCommand::CubicTo(c1, c2, end) => {
                assert_eq!(c1, Vec2::new(1.0, 0.5));
                assert_eq!(c2, Vec2::new(0.25, 0.75));
                assert_eq!(end, pts[1]);
            }
            other => panic!("expected cubic, got {other:?}"),
        }
    }
}
