//! Faceted angular fragments.
use std::f32::consts::TAU;

use glam::Vec2;
use rand::RngCore;

use crate::sampling::{uniform, uniform_inclusive};
use crate::spots::outline::Outline;
use crate::spots::{elongate, normalized_radius_multipliers, Spot};

pub const MIN_POINTS: usize = 3;
pub const MAX_POINTS: usize = 8;
/// Irregularity amplification for angular spots.
pub const IRREGULARITY_GAIN: f32 = 1.5;
/// Maximum angular jitter per vertex, in radians.
pub const ANGLE_JITTER: f32 = 0.3;

/// Vertices of an angular fragment: amplified radius jitter plus per-vertex angle jitter.
pub fn fragment_points(spot: &Spot, rng: &mut dyn RngCore) -> Vec<Vec2> {
    let count = uniform_inclusive(rng, MIN_POINTS, MAX_POINTS);
    let multipliers =
        normalized_radius_multipliers(count, spot.irregularity * IRREGULARITY_GAIN, rng);
    let half = spot.size * 0.5;

    multipliers
        .iter()
        .enumerate()
        .map(|(i, m)| {
            let angle =
                i as f32 / count as f32 * TAU + uniform(rng, -ANGLE_JITTER, ANGLE_JITTER);
            spot.position + elongate(angle, spot.elongation, spot.elongation_angle) * (half * m)
        })
        .collect()
}

/// Closed straight-edged fragment.
pub fn angular_fragment(spot: &Spot, rng: &mut dyn RngCore) -> Outline {
    Outline::polygon(&fragment_points(spot, rng))
}
