//! Spot synthesis: per-spot parameters and the organic/angular outline generators.
//!
//! Both generators place points around a circle whose radius is jittered by normalized
//! multipliers, then stretch the circle along an elongation axis.
use std::f32::consts::PI;

use glam::Vec2;
use rand::RngCore;

use crate::effect::config::{EffectConfig, ShapeMode};
use crate::sampling::{rand01, uniform};

pub mod angular;
pub mod organic;
pub mod outline;

pub use outline::Outline;

/// Lower bound for a single radius multiplier before normalization.
///
/// Angular spots amplify irregularity by 1.5, which could otherwise push a vertex
/// through the center and fold the outline over itself.
pub const MIN_RADIUS_MULTIPLIER: f32 = 0.05;

/// Geometry family of a spot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpotKind {
    Organic,
    Angular,
}

/// Parameters of one spot, consumed by the outline generators.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spot {
    pub position: Vec2,
    /// Diameter before elongation.
    pub size: f32,
    /// Radius jitter in [0, 1].
    pub irregularity: f32,
    /// Stretch factor along the elongation axis, at least 1.
    pub elongation: f32,
    /// Elongation axis angle in radians.
    pub elongation_angle: f32,
    pub kind: SpotKind,
}

impl Spot {
    /// Draw the per-spot parameters for a placed position.
    ///
    /// Size is uniform in the configured range; elongation is
    /// `base · (1 + U(−var, var))` floored at 1; the axis angle is
    /// `base + U(−var, var) · π`; `Mixed` flips a fair coin for the kind.
    pub fn sample(position: Vec2, config: &EffectConfig, rng: &mut dyn RngCore) -> Self {
        let size = uniform(rng, config.size_min, config.size_max);
        let ev = config.elongation_variation;
        let elongation = (config.elongation_base * (1.0 + uniform(rng, -ev, ev))).max(1.0);
        let av = config.angle_variation;
        let elongation_angle = config.elongation_angle_base + uniform(rng, -av, av) * PI;
        let kind = match config.shape_mode {
            ShapeMode::Organic => SpotKind::Organic,
            ShapeMode::Angular => SpotKind::Angular,
            ShapeMode::Mixed => {
                if rand01(rng) > 0.5 {
                    SpotKind::Organic
                } else {
                    SpotKind::Angular
                }
            }
        };

        Self {
            position,
            size,
            irregularity: config.irregularity,
            elongation,
            elongation_angle,
            kind,
        }
    }

    /// Synthesize the closed outline for this spot.
    pub fn outline(&self, rng: &mut dyn RngCore) -> Outline {
        match self.kind {
            SpotKind::Organic => organic::organic_blob(self, rng),
            SpotKind::Angular => angular::angular_fragment(self, rng),
        }
    }
}

/// Unit direction at `angle`, stretched by `elongation` along the axis at `axis_angle`.
///
/// Rotates into the axis frame, scales the in-frame x component, rotates back. A factor
/// of exactly 1 returns the plain direction.
#[inline]
pub fn elongate(angle: f32, elongation: f32, axis_angle: f32) -> Vec2 {
    if elongation == 1.0 {
        return Vec2::from_angle(angle);
    }
    let local = Vec2::from_angle(angle - axis_angle) * Vec2::new(elongation, 1.0);
    Vec2::from_angle(axis_angle).rotate(local)
}

/// Draw `count` multipliers `1 + U(−spread, spread)` and scale them to mean 1.
pub(crate) fn normalized_radius_multipliers(
    count: usize,
    spread: f32,
    rng: &mut dyn RngCore,
) -> Vec<f32> {
    let raw: Vec<f32> = (0..count)
        .map(|_| (1.0 + uniform(rng, -spread, spread)).max(MIN_RADIUS_MULTIPLIER))
        .collect();
    normalize_mean(raw)
}

fn normalize_mean(mut values: Vec<f32>) -> Vec<f32> {
    if values.is_empty() {
        return values;
    }
    let mean = values.iter().sum::<f32>() / values.len() as f32;
    if mean > 0.0 {
        values.iter_mut().for_each(|v| *v /= mean);
    }
    values
}
