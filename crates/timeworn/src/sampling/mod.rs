//! Spatial sampling inside a shape: coverage grid, attraction clusters and spot placement.
//!
//! This module also holds the small random helpers shared by the pipeline. All of them
//! draw from an injected [`RngCore`], so runs are reproducible for a seeded generator.
use rand::RngCore;

pub mod clusters;
pub mod grid;
pub mod placement;

pub use clusters::{Cluster, ClusterSet};
pub use grid::{CellCoverage, CoverageGrid};
pub use placement::{PlacementOutcome, PointSampler};

/// Generate a random float in the range [0, 1].
#[inline]
pub(crate) fn rand01(rng: &mut dyn RngCore) -> f32 {
    (rng.next_u32() as f32) / ((u32::MAX as f32) + 1.0)
}

/// Uniform float between `lo` and `hi`.
#[inline]
pub(crate) fn uniform(rng: &mut dyn RngCore, lo: f32, hi: f32) -> f32 {
    lo + rand01(rng) * (hi - lo)
}

/// Uniform integer in the inclusive range `lo..=hi`.
#[inline]
pub(crate) fn uniform_inclusive(rng: &mut dyn RngCore, lo: usize, hi: usize) -> usize {
    debug_assert!(lo <= hi);
    let span = (hi - lo) as u64 + 1;
    lo + ((rng.next_u32() as u64 * span) >> 32) as usize
}

/// Exponentially distributed value with rate `lambda` (mean `1 / lambda`).
#[inline]
pub(crate) fn exponential(rng: &mut dyn RngCore, lambda: f32) -> f32 {
    let u = (1.0 - rand01(rng)).clamp(f32::MIN_POSITIVE, 1.0);
    -u.ln() / lambda
}

/// Cumulative weight table for drawing indices proportionally to their weight.
///
/// Entries with zero, negative or non-finite weight can never be drawn.
#[derive(Clone, Debug, Default)]
pub(crate) struct WeightedTable {
    cumulative: Vec<f32>,
}

impl WeightedTable {
    pub(crate) fn new<I>(weights: I) -> Self
    where
        I: IntoIterator<Item = f32>,
    {
        let mut total = 0.0f32;
        let cumulative = weights
            .into_iter()
            .map(|w| {
                if w.is_finite() && w > 0.0 {
                    total += w;
                }
                total
            })
            .collect();
        Self { cumulative }
    }

    pub(crate) fn total(&self) -> f32 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.total() <= 0.0
    }

    /// Draw an index, or `None` when no entry has positive weight.
    pub(crate) fn pick(&self, rng: &mut dyn RngCore) -> Option<usize> {
        let total = self.total();
        if total <= 0.0 {
            return None;
        }
        let roll = rand01(rng) * total;
        let idx = self.cumulative.partition_point(|&c| c <= roll);
        // Rounding can push the roll onto the total; fall back to the last drawable entry.
        Some(idx.min(self.last_drawable()))
    }

    fn last_drawable(&self) -> usize {
        let total = self.total();
        self.cumulative
            .iter()
            .position(|&c| c >= total)
            .unwrap_or(0)
    }
}
