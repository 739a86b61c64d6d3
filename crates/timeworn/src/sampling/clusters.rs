//! Weighted circular attraction zones seeded inside the shape.
use glam::Vec2;
use rand::RngCore;
use tracing::debug;

use crate::geometry::BoundingBox;
use crate::sampling::grid::CoverageGrid;
use crate::sampling::{uniform, uniform_inclusive};

/// A soft attraction zone. `weight` drives selection probability, `radius` spatial spread.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cluster {
    pub center: Vec2,
    pub radius: f32,
    pub weight: f32,
}

/// Clusters seeded once per run. Overlap between clusters is allowed.
#[derive(Clone, Debug, Default)]
pub struct ClusterSet {
    clusters: Vec<Cluster>,
}

impl ClusterSet {
    pub fn new(clusters: Vec<Cluster>) -> Self {
        Self { clusters }
    }

    /// Seed `count` clusters in random non-empty cells of `grid`.
    ///
    /// Radius is `min(width, height) · U(0.05, 0.15) · (1.5 − strength)`, so stronger
    /// clustering gives tighter zones; weight is `U(0.5, 2.0)`. Returns an empty set when
    /// the grid has no non-empty cell.
    pub fn build(
        grid: &CoverageGrid,
        bounds: &BoundingBox,
        count: usize,
        clustering_strength: f32,
        rng: &mut dyn RngCore,
    ) -> Self {
        let candidates = grid.non_empty_cells();
        if candidates.is_empty() || count == 0 {
            return Self::default();
        }

        let extent = bounds.width().min(bounds.height());
        let tightness = 1.5 - clustering_strength;
        let clusters = (0..count)
            .map(|_| {
                let (col, row) = candidates[uniform_inclusive(rng, 0, candidates.len() - 1)];
                let center = grid.sample_in_cell(col, row, rng);
                let radius = extent * uniform(rng, 0.05, 0.15) * tightness;
                let weight = uniform(rng, 0.5, 2.0);
                Cluster {
                    center,
                    radius,
                    weight,
                }
            })
            .collect::<Vec<_>>();

        debug!(
            "Seeded {} clusters across {} candidate cells.",
            clusters.len(),
            candidates.len()
        );
        Self { clusters }
    }

    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::effect::config::GridConfig;
    use crate::sampling::grid::CellCoverage;

    fn half_plane_grid(rng: &mut StdRng) -> (CoverageGrid, BoundingBox) {
        let bb = BoundingBox::from_min_size(Vec2::ZERO, Vec2::new(100.0, 50.0));
        let left_half = |p: Vec2| p.x < 50.0;
        let config = GridConfig {
            cell_size: 10.0,
            samples_per_cell: 12,
            full_threshold: 0.9,
        };
        (CoverageGrid::build(&bb, &left_half, &config, rng), bb)
    }

    #[test]
    fn clusters_are_seeded_in_non_empty_cells() {
        let mut rng = StdRng::seed_from_u64(17);
        let (grid, bb) = half_plane_grid(&mut rng);
        let set = ClusterSet::build(&grid, &bb, 40, 0.5, &mut rng);
        assert_eq!(set.len(), 40);
        for c in set.clusters() {
            let col = ((c.center.x - bb.min.x) / grid.cell_size().x).floor() as usize;
            let row = ((c.center.y - bb.min.y) / grid.cell_size().y).floor() as usize;
            assert_ne!(
                grid.coverage(col.min(grid.cols() - 1), row.min(grid.rows() - 1)),
                CellCoverage::Empty
            );
        }
    }

    #[test]
    fn radius_and_weight_ranges() {
        let mut rng = StdRng::seed_from_u64(3);
        let (grid, bb) = half_plane_grid(&mut rng);
        for strength in [0.0, 0.5, 1.0] {
            let set = ClusterSet::build(&grid, &bb, 50, strength, &mut rng);
            let lo = 50.0 * 0.05 * (1.5 - strength);
            let hi = 50.0 * 0.15 * (1.5 - strength);
            for c in set.clusters() {
                assert!(c.radius >= lo - 1e-4 && c.radius <= hi + 1e-4, "{}", c.radius);
                assert!((0.5..=2.0).contains(&c.weight));
            }
        }
    }

    #[test]
    fn empty_grid_yields_no_clusters() {
        let bb = BoundingBox::from_min_size(Vec2::ZERO, Vec2::new(10.0, 10.0));
        let mut rng = StdRng::seed_from_u64(1);
        let grid = CoverageGrid::build(&bb, &|_: Vec2| false, &GridConfig::default(), &mut rng);
        let set = ClusterSet::build(&grid, &bb, 5, 0.3, &mut rng);
        assert!(set.is_empty());
    }

    #[test]
    fn zero_count_yields_no_clusters() {
        let mut rng = StdRng::seed_from_u64(2);
        let (grid, bb) = half_plane_grid(&mut rng);
        assert!(ClusterSet::build(&grid, &bb, 0, 0.3, &mut rng).is_empty());
    }
}
