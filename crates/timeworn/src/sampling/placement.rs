//! Per-spot position sampling: clustered attempt, grid-weighted fallback, or drop.
use std::f32::consts::TAU;

use glam::Vec2;
use rand::RngCore;

use crate::geometry::boundary::ShapeMask;
use crate::geometry::BoundingBox;
use crate::sampling::clusters::ClusterSet;
use crate::sampling::grid::{CellCoverage, CoverageGrid};
use crate::sampling::{exponential, rand01, uniform, WeightedTable};

/// Rate of the exponential radial falloff inside a cluster.
pub const CLUSTER_FALLOFF_RATE: f32 = 2.0;

/// Selection weight of a full cell relative to a partial one.
pub const FULL_CELL_WEIGHT: f32 = 3.0;

/// How a spot request was resolved.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PlacementOutcome {
    /// Found by sampling around a cluster.
    Clustered(Vec2),
    /// Found by grid-weighted uniform sampling.
    Uniform(Vec2),
    /// No position found within the retry budgets; the spot is skipped.
    Dropped,
}

impl PlacementOutcome {
    pub fn position(&self) -> Option<Vec2> {
        match *self {
            PlacementOutcome::Clustered(p) | PlacementOutcome::Uniform(p) => Some(p),
            PlacementOutcome::Dropped => None,
        }
    }

    pub fn is_dropped(&self) -> bool {
        matches!(self, PlacementOutcome::Dropped)
    }
}

/// Places spot centers inside a shape using its coverage grid and cluster set.
///
/// The weight tables are built once, so each call to [`PointSampler::place`] only pays
/// for the draws and membership tests it needs.
pub struct PointSampler<'a, M: ShapeMask + ?Sized> {
    mask: &'a M,
    grid: &'a CoverageGrid,
    clusters: &'a ClusterSet,
    bounds: BoundingBox,
    cluster_table: WeightedTable,
    cells: Vec<(usize, usize, CellCoverage)>,
    cell_table: WeightedTable,
    clustering_probability: f32,
    max_cluster_attempts: usize,
    max_point_retries: usize,
}

impl<'a, M: ShapeMask + ?Sized> PointSampler<'a, M> {
    /// `clustering_strength` in [0, 1]; a spot tries clusters first with probability
    /// `sqrt(clustering_strength)`.
    pub fn new(
        mask: &'a M,
        grid: &'a CoverageGrid,
        clusters: &'a ClusterSet,
        bounds: BoundingBox,
        clustering_strength: f32,
    ) -> Self {
        let cluster_table = WeightedTable::new(clusters.clusters().iter().map(|c| c.weight));
        let cells: Vec<_> = grid
            .cells()
            .filter(|(_, _, c)| *c != CellCoverage::Empty)
            .collect();
        let cell_table = WeightedTable::new(cells.iter().map(|(_, _, c)| match c {
            CellCoverage::Full => FULL_CELL_WEIGHT,
            _ => 1.0,
        }));

        Self {
            mask,
            grid,
            clusters,
            bounds,
            cluster_table,
            cells,
            cell_table,
            clustering_probability: clustering_strength.clamp(0.0, 1.0).sqrt(),
            max_cluster_attempts: 50,
            max_point_retries: 50,
        }
    }

    /// Set the retry budgets of the clustered and grid-weighted strategies.
    pub fn with_retry_budgets(mut self, cluster_attempts: usize, point_retries: usize) -> Self {
        self.max_cluster_attempts = cluster_attempts;
        self.max_point_retries = point_retries;
        self
    }

    /// Resolve one spot request.
    pub fn place(&self, rng: &mut dyn RngCore) -> PlacementOutcome {
        let use_clustering = rand01(rng) < self.clustering_probability;
        if use_clustering && !self.clusters.is_empty() {
            if let Some(p) = self.try_clustered(rng) {
                return PlacementOutcome::Clustered(p);
            }
        }
        match self.try_grid_weighted(rng) {
            Some(p) => PlacementOutcome::Uniform(p),
            None => PlacementOutcome::Dropped,
        }
    }

    /// Sample around weight-selected clusters; first interior candidate wins.
    pub fn try_clustered(&self, rng: &mut dyn RngCore) -> Option<Vec2> {
        let clusters = self.clusters.clusters();
        for _ in 0..self.max_cluster_attempts {
            let cluster = clusters[self.cluster_table.pick(rng)?];
            let dist = (cluster.radius * exponential(rng, CLUSTER_FALLOFF_RATE)).min(cluster.radius);
            let angle = uniform(rng, 0.0, TAU);
            let candidate = self
                .bounds
                .clamp(cluster.center + Vec2::from_angle(angle) * dist);
            if self.mask.contains(candidate) {
                return Some(candidate);
            }
        }
        None
    }

    /// Sample inside coverage-weighted cells. Full cells are accepted without a
    /// membership test; partial cells are tested.
    pub fn try_grid_weighted(&self, rng: &mut dyn RngCore) -> Option<Vec2> {
        if self.cell_table.is_empty() {
            return None;
        }
        for _ in 0..self.max_point_retries {
            let (col, row, coverage) = self.cells[self.cell_table.pick(rng)?];
            let candidate = self.grid.sample_in_cell(col, row, rng);
            if coverage == CellCoverage::Full || self.mask.contains(candidate) {
                return Some(candidate);
            }
        }
        None
    }
}
