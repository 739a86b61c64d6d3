//! Coarse coverage grid over the shape's bounding box.
//!
//! Each cell is classified by stratified sampling through a [`ShapeMask`], so later
//! stages can skip the O(edges) membership test for cells known to be inside.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use glam::Vec2;
use rand::RngCore;
use tracing::debug;

use crate::effect::config::GridConfig;
use crate::geometry::boundary::ShapeMask;
use crate::geometry::BoundingBox;
use crate::sampling::rand01;

/// Classification of a grid cell.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellCoverage {
    /// No sample landed inside the shape.
    Empty,
    /// Some samples landed inside.
    Partial,
    /// Coverage ratio reached the full threshold.
    Full,
}

/// Regular rows × cols grid tiling a bounding box exactly.
#[derive(Clone, Debug)]
pub struct CoverageGrid {
    origin: Vec2,
    cell_size: Vec2,
    cols: usize,
    rows: usize,
    cells: Vec<CellCoverage>,
}

impl CoverageGrid {
    /// Compute `(cols, rows)` for a box: `max(1, floor(extent / cell_size))` per axis.
    pub fn dimensions(bounds: &BoundingBox, cell_size: f32) -> (usize, usize) {
        let count = |extent: f32| {
            let n = (extent / cell_size).floor();
            if n.is_finite() && n >= 1.0 {
                n as usize
            } else {
                1
            }
        };
        (count(bounds.width()), count(bounds.height()))
    }

    /// Sample every cell `config.samples_per_cell` times and classify it.
    ///
    /// A degenerate box (no area) yields a grid of empty cells without sampling.
    pub fn build<M>(
        bounds: &BoundingBox,
        mask: &M,
        config: &GridConfig,
        rng: &mut dyn RngCore,
    ) -> Self
    where
        M: ShapeMask + ?Sized,
    {
        let (cols, rows) = Self::dimensions(bounds, config.cell_size);
        let cell_size = Vec2::new(bounds.width() / cols as f32, bounds.height() / rows as f32);
        let mut grid = Self {
            origin: bounds.min,
            cell_size,
            cols,
            rows,
            cells: vec![CellCoverage::Empty; cols * rows],
        };

        if bounds.is_degenerate() || config.samples_per_cell == 0 {
            debug!(
                "Coverage grid {}x{} over a degenerate box; all cells empty.",
                cols, rows
            );
            return grid;
        }

        let samples = config.samples_per_cell;
        for row in 0..rows {
            for col in 0..cols {
                let inside = (0..samples)
                    .filter(|_| mask.contains(grid.sample_in_cell(col, row, rng)))
                    .count();
                let coverage = inside as f32 / samples as f32;
                let class = if inside == 0 {
                    CellCoverage::Empty
                } else if coverage >= config.full_threshold {
                    CellCoverage::Full
                } else {
                    CellCoverage::Partial
                };
                grid.cells[row * cols + col] = class;
            }
        }

        debug!(
            "Coverage grid {}x{}: {} full, {} partial, {} empty.",
            cols,
            rows,
            grid.count(CellCoverage::Full),
            grid.count(CellCoverage::Partial),
            grid.count(CellCoverage::Empty),
        );
        grid
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Grid origin, equal to the bounding box minimum.
    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Actual cell width and height.
    pub fn cell_size(&self) -> Vec2 {
        self.cell_size
    }

    /// Coverage of the cell at `(col, row)`; out-of-range cells are empty.
    pub fn coverage(&self, col: usize, row: usize) -> CellCoverage {
        if col >= self.cols || row >= self.rows {
            return CellCoverage::Empty;
        }
        self.cells[row * self.cols + col]
    }

    /// All cells in row-major order as `(col, row, coverage)`.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, CellCoverage)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &c)| (i % self.cols, i / self.cols, c))
    }

    /// Cells that are partial or full.
    pub fn non_empty_cells(&self) -> Vec<(usize, usize)> {
        self.cells()
            .filter(|(_, _, c)| *c != CellCoverage::Empty)
            .map(|(col, row, _)| (col, row))
            .collect()
    }

    pub fn count(&self, coverage: CellCoverage) -> usize {
        self.cells.iter().filter(|c| **c == coverage).count()
    }

    /// The rectangle covered by a cell.
    pub fn cell_rect(&self, col: usize, row: usize) -> BoundingBox {
        BoundingBox::from_min_size(
            self.origin + Vec2::new(col as f32, row as f32) * self.cell_size,
            self.cell_size,
        )
    }

    /// Uniform random point inside a cell.
    pub fn sample_in_cell(&self, col: usize, row: usize, rng: &mut dyn RngCore) -> Vec2 {
        let min = self.origin + Vec2::new(col as f32, row as f32) * self.cell_size;
        let u = rand01(rng);
        let v = rand01(rng);
        min + Vec2::new(u, v) * self.cell_size
    }
}
