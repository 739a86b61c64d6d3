//! Effect configuration: grid tuning, spot counts, size range and shape parameters.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::bezier::DEFAULT_FLATTEN_SEGMENTS;

/// Physical size of a coverage-grid cell.
pub const DEFAULT_CELL_SIZE_MM: f32 = 5.0;
/// Samples drawn per cell to classify its coverage.
pub const DEFAULT_SAMPLES_PER_CELL: usize = 12;
/// Coverage ratio from which a cell counts as full.
pub const DEFAULT_FULL_COVERAGE_THRESHOLD: f32 = 0.9;
/// CSS pixels per millimetre, the usual user unit of SVG documents.
pub const DEFAULT_UNITS_PER_MM: f32 = 96.0 / 25.4;
/// Retry budget of the clustered placement strategy.
pub const DEFAULT_MAX_CLUSTER_ATTEMPTS: usize = 50;
/// Retry budget of the grid-weighted placement strategy.
pub const DEFAULT_MAX_POINT_RETRIES: usize = 50;

/// Coverage grid tuning.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridConfig {
    /// Nominal cell edge length in working units.
    pub cell_size: f32,
    /// Samples per cell.
    pub samples_per_cell: usize,
    /// Coverage ratio in [0, 1] from which a cell is classified full.
    pub full_threshold: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::from_millimeters(DEFAULT_CELL_SIZE_MM, DEFAULT_UNITS_PER_MM)
    }
}

impl GridConfig {
    /// Grid with a cell size given in millimetres, converted with the host's scale.
    pub fn from_millimeters(cell_size_mm: f32, units_per_mm: f32) -> Self {
        Self {
            cell_size: cell_size_mm * units_per_mm,
            samples_per_cell: DEFAULT_SAMPLES_PER_CELL,
            full_threshold: DEFAULT_FULL_COVERAGE_THRESHOLD,
        }
    }

    pub fn with_cell_size(mut self, cell_size: f32) -> Self {
        self.cell_size = cell_size;
        self
    }

    pub fn with_samples_per_cell(mut self, samples: usize) -> Self {
        self.samples_per_cell = samples;
        self
    }

    pub fn with_full_threshold(mut self, threshold: f32) -> Self {
        self.full_threshold = threshold;
        self
    }
}

/// Which spot geometry to generate.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ShapeMode {
    /// Smooth blobs.
    #[default]
    Organic,
    /// Faceted fragments.
    Angular,
    /// Per-spot coin flip between the two.
    Mixed,
}

/// Parameters of one effect run. Lengths are in working (document) units, angles in
/// radians, ratios in [0, 1].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Debug, PartialEq)]
pub struct EffectConfig {
    /// Number of spots requested.
    pub spot_count: usize,
    /// Smallest spot diameter.
    pub size_min: f32,
    /// Largest spot diameter.
    pub size_max: f32,
    /// Radius jitter of spot outlines.
    pub irregularity: f32,
    pub shape_mode: ShapeMode,
    /// How strongly spots gather around clusters.
    pub clustering_strength: f32,
    pub cluster_count: usize,
    /// Base stretch factor along the elongation axis (at least 1).
    pub elongation_base: f32,
    /// Relative per-spot variation of the stretch factor.
    pub elongation_variation: f32,
    /// Base elongation axis angle.
    pub elongation_angle_base: f32,
    /// Per-spot angle variation, as a fraction of π.
    pub angle_variation: f32,
    pub grid: GridConfig,
    /// Line segments per boundary cubic.
    pub flatten_segments: usize,
    pub max_cluster_attempts: usize,
    pub max_point_retries: usize,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            spot_count: 200,
            size_min: 0.5 * DEFAULT_UNITS_PER_MM,
            size_max: 3.0 * DEFAULT_UNITS_PER_MM,
            irregularity: 0.5,
            shape_mode: ShapeMode::Organic,
            clustering_strength: 0.3,
            cluster_count: 5,
            elongation_base: 1.5,
            elongation_variation: 0.3,
            elongation_angle_base: 45.0_f32.to_radians(),
            angle_variation: 0.3,
            grid: GridConfig::default(),
            flatten_segments: DEFAULT_FLATTEN_SEGMENTS,
            max_cluster_attempts: DEFAULT_MAX_CLUSTER_ATTEMPTS,
            max_point_retries: DEFAULT_MAX_POINT_RETRIES,
        }
    }
}

impl EffectConfig {
    /// Creates a new [`EffectConfig`] requesting `spot_count` spots with default parameters.
    pub fn new(spot_count: usize) -> Self {
        Self {
            spot_count,
            ..Default::default()
        }
    }

    pub fn with_spot_count(mut self, spot_count: usize) -> Self {
        self.spot_count = spot_count;
        self
    }

    /// Sets the spot diameter range.
    pub fn with_size_range(mut self, size_min: f32, size_max: f32) -> Self {
        self.size_min = size_min;
        self.size_max = size_max;
        self
    }

    pub fn with_irregularity(mut self, irregularity: f32) -> Self {
        self.irregularity = irregularity;
        self
    }

    pub fn with_shape_mode(mut self, shape_mode: ShapeMode) -> Self {
        self.shape_mode = shape_mode;
        self
    }

    /// Sets clustering strength and the number of clusters.
    pub fn with_clustering(mut self, strength: f32, cluster_count: usize) -> Self {
        self.clustering_strength = strength;
        self.cluster_count = cluster_count;
        self
    }

    /// Sets elongation factor and its relative variation.
    pub fn with_elongation(mut self, base: f32, variation: f32) -> Self {
        self.elongation_base = base;
        self.elongation_variation = variation;
        self
    }

    /// Sets the elongation axis angle (radians) and its variation (fraction of π).
    pub fn with_elongation_angle(mut self, angle: f32, variation: f32) -> Self {
        self.elongation_angle_base = angle;
        self.angle_variation = variation;
        self
    }

    pub fn with_grid(mut self, grid: GridConfig) -> Self {
        self.grid = grid;
        self
    }

    pub fn with_flatten_segments(mut self, segments: usize) -> Self {
        self.flatten_segments = segments;
        self
    }

    /// Sets the clustered and grid-weighted retry budgets.
    pub fn with_retry_budgets(mut self, cluster_attempts: usize, point_retries: usize) -> Self {
        self.max_cluster_attempts = cluster_attempts;
        self.max_point_retries = point_retries;
        self
    }

    /// Validates the configuration, returning an error if it cannot be run.
    pub fn validate(&self) -> Result<()> {
        if !self.size_min.is_finite() || !self.size_max.is_finite() {
            return Err(Error::InvalidConfig("spot sizes must be finite".into()));
        }
        if self.size_min < 0.0 {
            return Err(Error::InvalidConfig("size_min must be >= 0".into()));
        }
        if self.size_min > self.size_max {
            return Err(Error::InvalidConfig(format!(
                "size_min ({}) must not exceed size_max ({})",
                self.size_min, self.size_max
            )));
        }
        if !self.elongation_base.is_finite() || self.elongation_base < 1.0 {
            return Err(Error::InvalidConfig(
                "elongation_base must be finite and >= 1".into(),
            ));
        }
        if !self.elongation_angle_base.is_finite() {
            return Err(Error::InvalidConfig(
                "elongation_angle_base must be finite".into(),
            ));
        }
        if !self.grid.cell_size.is_finite() || self.grid.cell_size <= 0.0 {
            return Err(Error::InvalidConfig("grid.cell_size must be > 0".into()));
        }
        if self.grid.samples_per_cell == 0 {
            return Err(Error::InvalidConfig(
                "grid.samples_per_cell must be > 0".into(),
            ));
        }
        if self.flatten_segments == 0 {
            return Err(Error::InvalidConfig("flatten_segments must be > 0".into()));
        }
        for (name, value) in self.ratios() {
            if value.is_nan() {
                return Err(Error::InvalidConfig(format!("{name} must not be NaN")));
            }
        }

        Ok(())
    }

    /// Copy with every ratio parameter clamped into [0, 1].
    pub fn sanitized(&self) -> Self {
        let mut out = self.clone();
        out.irregularity = self.irregularity.clamp(0.0, 1.0);
        out.clustering_strength = self.clustering_strength.clamp(0.0, 1.0);
        out.elongation_variation = self.elongation_variation.clamp(0.0, 1.0);
        out.angle_variation = self.angle_variation.clamp(0.0, 1.0);
        out.grid.full_threshold = self.grid.full_threshold.clamp(0.0, 1.0);
        out
    }

    fn ratios(&self) -> [(&'static str, f32); 5] {
        [
            ("irregularity", self.irregularity),
            ("clustering_strength", self.clustering_strength),
            ("elongation_variation", self.elongation_variation),
            ("angle_variation", self.angle_variation),
            ("grid.full_threshold", self.grid.full_threshold),
        ]
    }
}
