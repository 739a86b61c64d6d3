//! High-level runner: boundary, coverage grid and clusters once, then one placement and
//! one outline per requested spot.
use std::ops::Range;

use rand::RngCore;
use tracing::{info, warn};

use crate::effect::config::EffectConfig;
use crate::effect::events::{EffectEvent, EffectEventKind, EventSink};
use crate::error::{Error, Result};
use crate::geometry::boundary::BoundaryPolygon;
use crate::geometry::{BoundingBox, PathShape};
use crate::sampling::clusters::ClusterSet;
use crate::sampling::grid::{CellCoverage, CoverageGrid};
use crate::sampling::placement::{PlacementOutcome, PointSampler};
use crate::spots::{Outline, Spot};

/// A spot together with its synthesized outline.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedSpot {
    pub spot: Spot,
    pub outline: Outline,
}

/// Result of an effect run.
#[non_exhaustive]
#[derive(Debug, Clone, Default)]
pub struct RunResult {
    /// Placed spots in request order.
    pub spots: Vec<PlacedSpot>,
    /// Number of spots requested.
    pub requested: usize,
    /// Spots placed by the clustered strategy.
    pub clustered: usize,
    /// Spots placed by the grid-weighted strategy.
    pub uniform: usize,
    /// Spot requests that found no position.
    pub dropped: usize,
}

impl RunResult {
    /// Creates a new empty [`RunResult`].
    pub fn new() -> Self {
        Self::default()
    }

    pub fn placed(&self) -> usize {
        self.spots.len()
    }

    pub fn outlines(&self) -> impl Iterator<Item = &Outline> + '_ {
        self.spots.iter().map(|s| &s.outline)
    }

    /// Append another partial result, keeping spot order.
    pub fn extend(&mut self, other: RunResult) {
        self.spots.extend(other.spots);
        self.requested += other.requested;
        self.clustered += other.clustered;
        self.uniform += other.uniform;
        self.dropped += other.dropped;
    }
}

/// Runs the effect for a fixed, validated configuration.
pub struct EffectRunner {
    config: EffectConfig,
}

impl EffectRunner {
    pub fn try_new(config: EffectConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn new(config: EffectConfig) -> Self {
        debug_assert!(config.validate().is_ok(), "invalid effect configuration");
        Self { config }
    }

    pub fn config(&self) -> &EffectConfig {
        &self.config
    }

    /// Runs the effect over `shape`. `bounds` defaults to the shape's own bounding box.
    pub fn run(
        &self,
        shape: &PathShape,
        bounds: Option<BoundingBox>,
        rng: &mut impl RngCore,
    ) -> Result<RunResult> {
        run_effect_internal(shape, bounds, &self.config, rng, &mut ())
    }

    pub fn run_with_events(
        &self,
        shape: &PathShape,
        bounds: Option<BoundingBox>,
        rng: &mut impl RngCore,
        sink: &mut dyn EventSink,
    ) -> Result<RunResult> {
        run_effect_internal(shape, bounds, &self.config, rng, sink)
    }
}

pub fn run_effect<R: RngCore>(
    shape: &PathShape,
    bounds: Option<BoundingBox>,
    config: &EffectConfig,
    rng: &mut R,
) -> Result<RunResult> {
    config.validate()?;
    run_effect_internal(shape, bounds, config, rng, &mut ())
}

pub fn run_effect_with_events<R: RngCore>(
    shape: &PathShape,
    bounds: Option<BoundingBox>,
    config: &EffectConfig,
    rng: &mut R,
    sink: &mut dyn EventSink,
) -> Result<RunResult> {
    config.validate()?;
    run_effect_internal(shape, bounds, config, rng, sink)
}

fn run_effect_internal<R: RngCore>(
    shape: &PathShape,
    bounds: Option<BoundingBox>,
    config: &EffectConfig,
    rng: &mut R,
    sink: &mut dyn EventSink,
) -> Result<RunResult> {
    let prepared = PreparedEffect::prepare(shape, bounds, config, rng, sink)?;
    let result = prepared.place_spots(0..prepared.config.spot_count, rng, sink);
    finish(&result, sink);
    Ok(result)
}

pub(crate) fn finish(result: &RunResult, sink: &mut dyn EventSink) {
    info!(
        "Effect finished: {} of {} spots placed ({} clustered, {} uniform, {} dropped).",
        result.placed(),
        result.requested,
        result.clustered,
        result.uniform,
        result.dropped
    );
    if sink.wants(EffectEventKind::RunFinished) {
        sink.send(EffectEvent::RunFinished {
            result: result.clone(),
        });
    }
}

/// Everything built once per run and only read while placing spots.
pub(crate) struct PreparedEffect {
    pub(crate) config: EffectConfig,
    bounds: BoundingBox,
    boundary: BoundaryPolygon,
    grid: CoverageGrid,
    clusters: ClusterSet,
}

impl PreparedEffect {
    /// Flatten the shape, classify the grid and seed clusters.
    ///
    /// Fails only when the shape has no edges or no finite bounding box can be obtained.
    pub(crate) fn prepare(
        shape: &PathShape,
        bounds: Option<BoundingBox>,
        config: &EffectConfig,
        rng: &mut dyn RngCore,
        sink: &mut dyn EventSink,
    ) -> Result<Self> {
        let config = config.sanitized();
        let boundary = BoundaryPolygon::from_shape(shape, config.flatten_segments);
        if boundary.is_empty() {
            return Err(Error::MissingShape("shape has no contour with edges".into()));
        }
        let bounds = match bounds.or_else(|| boundary.bounding_box()) {
            Some(b) if b.is_finite() => b,
            Some(b) => {
                return Err(Error::MissingShape(format!(
                    "bounding box is not finite: {b:?}"
                )))
            }
            None => return Err(Error::MissingShape("no bounding box obtainable".into())),
        };

        info!(
            "Running effect: {} spots in a {}x{} box, {} edges over {} contours.",
            config.spot_count,
            bounds.width(),
            bounds.height(),
            boundary.edge_count(),
            boundary.contour_count()
        );
        if sink.wants(EffectEventKind::RunStarted) {
            sink.send(EffectEvent::RunStarted {
                config: config.clone(),
                bounds,
            });
        }
        if bounds.is_degenerate() {
            emit_warning(sink, "bounds", "bounding box has no area; every spot will be dropped");
        }

        let grid = CoverageGrid::build(&bounds, &boundary, &config.grid, rng);
        let empty = grid.count(CellCoverage::Empty);
        if sink.wants(EffectEventKind::GridBuilt) {
            sink.send(EffectEvent::GridBuilt {
                cols: grid.cols(),
                rows: grid.rows(),
                full: grid.count(CellCoverage::Full),
                partial: grid.count(CellCoverage::Partial),
                empty,
            });
        }
        if empty == grid.cols() * grid.rows() && !bounds.is_degenerate() {
            emit_warning(sink, "shape", "no grid cell intersects the shape interior");
        }

        let clusters = ClusterSet::build(
            &grid,
            &bounds,
            config.cluster_count,
            config.clustering_strength,
            rng,
        );
        if sink.wants(EffectEventKind::ClustersSeeded) {
            sink.send(EffectEvent::ClustersSeeded {
                count: clusters.len(),
            });
        }

        Ok(Self {
            config,
            bounds,
            boundary,
            grid,
            clusters,
        })
    }

    /// Resolve the spot requests in `indices`, in order.
    pub(crate) fn place_spots(
        &self,
        indices: Range<usize>,
        rng: &mut dyn RngCore,
        sink: &mut dyn EventSink,
    ) -> RunResult {
        let sampler = PointSampler::new(
            &self.boundary,
            &self.grid,
            &self.clusters,
            self.bounds,
            self.config.clustering_strength,
        )
        .with_retry_budgets(self.config.max_cluster_attempts, self.config.max_point_retries);

        let mut result = RunResult {
            spots: Vec::with_capacity(indices.len()),
            requested: indices.len(),
            ..Default::default()
        };
        for index in indices {
            let outcome = sampler.place(rng);
            let Some(position) = outcome.position() else {
                result.dropped += 1;
                if sink.wants(EffectEventKind::SpotDropped) {
                    sink.send(EffectEvent::SpotDropped { index });
                }
                continue;
            };
            let clustered = matches!(outcome, PlacementOutcome::Clustered(_));
            if clustered {
                result.clustered += 1;
            } else {
                result.uniform += 1;
            }

            let spot = Spot::sample(position, &self.config, rng);
            let placed = PlacedSpot {
                spot,
                outline: spot.outline(rng),
            };
            if sink.wants(EffectEventKind::SpotPlaced) {
                sink.send(EffectEvent::SpotPlaced {
                    index,
                    clustered,
                    spot: placed.clone(),
                });
            }
            result.spots.push(placed);
        }
        result
    }
}

fn emit_warning(sink: &mut dyn EventSink, context: &str, message: &str) {
    warn!("{context}: {message}.");
    if sink.wants(EffectEventKind::Warning) {
        sink.send(EffectEvent::Warning {
            context: context.into(),
            message: message.into(),
        });
    }
}
