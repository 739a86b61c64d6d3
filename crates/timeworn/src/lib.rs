#![forbid(unsafe_code)]
//! timeworn: procedural weathering spots scattered inside arbitrary closed 2D shapes.
//!
//! Modules:
//! - geometry: host path data, Bézier flattening, boundary polygons and even-odd membership
//! - sampling: coverage grid, attraction clusters and the per-spot placement state machine
//! - spots: organic and angular spot synthesis producing closed outlines
//! - effect: configuration, runner, events and sharded execution
//!
//! The host supplies a [`geometry::PathShape`] and (optionally) its bounding box, and
//! receives a list of closed [`spots::Outline`]s. Randomness is always injected.
pub mod effect;
pub mod error;
pub mod geometry;
pub mod sampling;
pub mod spots;

/// Convenient re-exports for common types. Import with `use timeworn::prelude::*;`.
pub mod prelude {
    pub use crate::effect::config::{
        EffectConfig, GridConfig, ShapeMode, DEFAULT_CELL_SIZE_MM, DEFAULT_UNITS_PER_MM,
    };
    pub use crate::effect::events::{
        EffectEvent, EffectEventKind, EventSink, FnSink, MultiSink, VecSink,
    };
    pub use crate::effect::runner::{
        run_effect, run_effect_with_events, EffectRunner, PlacedSpot, RunResult,
    };
    pub use crate::effect::shard::{run_sharded, seed_for_shard};
    pub use crate::error::{Error, Result};
    pub use crate::geometry::bezier::{flatten_cubic, DEFAULT_FLATTEN_SEGMENTS};
    pub use crate::geometry::boundary::{BoundaryPolygon, Edge, ShapeMask};
    pub use crate::geometry::{Anchor, BoundingBox, Contour, PathCommand, PathShape};
    pub use crate::sampling::clusters::{Cluster, ClusterSet};
    pub use crate::sampling::grid::{CellCoverage, CoverageGrid};
    pub use crate::sampling::placement::{PlacementOutcome, PointSampler};
    pub use crate::spots::outline::Outline;
    pub use crate::spots::{Spot, SpotKind};
}
