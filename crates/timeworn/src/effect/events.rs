//! Event types and sinks for observing effect runs.
//!
//! [`EffectEvent`]s are emitted by [`crate::effect::runner::EffectRunner`] and
//! [`crate::effect::runner::run_effect_with_events`]. Sinks can opt out of individual
//! event kinds through [`EventSink::wants`], which lets the runner skip building
//! payloads nobody reads.
use glam::Vec2;

use crate::effect::config::EffectConfig;
use crate::effect::runner::{PlacedSpot, RunResult};
use crate::geometry::BoundingBox;

/// Describes events emitted while running the effect.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub enum EffectEvent {
    /// Emitted once the configuration is sanitized and the bounding box is known.
    RunStarted {
        /// The sanitized configuration in effect.
        config: EffectConfig,
        /// Bounding box the run works in.
        bounds: BoundingBox,
    },

    /// Emitted after the coverage grid is classified.
    GridBuilt {
        cols: usize,
        rows: usize,
        full: usize,
        partial: usize,
        empty: usize,
    },

    /// Emitted after clusters are seeded. `count` is zero for shapes without interior.
    ClustersSeeded { count: usize },

    /// Emitted for every placed spot.
    SpotPlaced {
        /// Index of the spot request.
        index: usize,
        /// Whether the position came from a cluster.
        clustered: bool,
        spot: PlacedSpot,
    },

    /// Emitted when a spot request exhausted its retry budgets.
    SpotDropped { index: usize },

    /// Emitted when the run finishes.
    RunFinished { result: RunResult },

    /// Non-fatal warning generated during the run.
    Warning {
        /// Context string, e.g. `shape`.
        context: String,
        /// Human-readable message.
        message: String,
    },
}

impl EffectEvent {
    pub fn kind(&self) -> EffectEventKind {
        match self {
            EffectEvent::RunStarted { .. } => EffectEventKind::RunStarted,
            EffectEvent::GridBuilt { .. } => EffectEventKind::GridBuilt,
            EffectEvent::ClustersSeeded { .. } => EffectEventKind::ClustersSeeded,
            EffectEvent::SpotPlaced { .. } => EffectEventKind::SpotPlaced,
            EffectEvent::SpotDropped { .. } => EffectEventKind::SpotDropped,
            EffectEvent::RunFinished { .. } => EffectEventKind::RunFinished,
            EffectEvent::Warning { .. } => EffectEventKind::Warning,
        }
    }

    /// Position of a placed spot, if this is a placement event.
    pub fn position(&self) -> Option<Vec2> {
        match self {
            EffectEvent::SpotPlaced { spot, .. } => Some(spot.spot.position),
            _ => None,
        }
    }
}

/// Discriminant of [`EffectEvent`], used for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectEventKind {
    RunStarted,
    GridBuilt,
    ClustersSeeded,
    SpotPlaced,
    SpotDropped,
    RunFinished,
    Warning,
}

/// A generic event sink that accepts [`EffectEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: EffectEvent);

    /// Whether the sink is interested in events of `kind`. Defaults to all.
    #[inline]
    fn wants(&self, _kind: EffectEventKind) -> bool {
        true
    }

    fn send_many<I>(&mut self, events: I)
    where
        Self: Sized,
        I: IntoIterator<Item = EffectEvent>,
    {
        for e in events {
            self.send(e);
        }
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: EffectEvent) {}

    #[inline]
    fn wants(&self, _kind: EffectEventKind) -> bool {
        false
    }
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(EffectEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(EffectEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(EffectEvent),
{
    #[inline]
    fn send(&mut self, event: EffectEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects events in a `Vec`, optionally restricted to some kinds.
#[derive(Default)]
pub struct VecSink {
    events: Vec<EffectEvent>,
    only: Option<Vec<EffectEventKind>>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self {
            events: Vec::with_capacity(cap),
            only: None,
        }
    }

    /// Collect only events of the listed kinds.
    pub fn only(kinds: impl IntoIterator<Item = EffectEventKind>) -> Self {
        Self {
            events: Vec::new(),
            only: Some(kinds.into_iter().collect()),
        }
    }

    pub fn into_inner(self) -> Vec<EffectEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[EffectEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of collected events of `kind`.
    pub fn count(&self, kind: EffectEventKind) -> usize {
        self.events.iter().filter(|e| e.kind() == kind).count()
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: EffectEvent) {
        if self.wants(event.kind()) {
            self.events.push(event);
        }
    }

    fn wants(&self, kind: EffectEventKind) -> bool {
        self.only.as_ref().is_none_or(|kinds| kinds.contains(&kind))
    }
}

/// Fan-out sink that forwards each event to all contained sinks.
pub struct MultiSink<S: EventSink> {
    pub(crate) sinks: Vec<S>,
}

impl<S: EventSink> MultiSink<S> {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn with_sinks(sinks: Vec<S>) -> Self {
        Self { sinks }
    }

    pub fn push(&mut self, sink: S) {
        self.sinks.push(sink);
    }

    pub fn sinks(&self) -> &[S] {
        &self.sinks
    }

    pub fn into_sinks(self) -> Vec<S> {
        self.sinks
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }
}

impl<S: EventSink> Default for MultiSink<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EventSink> EventSink for MultiSink<S> {
    fn send(&mut self, event: EffectEvent) {
        let kind = event.kind();
        let interested: Vec<usize> = (0..self.sinks.len())
            .filter(|&i| self.sinks[i].wants(kind))
            .collect();
        let Some((&last, rest)) = interested.split_last() else {
            return;
        };
        for &i in rest {
            self.sinks[i].send(event.clone());
        }
        self.sinks[last].send(event);
    }

    fn wants(&self, kind: EffectEventKind) -> bool {
        self.sinks.iter().any(|s| s.wants(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn warning(context: &str) -> EffectEvent {
        EffectEvent::Warning {
            context: context.into(),
            message: "msg".into(),
        }
    }

    #[test]
    fn vec_sink_collects_events() {
        let mut sink = VecSink::with_capacity(2);
        assert!(sink.is_empty());
        sink.send(warning("a"));
        sink.send(EffectEvent::SpotDropped { index: 3 });
        assert_eq!(sink.len(), 2);
        assert_eq!(sink.count(EffectEventKind::SpotDropped), 1);
        sink.clear();
        assert!(sink.is_empty());
    }

    #[test]
    fn filtered_vec_sink_ignores_other_kinds() {
        let mut sink = VecSink::only([EffectEventKind::Warning]);
        assert!(!sink.wants(EffectEventKind::SpotDropped));
        sink.send(EffectEvent::SpotDropped { index: 0 });
        sink.send(warning("kept"));
        assert_eq!(sink.len(), 1);
        assert_eq!(sink.as_slice()[0].kind(), EffectEventKind::Warning);
    }

    #[test]
    fn unit_sink_wants_nothing() {
        assert!(!().wants(EffectEventKind::RunFinished));
    }

    #[test]
    fn multi_sink_fans_out_to_interested_sinks() {
        let mut multi = MultiSink::with_sinks(vec![
            VecSink::new(),
            VecSink::only([EffectEventKind::ClustersSeeded]),
        ]);
        multi.send(warning("ctx"));
        multi.send(EffectEvent::ClustersSeeded { count: 4 });
        assert_eq!(multi.len(), 2);
        assert_eq!(multi.sinks()[0].len(), 2);
        assert_eq!(multi.sinks()[1].len(), 1);
        assert!(multi.wants(EffectEventKind::Warning));
        assert!(!MultiSink::<VecSink>::new().wants(EffectEventKind::Warning));
    }

    #[test]
    fn fn_sink_invokes_callback() {
        let mut count = 0;
        let mut sink = FnSink::new(|_event| {
            count += 1;
        });
        sink.send(warning("ctx"));
        assert!(sink.wants(EffectEventKind::GridBuilt));
        drop(sink);
        assert_eq!(count, 1);
    }
}
