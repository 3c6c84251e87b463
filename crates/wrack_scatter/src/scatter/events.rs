//! Event types and sinks for observing generation passes.
//!
//! This module defines [`GenerationEvent`] and a set of sinks and adapters to emit, collect, or
//! forward events while running [`crate::scatter::context::GenerationContext::generate_with_events`].
use glam::Vec2;

use crate::scatter::context::{GenerationResult, Strategy};
use crate::scatter::intensity::ClusterCenter;
use crate::scatter::object::DebrisObject;

/// Why a candidate position was discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Lost a probability-weighted acceptance trial (shoreline gradient, flow channel).
    AcceptanceTrial,
    /// Fell outside the strategy's inset bounds.
    OutOfBounds,
    /// Overlapped an already placed footprint.
    Overlap,
}

/// Describes events emitted during generation.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub enum GenerationEvent {
    /// Emitted when a pass starts.
    RunStarted {
        /// Strategy being run.
        strategy: Strategy,
        /// Side length of the terrain domain.
        terrain_size: f32,
    },

    /// Emitted when a pass finishes, including any post-processing.
    RunFinished {
        /// Objects and counters of the pass.
        result: GenerationResult,
    },

    /// Emitted after a cluster center went through the acceptance trial.
    ClusterEvaluated {
        /// Candidate center.
        center: Vec2,
        /// Acceptance probability at the center.
        probability: f32,
        /// Derived cluster parameters, if accepted.
        cluster: Option<ClusterCenter>,
    },

    /// Emitted when an object is appended to the output.
    ObjectPlaced {
        /// Index in the output sequence.
        index: usize,
        /// The placed object.
        object: DebrisObject,
    },

    /// Emitted when a candidate position is discarded.
    CandidateRejected {
        /// Candidate position.
        position: Vec2,
        /// Reason for rejection.
        reason: RejectReason,
    },

    /// Emitted when a placement phase (e.g. rocks, logs, snagging) ends.
    PhaseFinished {
        /// Phase name.
        phase: &'static str,
        /// Objects placed by this phase.
        placed: usize,
        /// Requested count, for phases with a target.
        requested: Option<usize>,
    },

    /// Non-fatal warning generated during a pass.
    Warning {
        /// Context string (e.g. strategy or phase name).
        context: String,
        /// Human-readable message.
        message: String,
    },
}

/// Discriminant of [`GenerationEvent`], used for sink filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenerationEventKind {
    RunStarted,
    RunFinished,
    ClusterEvaluated,
    ObjectPlaced,
    CandidateRejected,
    PhaseFinished,
    Warning,
}

impl GenerationEvent {
    pub fn kind(&self) -> GenerationEventKind {
        match self {
            GenerationEvent::RunStarted { .. } => GenerationEventKind::RunStarted,
            GenerationEvent::RunFinished { .. } => GenerationEventKind::RunFinished,
            GenerationEvent::ClusterEvaluated { .. } => GenerationEventKind::ClusterEvaluated,
            GenerationEvent::ObjectPlaced { .. } => GenerationEventKind::ObjectPlaced,
            GenerationEvent::CandidateRejected { .. } => GenerationEventKind::CandidateRejected,
            GenerationEvent::PhaseFinished { .. } => GenerationEventKind::PhaseFinished,
            GenerationEvent::Warning { .. } => GenerationEventKind::Warning,
        }
    }
}

/// A generic event sink that accepts [`GenerationEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: GenerationEvent);

    /// Whether events of `kind` should be built and sent at all.
    #[inline]
    fn wants(&self, _kind: GenerationEventKind) -> bool {
        true
    }

    fn send_many<I>(&mut self, events: I)
    where
        Self: Sized,
        I: IntoIterator<Item = GenerationEvent>,
    {
        for e in events {
            self.send(e);
        }
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: GenerationEvent) {}

    #[inline]
    fn wants(&self, _kind: GenerationEventKind) -> bool {
        false
    }
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(GenerationEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(GenerationEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(GenerationEvent),
{
    #[inline]
    fn send(&mut self, event: GenerationEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects events in a `Vec`, optionally restricted to some kinds.
#[derive(Default)]
pub struct VecSink {
    events: Vec<GenerationEvent>,
    only: Option<Vec<GenerationEventKind>>,
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

    /// Collect only the given kinds.
    pub fn only(kinds: impl IntoIterator<Item = GenerationEventKind>) -> Self {
        Self {
            events: Vec::new(),
            only: Some(kinds.into_iter().collect()),
        }
    }

    pub fn into_inner(self) -> Vec<GenerationEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[GenerationEvent] {
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
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: GenerationEvent) {
        if self.wants(event.kind()) {
            self.events.push(event);
        }
    }

    fn wants(&self, kind: GenerationEventKind) -> bool {
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

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn into_inner(self) -> Vec<S> {
        self.sinks
    }
}

impl<S: EventSink> Default for MultiSink<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EventSink> EventSink for MultiSink<S> {
    fn send(&mut self, event: GenerationEvent) {
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

    fn wants(&self, kind: GenerationEventKind) -> bool {
        self.sinks.iter().any(|s| s.wants(kind))
    }
}
