//! Placement strategies and the per-pass state they share.
//!
//! Each strategy appends to the pass output through [`Pass::place`] and reports discarded
//! candidates through [`Pass::reject`], so counters and events stay consistent across
//! strategies.
use glam::{Vec2, Vec3};
use rand::Rng as RngCore;
use tracing::{debug, info, warn};

use crate::sampling::{rand01, rand_angle, rand_index};
use crate::scatter::bounds::Rect;
use crate::scatter::config::GenerationConfig;
use crate::scatter::context::{GenerationResult, Strategy};
use crate::scatter::events::{EventSink, GenerationEvent, GenerationEventKind, RejectReason};
use crate::scatter::intensity::{ClusterCenter, ClusterIntensityModel};
use crate::scatter::object::{DebrisCategory, DebrisObject};
use crate::terrain::height::HeightField;
use crate::terrain::normal::NormalField;

pub mod blue_noise;
pub mod categorized;
pub mod hybrid;
pub mod matern;
pub mod power_law;
pub mod snagging;

/// State of one generation pass.
pub(crate) struct Pass<'a> {
    pub(crate) config: &'a GenerationConfig,
    pub(crate) field: &'a HeightField,
    pub(crate) model: ClusterIntensityModel,
    sink: &'a mut dyn EventSink,
    pub(crate) result: GenerationResult,
}

impl<'a> Pass<'a> {
    pub(crate) fn new(
        config: &'a GenerationConfig,
        field: &'a HeightField,
        sink: &'a mut dyn EventSink,
    ) -> Self {
        Self {
            config,
            field,
            model: ClusterIntensityModel::new(
                config.terrain_size,
                config.shoreline_y,
                config.gradient,
            ),
            sink,
            result: GenerationResult::new(),
        }
    }

    fn normals(&self) -> NormalField<'a> {
        NormalField::new(self.field, self.config.normal_epsilon)
    }

    /// Object resting on the terrain at `p` with a fresh spin.
    pub(crate) fn surface_object(
        &self,
        p: Vec2,
        category: DebrisCategory,
        size: Vec3,
        footprint_radius: f32,
        rng: &mut dyn RngCore,
    ) -> DebrisObject {
        let z = self.field.height_at(p) + self.config.surface_offset;
        let surface_normal = self
            .config
            .conform_to_surface
            .then(|| self.normals().normal(p.x, p.y));

        DebrisObject {
            position: p.extend(z),
            category,
            footprint_radius,
            size,
            spin_angle: rand_angle(rng),
            surface_normal,
        }
    }

    /// Object whose footprint spans its length.
    pub(crate) fn object_with_length(
        &self,
        p: Vec2,
        category: DebrisCategory,
        length: f32,
        rng: &mut dyn RngCore,
    ) -> DebrisObject {
        self.surface_object(p, category, category.extent(length), 0.5 * length, rng)
    }

    /// Object sized from its footprint radius.
    pub(crate) fn object_with_radius(
        &self,
        p: Vec2,
        category: DebrisCategory,
        radius: f32,
        rng: &mut dyn RngCore,
    ) -> DebrisObject {
        self.object_with_length(p, category, 2.0 * radius, rng)
    }

    #[inline]
    pub(crate) fn candidate(&mut self) {
        self.result.candidates_evaluated += 1;
    }

    pub(crate) fn reject(&mut self, position: Vec2, reason: RejectReason) {
        self.result.candidates_rejected += 1;
        if self.sink.wants(GenerationEventKind::CandidateRejected) {
            self.sink
                .send(GenerationEvent::CandidateRejected { position, reason });
        }
    }

    /// Append an object to the output; returns its index.
    pub(crate) fn place(&mut self, object: DebrisObject) -> usize {
        let index = self.result.objects.len();
        if self.sink.wants(GenerationEventKind::ObjectPlaced) {
            self.sink.send(GenerationEvent::ObjectPlaced {
                index,
                object: object.clone(),
            });
        }
        self.result.objects.push(object);
        index
    }

    /// Run the shoreline acceptance trial for a cluster center.
    ///
    /// `derive` is only invoked for accepted centers.
    pub(crate) fn evaluate_center(
        &mut self,
        center: Vec2,
        rng: &mut dyn RngCore,
        derive: impl FnOnce(&mut dyn RngCore) -> ClusterCenter,
    ) -> Option<ClusterCenter> {
        let (accepted, probability) = self.model.accept(center, rng);
        let cluster = if accepted {
            self.result.clusters_accepted += 1;
            Some(derive(rng))
        } else {
            self.result.clusters_rejected += 1;
            None
        };

        if self.sink.wants(GenerationEventKind::ClusterEvaluated) {
            self.sink.send(GenerationEvent::ClusterEvaluated {
                center,
                probability,
                cluster,
            });
        }
        cluster
    }

    pub(crate) fn phase_finished(
        &mut self,
        phase: &'static str,
        placed: usize,
        requested: Option<usize>,
    ) {
        debug!("Phase '{}' placed {} objects.", phase, placed);
        if let Some(requested) = requested.filter(|&r| placed < r) {
            warn!(
                "Phase '{}' placed {} of {} requested objects.",
                phase, placed, requested
            );
            self.warning(
                phase,
                format!("placed {placed} of {requested} requested objects"),
            );
        }
        if self.sink.wants(GenerationEventKind::PhaseFinished) {
            self.sink.send(GenerationEvent::PhaseFinished {
                phase,
                placed,
                requested,
            });
        }
    }

    pub(crate) fn warning(&mut self, context: &str, message: String) {
        if self.sink.wants(GenerationEventKind::Warning) {
            self.sink.send(GenerationEvent::Warning {
                context: context.into(),
                message,
            });
        }
    }
}

/// Uniform point over the whole terrain domain.
pub(crate) fn domain_point(terrain_size: f32, rng: &mut dyn RngCore) -> Vec2 {
    Vec2::new(rand01(rng) * terrain_size, rand01(rng) * terrain_size)
}

/// Uniform point inside `rect`.
pub(crate) fn rect_point(rect: &Rect, rng: &mut dyn RngCore) -> Vec2 {
    let size = rect.size();
    rect.min + Vec2::new(rand01(rng) * size.x, rand01(rng) * size.y)
}

/// Uniform point inside a disk.
///
/// The radial draw is `sqrt(u) · radius`: area grows with the square of the radius, so a
/// plain uniform radius would crowd the center.
pub(crate) fn disk_point(center: Vec2, radius: f32, rng: &mut dyn RngCore) -> Vec2 {
    let r = rand01(rng).sqrt() * radius;
    let theta = rand_angle(rng);
    center + Vec2::from_angle(theta) * r
}

/// Uniform integer in `[min, max]`.
pub(crate) fn count_between(min: usize, max: usize, rng: &mut dyn RngCore) -> usize {
    if max <= min {
        return min;
    }
    min + rand_index(rng, (max - min).saturating_add(1))
}

/// Run `strategy` (and the optional snagging post-process) to completion.
pub(crate) fn run_pass(
    config: &GenerationConfig,
    field: &HeightField,
    strategy: Strategy,
    rng: &mut dyn RngCore,
    sink: &mut dyn EventSink,
) -> GenerationResult {
    info!(
        "Generating debris field: strategy '{}', terrain {}.",
        strategy, config.terrain_size
    );
    if sink.wants(GenerationEventKind::RunStarted) {
        sink.send(GenerationEvent::RunStarted {
            strategy,
            terrain_size: config.terrain_size,
        });
    }

    let mut pass = Pass::new(config, field, sink);
    match strategy {
        Strategy::PowerLaw => power_law::run(&mut pass, &config.power_law, rng),
        Strategy::Matern => matern::run(&mut pass, &config.matern, rng),
        Strategy::Hybrid => hybrid::run(&mut pass, &config.hybrid, rng),
        Strategy::Categorized => categorized::run(&mut pass, &config.categorized, rng),
        Strategy::BlueNoise => blue_noise::run(&mut pass, &config.blue_noise, rng),
    }
    if let Some(snag) = &config.snagging {
        snagging::run(&mut pass, snag, rng);
    }

    let Pass { result, sink, .. } = pass;
    if result.objects.is_empty() {
        warn!("Strategy '{}' produced no objects.", strategy);
    }
    info!(
        "Strategy '{}' placed {} objects | candidates: {} evaluated, {} rejected | clusters: {} accepted, {} rejected.",
        strategy,
        result.objects.len(),
        result.candidates_evaluated,
        result.candidates_rejected,
        result.clusters_accepted,
        result.clusters_rejected,
    );

    if sink.wants(GenerationEventKind::RunFinished) {
        sink.send(GenerationEvent::RunFinished {
            result: result.clone(),
        });
    }
    result
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn disk_points_stay_inside_and_fill_uniformly() {
        let mut rng = StdRng::seed_from_u64(21);
        let center = Vec2::new(50.0, 50.0);
        let radius = 10.0;
        let n = 20_000;
        let mut inner = 0;
        for _ in 0..n {
            let p = disk_point(center, radius, &mut rng);
            let d = p.distance(center);
            assert!(d <= radius + 1e-4);
            if d < radius * 0.5 {
                inner += 1;
            }
        }
        // Inner half-radius disk holds a quarter of the area.
        let share = inner as f32 / n as f32;
        assert!((share - 0.25).abs() < 0.02, "inner share {share}");
    }

    #[test]
    fn count_between_is_inclusive() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut seen = [false; 4];
        for _ in 0..500 {
            let c = count_between(2, 5, &mut rng);
            assert!((2..=5).contains(&c));
            seen[c - 2] = true;
        }
        assert!(seen.iter().all(|&s| s));
        assert_eq!(count_between(3, 3, &mut rng), 3);
    }

    #[test]
    fn count_between_handles_the_full_range() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..100 {
            let c = count_between(0, usize::MAX, &mut rng);
            assert!(c < usize::MAX);
        }
        let c = count_between(usize::MAX - 1, usize::MAX, &mut rng);
        assert!(c >= usize::MAX - 1);
    }

    #[test]
    fn rect_points_stay_inside() {
        let mut rng = StdRng::seed_from_u64(8);
        let rect = Rect::new(Vec2::new(5.0, 5.0), Vec2::new(785.0, 728.0));
        for _ in 0..1_000 {
            assert!(rect.contains(rect_point(&rect, &mut rng)));
        }
    }
}
