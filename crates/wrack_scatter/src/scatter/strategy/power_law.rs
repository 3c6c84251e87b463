//! Pure power-law scatter: independent shoreline-weighted acceptance of uniform candidates.
use glam::Vec2;
use rand::Rng as RngCore;

use crate::sampling::{PositionSampling, UniformRandomSampling};
use crate::scatter::config::PowerLawConfig;
use crate::scatter::events::RejectReason;
use crate::scatter::strategy::Pass;

pub(crate) fn run(pass: &mut Pass<'_>, config: &PowerLawConfig, rng: &mut dyn RngCore) {
    let terrain_size = pass.config.terrain_size;
    let rect = config.bounds.resolve(terrain_size);
    let model = pass.model;
    let thresholds = pass.config.thresholds;

    let candidates = UniformRandomSampling::new(config.candidate_count)
        .generate(Vec2::splat(terrain_size).into(), rng);

    for p in candidates.into_iter().map(Vec2::from) {
        pass.candidate();

        let (accepted, _) = model.accept(p, rng);
        if !accepted {
            pass.reject(p, RejectReason::AcceptanceTrial);
            continue;
        }
        if !rect.contains(p) {
            pass.reject(p, RejectReason::OutOfBounds);
            continue;
        }

        let intensity = model.draw_intensity(config.size_law, rng);
        let category = thresholds.classify(intensity);
        let length = config.length.lerp(intensity);
        let object = pass.object_with_length(p, category, length, rng);
        pass.place(object);
    }

    let placed = pass.result.objects.len();
    pass.phase_finished("power_law", placed, None);
}
