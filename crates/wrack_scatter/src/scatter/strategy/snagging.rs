//! Anchor snagging: light debris caught around heavy objects already on the ground.
//!
//! Used by the categorized strategy for its towel phase and available as a post-process over
//! any strategy's output via [`crate::scatter::config::GenerationConfig::snagging`].
use glam::Vec2;
use rand::Rng as RngCore;

use crate::sampling::{rand_angle, rand_range};
use crate::scatter::bounds::Rect;
use crate::scatter::config::SnagConfig;
use crate::scatter::events::RejectReason;
use crate::scatter::intensity::ValueRange;
use crate::scatter::object::DebrisCategory;
use crate::scatter::overlap::OverlapIndex;
use crate::scatter::strategy::{count_between, Pass};

/// Placement parameters for snagged towels.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SnagParams {
    pub(crate) towel_radius: ValueRange,
    /// How far beyond the anchor's rim a towel may land.
    pub(crate) snag_distance: f32,
    pub(crate) attempts: usize,
    pub(crate) bounds: Rect,
}

/// Try to place `count` towels in the ring around `anchor`; returns how many landed.
pub(crate) fn snag_towels(
    pass: &mut Pass<'_>,
    index: &mut OverlapIndex,
    anchor: (Vec2, f32),
    count: usize,
    params: &SnagParams,
    rng: &mut dyn RngCore,
) -> usize {
    let (anchor_pos, anchor_radius) = anchor;
    let mut placed = 0;

    for _ in 0..count {
        for _ in 0..params.attempts {
            pass.candidate();
            let radius = params.towel_radius.sample(rng);
            let reach = anchor_radius + radius + params.snag_distance;
            let distance = rand_range(rng, anchor_radius, reach);
            let p = anchor_pos + Vec2::from_angle(rand_angle(rng)) * distance;

            if !params.bounds.contains(p) {
                pass.reject(p, RejectReason::OutOfBounds);
                continue;
            }
            if !index.try_insert(p, radius) {
                pass.reject(p, RejectReason::Overlap);
                continue;
            }

            let object = pass.object_with_radius(p, DebrisCategory::Towel, radius, rng);
            pass.place(object);
            placed += 1;
            break;
        }
    }

    placed
}

/// Snag towels around every sufficiently large object already in the pass output.
pub(crate) fn run(pass: &mut Pass<'_>, config: &SnagConfig, rng: &mut dyn RngCore) {
    let terrain_size = pass.config.terrain_size;
    let mut index = OverlapIndex::with_grid(
        config.overlap,
        Vec2::splat(terrain_size),
        config.grid_cell_size,
    );

    let mut anchors = Vec::new();
    for object in &pass.result.objects {
        let p = object.position_2d();
        index.insert(p, object.footprint_radius);
        if object.footprint_radius >= config.anchor_min_radius {
            anchors.push((p, object.footprint_radius));
        }
    }

    let params = SnagParams {
        towel_radius: config.towel_radius,
        snag_distance: config.snag_distance,
        attempts: config.attempts_per_towel,
        bounds: config.bounds.resolve(terrain_size),
    };

    let mut requested = 0;
    let mut placed = 0;
    for anchor in anchors {
        let count = count_between(
            config.towels_per_anchor_min,
            config.towels_per_anchor_max,
            rng,
        );
        requested += count;
        placed += snag_towels(pass, &mut index, anchor, count, &params, rng);
    }

    pass.phase_finished("snagging", placed, Some(requested));
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::scatter::config::{GenerationConfig, HybridConfig, SnagConfig};
    use crate::scatter::context::{GenerationContext, Strategy};
    use crate::scatter::object::DebrisCategory;

    fn config(snagging: Option<SnagConfig>) -> GenerationConfig {
        GenerationConfig::default()
            .with_hybrid(HybridConfig {
                center_count: 60,
                ..Default::default()
            })
            .with_snagging(snagging)
    }

    #[test]
    fn post_process_appends_towels_near_anchors() {
        let snag = SnagConfig::default();
        let mut base = GenerationContext::try_new(config(None)).expect("valid config");
        let before = base
            .generate(Strategy::Hybrid, &mut StdRng::seed_from_u64(60))
            .to_vec();

        let mut ctx = GenerationContext::try_new(config(Some(snag.clone()))).expect("valid config");
        let after = ctx
            .generate(Strategy::Hybrid, &mut StdRng::seed_from_u64(60))
            .to_vec();

        // The primary pass is untouched; snagged towels are appended.
        assert_eq!(&after[..before.len()], &before[..]);
        let added = &after[before.len()..];
        assert!(!added.is_empty());

        let anchors: Vec<_> = before
            .iter()
            .filter(|o| o.footprint_radius >= snag.anchor_min_radius)
            .collect();
        let rect = snag.bounds.resolve(800.0);
        for towel in added {
            assert_eq!(towel.category, DebrisCategory::Towel);
            assert!(rect.contains(towel.position_2d()));
            let p = towel.position_2d();
            let reach = snag.towel_radius.max + snag.snag_distance;
            assert!(anchors
                .iter()
                .any(|a| a.position_2d().distance(p) <= a.footprint_radius + reach + 1e-3));
        }
    }

    #[test]
    fn snagged_towels_respect_overlap_rules() {
        let snag = SnagConfig::default();
        let mut base = GenerationContext::try_new(config(None)).expect("valid config");
        let primary = base
            .generate(Strategy::Hybrid, &mut StdRng::seed_from_u64(61))
            .len();

        let mut ctx = GenerationContext::try_new(config(Some(snag.clone()))).expect("valid config");
        let objects = ctx
            .generate(Strategy::Hybrid, &mut StdRng::seed_from_u64(61))
            .to_vec();
        assert!(objects.len() > primary);

        // Every appended towel keeps its separation from all objects placed before it.
        for (j, towel) in objects.iter().enumerate().skip(primary) {
            for earlier in &objects[..j] {
                let required = snag
                    .overlap
                    .required_separation(towel.footprint_radius, earlier.footprint_radius);
                let d = towel.position_2d().distance(earlier.position_2d());
                assert!(d >= required - 1e-3, "towel {j} too close: {d} < {required}");
            }
        }
    }
}
