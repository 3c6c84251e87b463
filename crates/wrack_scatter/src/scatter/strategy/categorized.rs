//! Category-driven placement with overlap rejection.
//!
//! Rocks go down first, then logs biased towards the central flow channel, then towels snagged
//! around each rock. Every object is checked against all earlier footprints.
use glam::Vec2;
use rand::Rng as RngCore;

use crate::sampling::rand01;
use crate::scatter::config::CategorizedConfig;
use crate::scatter::events::RejectReason;
use crate::scatter::intensity::ClusterIntensityModel;
use crate::scatter::object::DebrisCategory;
use crate::scatter::overlap::OverlapIndex;
use crate::scatter::strategy::snagging::{snag_towels, SnagParams};
use crate::scatter::strategy::{count_between, rect_point, Pass};

/// Probability of keeping a log candidate at `p`.
///
/// Falls off linearly with horizontal distance from the channel through the middle of the
/// domain, never below `channel_floor`, and optionally scales by the shoreline gradient.
pub(crate) fn log_probability(
    config: &CategorizedConfig,
    model: &ClusterIntensityModel,
    terrain_size: f32,
    p: Vec2,
) -> f32 {
    let half_width = config.channel_half_width * terrain_size;
    let offset = (p.x - 0.5 * terrain_size).abs() / half_width;
    let channel = (1.0 - offset).clamp(config.channel_floor, 1.0);
    if config.logs_follow_shoreline {
        channel * model.acceptance_probability(p)
    } else {
        channel
    }
}

pub(crate) fn run(pass: &mut Pass<'_>, config: &CategorizedConfig, rng: &mut dyn RngCore) {
    let terrain_size = pass.config.terrain_size;
    let rect = config.bounds.resolve(terrain_size);
    let model = pass.model;
    let mut index =
        OverlapIndex::from_check(config.overlap, config.collision, Vec2::splat(terrain_size));

    let mut rocks: Vec<(Vec2, f32)> = Vec::with_capacity(config.rock_count);
    let mut attempts = 0;
    while rocks.len() < config.rock_count && attempts < config.rock_attempts {
        attempts += 1;
        pass.candidate();
        let p = rect_point(&rect, rng);
        let radius = config.rock_radius.sample(rng);
        if !index.try_insert(p, radius) {
            pass.reject(p, RejectReason::Overlap);
            continue;
        }
        rocks.push((p, radius));
        let object = pass.object_with_radius(p, DebrisCategory::Rock, radius, rng);
        pass.place(object);
    }
    pass.phase_finished("rocks", rocks.len(), Some(config.rock_count));

    let mut logs = 0;
    attempts = 0;
    while logs < config.log_count && attempts < config.log_attempts {
        attempts += 1;
        pass.candidate();
        let p = rect_point(&rect, rng);
        if rand01(rng) >= log_probability(config, &model, terrain_size, p) {
            pass.reject(p, RejectReason::AcceptanceTrial);
            continue;
        }
        let radius = config.log_radius.sample(rng);
        if !index.try_insert(p, radius) {
            pass.reject(p, RejectReason::Overlap);
            continue;
        }
        logs += 1;
        let object = pass.object_with_radius(p, DebrisCategory::Log, radius, rng);
        pass.place(object);
    }
    pass.phase_finished("logs", logs, Some(config.log_count));

    let params = SnagParams {
        towel_radius: config.towel_radius,
        snag_distance: config.snag_distance,
        attempts: config.towel_attempts,
        bounds: rect,
    };
    let mut requested = 0;
    let mut towels = 0;
    for &rock in &rocks {
        let count = count_between(config.towels_per_rock_min, config.towels_per_rock_max, rng);
        requested += count;
        towels += snag_towels(pass, &mut index, rock, count, &params, rng);
    }
    pass.phase_finished("towels", towels, Some(requested));
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::scatter::config::GenerationConfig;
    use crate::scatter::context::{GenerationContext, Strategy};
    use crate::scatter::events::{GenerationEvent, GenerationEventKind, VecSink};
    use crate::scatter::intensity::ShorelineGradient;
    use crate::scatter::object::DebrisObject;
    use crate::scatter::overlap::CollisionCheck;

    fn assert_separated(objects: &[DebrisObject], config: &CategorizedConfig) {
        for j in 0..objects.len() {
            for i in 0..j {
                let (a, b) = (&objects[i], &objects[j]);
                let required = config
                    .overlap
                    .required_separation(b.footprint_radius, a.footprint_radius);
                let d = a.position_2d().distance(b.position_2d());
                assert!(d >= required - 1e-3, "objects {i} and {j}: {d} < {required}");
            }
        }
    }

    #[test]
    fn placement_order_is_rocks_logs_towels() {
        let config = GenerationConfig::default();
        let mut ctx = GenerationContext::try_new(config).expect("valid config");
        let objects = ctx.generate(Strategy::Categorized, &mut StdRng::seed_from_u64(30));

        let order: Vec<DebrisCategory> = objects.iter().map(|o| o.category).collect();
        let mut sorted = order.clone();
        sorted.sort_by_key(|c| match c {
            DebrisCategory::Rock => 0,
            DebrisCategory::Log => 1,
            _ => 2,
        });
        assert_eq!(order, sorted);
        assert!(order.contains(&DebrisCategory::Rock));
        assert!(order.contains(&DebrisCategory::Log));
        assert!(order.contains(&DebrisCategory::Towel));
    }

    #[test]
    fn every_pair_keeps_its_separation() {
        let config = GenerationConfig::default();
        let categorized = config.categorized.clone();
        let rect = categorized.bounds.resolve(config.terrain_size);
        let mut ctx = GenerationContext::try_new(config).expect("valid config");
        let objects = ctx.generate(Strategy::Categorized, &mut StdRng::seed_from_u64(31));

        assert_separated(objects, &categorized);
        for o in objects {
            assert!(rect.contains(o.position_2d()));
        }
    }

    #[test]
    fn grid_collision_matches_brute_force() {
        let brute = GenerationConfig::default();
        let mut grid = GenerationConfig::default();
        grid.categorized.collision = CollisionCheck::Grid { cell_size: 16.0 };

        let a = GenerationContext::try_new(brute)
            .expect("valid config")
            .generate(Strategy::Categorized, &mut StdRng::seed_from_u64(32))
            .to_vec();
        let b = GenerationContext::try_new(grid)
            .expect("valid config")
            .generate(Strategy::Categorized, &mut StdRng::seed_from_u64(32))
            .to_vec();
        assert_eq!(a, b);
    }

    #[test]
    fn towels_cluster_around_rocks() {
        let config = GenerationConfig::default();
        let snag = config.categorized.snag_distance;
        let towel_max = config.categorized.towel_radius.max;
        let mut ctx = GenerationContext::try_new(config).expect("valid config");
        let objects = ctx.generate(Strategy::Categorized, &mut StdRng::seed_from_u64(33));

        let rocks: Vec<_> = objects
            .iter()
            .filter(|o| o.category == DebrisCategory::Rock)
            .collect();
        for towel in objects.iter().filter(|o| o.category == DebrisCategory::Towel) {
            let p = towel.position_2d();
            assert!(rocks.iter().any(|r| {
                r.position_2d().distance(p) <= r.footprint_radius + towel_max + snag + 1e-3
            }));
        }
    }

    #[test]
    fn impossible_targets_under_produce_with_a_warning() {
        let mut config = GenerationConfig::new(100.0);
        config.categorized.rock_count = 500;
        config.categorized.rock_attempts = 300;
        let mut ctx = GenerationContext::try_new(config).expect("valid config");
        let mut sink = VecSink::only([GenerationEventKind::PhaseFinished]);
        ctx.generate_with_events(Strategy::Categorized, &mut StdRng::seed_from_u64(34), &mut sink);

        let rocks = sink.into_inner().into_iter().find_map(|e| match e {
            GenerationEvent::PhaseFinished {
                phase: "rocks",
                placed,
                requested,
            } => Some((placed, requested)),
            _ => None,
        });
        let (placed, requested) = rocks.expect("rock phase reported");
        assert_eq!(requested, Some(500));
        assert!(placed > 0 && placed < 500);
    }

    #[test]
    fn logs_favour_the_flow_channel() {
        let config = CategorizedConfig {
            logs_follow_shoreline: false,
            ..Default::default()
        };
        let model = ClusterIntensityModel::new(800.0, 720.0, ShorelineGradient::default());
        let center = log_probability(&config, &model, 800.0, Vec2::new(400.0, 300.0));
        let side = log_probability(&config, &model, 800.0, Vec2::new(700.0, 300.0));
        let edge = log_probability(&config, &model, 800.0, Vec2::new(800.0, 300.0));
        assert_eq!(center, 1.0);
        assert!(side < center);
        assert_eq!(edge, config.channel_floor);

        let shore = CategorizedConfig::default();
        assert!(
            log_probability(&shore, &model, 800.0, Vec2::new(400.0, 100.0))
                < log_probability(&shore, &model, 800.0, Vec2::new(400.0, 700.0))
        );
    }
}
