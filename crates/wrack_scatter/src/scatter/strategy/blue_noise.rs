//! Blue-noise sand-scale debris: one small object per Poisson-disk sample.
use rand::Rng as RngCore;

use crate::sampling::PoissonDiskSampling;
use crate::scatter::config::BlueNoiseConfig;
use crate::scatter::object::DebrisCategory;
use crate::scatter::strategy::Pass;

pub(crate) fn run(pass: &mut Pass<'_>, config: &BlueNoiseConfig, rng: &mut dyn RngCore) {
    let extent = config.extent(pass.config.terrain_size, pass.config.shoreline_y);
    let points = PoissonDiskSampling::new(config.min_distance)
        .with_max_attempts(config.max_attempts)
        .sample_points(extent, rng);

    for p in points {
        pass.candidate();
        let length = config.length.sample(rng);
        let object = pass.object_with_length(p, DebrisCategory::SmallDebris, length, rng);
        pass.place(object);
    }

    let placed = pass.result.objects.len();
    pass.phase_finished("blue_noise", placed, None);
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::scatter::config::{BlueNoiseConfig, GenerationConfig};
    use crate::scatter::context::{GenerationContext, Strategy};
    use crate::scatter::object::DebrisCategory;

    #[test]
    fn samples_become_small_debris_with_spacing() {
        let config = GenerationConfig::new(200.0).with_blue_noise(BlueNoiseConfig {
            min_distance: 8.0,
            ..Default::default()
        });
        let mut ctx = GenerationContext::try_new(config).expect("valid config");
        let objects = ctx.generate(Strategy::BlueNoise, &mut StdRng::seed_from_u64(50));

        assert!(objects.len() > 10);
        for (i, a) in objects.iter().enumerate() {
            assert_eq!(a.category, DebrisCategory::SmallDebris);
            for b in &objects[i + 1..] {
                assert!(a.position_2d().distance(b.position_2d()) >= 8.0 - 1e-4);
            }
        }
    }

    #[test]
    fn shoreline_clamp_limits_sampling_depth() {
        let config = GenerationConfig::new(200.0);
        let limit = config.shoreline_y * 0.85;
        let mut ctx = GenerationContext::try_new(config).expect("valid config");
        for o in ctx.generate(Strategy::BlueNoise, &mut StdRng::seed_from_u64(51)) {
            assert!(o.position.y < limit);
        }
    }
}
