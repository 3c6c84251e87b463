//! Pure Matérn cluster process: fixed-radius disks with a fixed population.
use rand::Rng as RngCore;

use crate::scatter::config::MaternConfig;
use crate::scatter::events::RejectReason;
use crate::scatter::intensity::{ClusterCenter, ValueRange};
use crate::scatter::strategy::{disk_point, domain_point, Pass};

pub(crate) fn run(pass: &mut Pass<'_>, config: &MaternConfig, rng: &mut dyn RngCore) {
    let terrain_size = pass.config.terrain_size;
    let rect = config.bounds.resolve(terrain_size);
    let thresholds = pass.config.thresholds;
    let radius = ValueRange::fixed(config.radius);
    let member_count = ValueRange::fixed(config.member_count as f32);

    for _ in 0..config.center_count {
        let center = domain_point(terrain_size, rng);
        let Some(cluster) = pass.evaluate_center(center, rng, |_| {
            ClusterCenter::from_intensity(center, 1.0, radius, member_count)
        }) else {
            continue;
        };

        for _ in 0..cluster.member_count {
            let p = disk_point(cluster.center, cluster.radius, rng);
            pass.candidate();
            if !rect.contains(p) {
                pass.reject(p, RejectReason::OutOfBounds);
                continue;
            }

            let length = config.length.sample(rng);
            let category = thresholds.classify(config.length.normalize(length));
            let object = pass.object_with_length(p, category, length, rng);
            pass.place(object);
        }
    }

    let placed = pass.result.objects.len();
    pass.phase_finished("matern", placed, None);
}
