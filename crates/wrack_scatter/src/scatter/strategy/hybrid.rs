//! Hybrid Matérn + power-law process.
//!
//! Each accepted center draws a cluster intensity that scales both the disk radius and the
//! member count; each member then draws its own size intensity. The two power laws compound,
//! giving a few large dense wrack piles among many sparse scatterings of small debris.
use rand::Rng as RngCore;

use crate::scatter::config::HybridConfig;
use crate::scatter::events::RejectReason;
use crate::scatter::intensity::ClusterCenter;
use crate::scatter::strategy::{disk_point, domain_point, Pass};

pub(crate) fn run(pass: &mut Pass<'_>, config: &HybridConfig, rng: &mut dyn RngCore) {
    let terrain_size = pass.config.terrain_size;
    let rect = config.bounds.resolve(terrain_size);
    let model = pass.model;
    let thresholds = pass.config.thresholds;

    for _ in 0..config.center_count {
        let center = domain_point(terrain_size, rng);
        let Some(cluster) = pass.evaluate_center(center, rng, |rng| {
            let intensity = model.draw_intensity(config.cluster_law, rng);
            ClusterCenter::from_intensity(center, intensity, config.radius, config.member_count)
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

            let size_intensity = model.draw_intensity(config.size_law, rng);
            let category = thresholds.classify(size_intensity);
            let length = config.length.lerp(size_intensity);
            let object = pass.object_with_length(p, category, length, rng);
            pass.place(object);
        }
    }

    let placed = pass.result.objects.len();
    pass.phase_finished("hybrid", placed, None);
}
