#![allow(dead_code)]

use std::time::Duration;

use criterion::{Criterion, Throughput};
use rand::rngs::StdRng;
use rand::SeedableRng;
use wrack_scatter::prelude::{CollisionCheck, GenerationConfig, GenerationContext};

/// Side of the reference wrack-line terrain.
pub const REFERENCE_TERRAIN: f32 = 800.0;
/// Side of the terrain used to check how passes scale with area.
pub const LARGE_TERRAIN: f32 = 2048.0;

/// Full generation passes take tens of milliseconds; keep sample counts low.
pub fn scatter_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(20)
        .warm_up_time(Duration::from_secs(1))
        .measurement_time(Duration::from_secs(3))
        .noise_threshold(0.03)
}

/// Objects or points produced per iteration; criterion rejects a zero count.
pub fn object_throughput(count: usize) -> Throughput {
    Throughput::Elements(count.max(1) as u64)
}

/// Deterministic RNG for a benchmark, mixed with a per-case salt.
pub fn bench_rng(salt: u64) -> StdRng {
    StdRng::seed_from_u64(0x5CA7_7E12_u64 ^ salt)
}

/// Validated context; benchmark configs are fixed, so a rejection is a bug in the bench.
pub fn context(config: GenerationConfig) -> GenerationContext {
    match GenerationContext::try_new(config) {
        Ok(ctx) => ctx,
        Err(e) => panic!("invalid benchmark config: {e}"),
    }
}

/// Reference terrain with ten times the default rock count, stressing overlap rejection.
pub fn crowded_rocks(collision: CollisionCheck) -> GenerationConfig {
    let mut config = GenerationConfig::new(REFERENCE_TERRAIN);
    config.categorized.collision = collision;
    config.categorized.rock_count = 400;
    config.categorized.rock_attempts = 40_000;
    config
}
