use rand::rngs::StdRng;
use rand::SeedableRng;
use wrack_scatter::prelude::*;
use wrack_scatter_examples::{init_tracing, render_debris_to_png, RenderConfig};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let blue_noise = BlueNoiseConfig {
        min_distance: 10.0,
        max_attempts: 30,
        ..Default::default()
    };
    let clamped = GenerationConfig::new(800.0)
        .with_shoreline_y(720.0)
        .with_blue_noise(blue_noise.clone());
    let unclamped = clamped.clone().with_blue_noise(BlueNoiseConfig {
        shoreline_fraction: None,
        ..blue_noise
    });

    for (name, config) in [("clamped", clamped), ("unclamped", unclamped)] {
        let mut ctx = GenerationContext::try_new(config)?;
        ctx.generate(Strategy::BlueNoise, &mut StdRng::seed_from_u64(10));
        render_debris_to_png(
            ctx.height_field(),
            ctx.objects(),
            &RenderConfig::new(800),
            format!("blue-noise-shoreline-{name}.png"),
        )?;
    }

    Ok(())
}
