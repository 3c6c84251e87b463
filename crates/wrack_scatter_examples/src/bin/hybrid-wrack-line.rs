use rand::rngs::StdRng;
use rand::SeedableRng;
use wrack_scatter::prelude::*;
use wrack_scatter_examples::{init_tracing, render_debris_to_png, RenderConfig};

fn main() -> anyhow::Result<()> {
    init_tracing();

    // Default hybrid run: power-law clusters hugging the shoreline at y = 720.
    let config = GenerationConfig::new(800.0).with_noise_seed(7);
    let mut ctx = GenerationContext::try_new(config)?;
    let mut rng = StdRng::seed_from_u64(2025);
    ctx.generate(Strategy::Hybrid, &mut rng);

    let result = ctx.result();
    let mut counts: Vec<_> = result.count_by_category().into_iter().collect();
    counts.sort_by_key(|(category, _)| category.as_str());
    for (category, count) in counts {
        tracing::info!("{category}: {count}");
    }

    render_debris_to_png(
        ctx.height_field(),
        ctx.objects(),
        &RenderConfig::new(1024),
        "hybrid-wrack-line.png",
    )
}
