use rand::rngs::StdRng;
use rand::SeedableRng;
use wrack_scatter::prelude::*;
use wrack_scatter_examples::{init_tracing, render_debris_to_png, RenderConfig};

fn main() -> anyhow::Result<()> {
    init_tracing();

    // Same terrain and seed for every strategy; only the placement rule changes.
    let mut ctx = GenerationContext::try_new(GenerationConfig::new(800.0))?;
    let render = RenderConfig::new(800);

    for strategy in Strategy::ALL {
        let mut rng = StdRng::seed_from_u64(42);
        ctx.generate(strategy, &mut rng);

        let result = ctx.result();
        tracing::info!(
            "{strategy}: {} objects, {} of {} candidates rejected",
            result.len(),
            result.candidates_rejected,
            result.candidates_evaluated
        );

        render_debris_to_png(
            ctx.height_field(),
            ctx.objects(),
            &render,
            format!("strategy-comparison-{strategy}.png"),
        )?;
    }

    Ok(())
}
