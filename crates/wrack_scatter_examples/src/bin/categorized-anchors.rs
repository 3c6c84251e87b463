use rand::rngs::StdRng;
use rand::SeedableRng;
use wrack_scatter::prelude::*;
use wrack_scatter_examples::{init_tracing, render_debris_to_png, RenderConfig};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let mut config = GenerationConfig::new(800.0);
    config.categorized.rock_count = 80;
    config.categorized.rock_attempts = 8_000;
    config.categorized.collision = CollisionCheck::Grid { cell_size: 16.0 };

    let mut ctx = GenerationContext::try_new(config)?;
    let mut rng = StdRng::seed_from_u64(7);

    // Per-phase placed/requested counts.
    let mut sink = FnSink::new(|event: GenerationEvent| {
        if let GenerationEvent::PhaseFinished {
            phase,
            placed,
            requested,
        } = event
        {
            match requested {
                Some(requested) => println!("{phase}: {placed}/{requested}"),
                None => println!("{phase}: {placed}"),
            }
        }
    });
    ctx.generate_with_events(Strategy::Categorized, &mut rng, &mut sink);

    render_debris_to_png(
        ctx.height_field(),
        ctx.objects(),
        &RenderConfig::new(1024),
        "categorized-anchors.png",
    )
}
