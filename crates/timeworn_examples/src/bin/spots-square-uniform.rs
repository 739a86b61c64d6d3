use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use timeworn::prelude::*;
use timeworn_examples::{init_tracing, render_effect_to_png, render_effect_to_svg, RenderConfig};

fn main() -> anyhow::Result<()> {
    init_tracing();
    let shape = PathShape::rectangle(Vec2::ZERO, Vec2::new(200.0, 200.0));

    // No clustering: every spot comes from the coverage-weighted grid.
    let config = EffectConfig::new(400)
        .with_size_range(2.0, 7.0)
        .with_irregularity(0.4)
        .with_clustering(0.0, 0);

    let runner = EffectRunner::try_new(config)?;
    let mut rng = StdRng::seed_from_u64(2025);
    let mut dropped = Vec::new();
    let result = {
        let mut sink = FnSink::new(|event| {
            if let EffectEvent::SpotDropped { index } = event {
                dropped.push(index);
            }
        });
        runner.run_with_events(&shape, None, &mut rng, &mut sink)?
    };
    if !dropped.is_empty() {
        tracing::warn!("Dropped spot requests: {dropped:?}");
    }

    let bounds = BoundingBox::from_min_size(Vec2::ZERO, Vec2::new(200.0, 200.0));
    let rc = RenderConfig::fit(bounds, 800, 0.05);
    render_effect_to_png(&shape, &result, &rc, "spots-square-uniform.png")?;
    render_effect_to_svg(&shape, &result, &rc, "spots-square-uniform.svg")?;
    Ok(())
}
