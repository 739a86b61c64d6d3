use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use timeworn::prelude::*;
use timeworn_examples::{init_tracing, render_effect_to_png, ring, RenderConfig};
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing();
    let center = Vec2::splat(100.0);
    // Outer disk plus a hole; the even-odd rule keeps spots out of the hole.
    let shape = ring(center, 95.0, 45.0);

    let config = EffectConfig::new(600)
        .with_size_range(1.5, 5.0)
        .with_shape_mode(ShapeMode::Angular)
        .with_irregularity(0.6)
        .with_clustering(0.85, 7);

    let mut stats = VecSink::only([
        EffectEventKind::GridBuilt,
        EffectEventKind::ClustersSeeded,
        EffectEventKind::Warning,
    ]);

    let runner = EffectRunner::try_new(config)?;
    let mut rng = StdRng::seed_from_u64(7);
    let result = runner.run_with_events(&shape, None, &mut rng, &mut stats)?;
    for event in stats.as_slice() {
        info!("{event:?}");
    }
    info!(
        "{} clustered, {} uniform, {} dropped.",
        result.clustered, result.uniform, result.dropped
    );

    let bounds = BoundingBox::from_min_size(Vec2::new(5.0, 5.0), Vec2::splat(190.0));
    let rc = RenderConfig::fit(bounds, 800, 0.04)
        .with_background([24, 26, 30])
        .with_shape_color([70, 92, 110])
        .with_spot_color([214, 160, 90]);
    render_effect_to_png(&shape, &result, &rc, "spots-ring-clustered.png")?;
    Ok(())
}
