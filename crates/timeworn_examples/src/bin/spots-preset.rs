use std::env;
use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::SeedableRng;
use timeworn::prelude::*;
use timeworn_examples::{init_tracing, load_preset, render_effect_to_png, RenderConfig};
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing();
    let path = env::args().nth(1).map(PathBuf::from).unwrap_or_else(|| {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("presets/rusted-plate.ron")
    });

    let preset = load_preset(&path)?;
    info!("Loaded preset '{}' from {}.", preset.name, path.display());

    let shape = preset.shape.to_shape();
    let mut rng = StdRng::seed_from_u64(preset.seed);
    let result = run_effect(&shape, None, &preset.effect, &mut rng)?;

    let bounds = BoundaryPolygon::from_shape(&shape, preset.effect.flatten_segments)
        .bounding_box()
        .ok_or_else(|| anyhow::anyhow!("preset shape has no edges"))?;
    let rc = RenderConfig::fit(bounds, 800, 0.05);
    render_effect_to_png(&shape, &result, &rc, format!("spots-preset-{}.png", preset.name))?;
    Ok(())
}
