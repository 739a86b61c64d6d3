use glam::Vec2;
use timeworn::prelude::*;
use timeworn_examples::{
    init_tracing, lobed_blob, render_effect_to_png, render_effect_to_svg, RenderConfig,
};

fn main() -> anyhow::Result<()> {
    init_tracing();
    let shape = lobed_blob(Vec2::ZERO, 120.0, 5, 0.22);

    // Long streaks leaning at 30 degrees, half blobs and half fragments.
    let config = EffectConfig::new(1500)
        .with_size_range(1.0, 4.5)
        .with_shape_mode(ShapeMode::Mixed)
        .with_elongation(2.6, 0.2)
        .with_elongation_angle(30.0_f32.to_radians(), 0.08)
        .with_clustering(0.35, 9);

    let result = run_sharded(&shape, None, &config, 0x7135_0A11, 4)?;

    let bounds = BoundaryPolygon::from_shape(&shape, config.flatten_segments)
        .bounding_box()
        .ok_or_else(|| anyhow::anyhow!("blob has no edges"))?;
    let rc = RenderConfig::fit(bounds, 900, 0.05);
    render_effect_to_png(&shape, &result, &rc, "spots-mixed-elongated.png")?;
    render_effect_to_svg(&shape, &result, &rc, "spots-mixed-elongated.svg")?;
    Ok(())
}
