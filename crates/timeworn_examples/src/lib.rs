#![forbid(unsafe_code)]

mod presets;
mod rendering;
mod shapes;

pub use presets::{load_preset, Preset, ShapePreset};
pub use rendering::{
    init_tracing, render_effect_to_png, render_effect_to_svg, shape_to_svg_path_data,
    RenderConfig,
};
pub use shapes::{circle_contour, lobed_blob, ring};
