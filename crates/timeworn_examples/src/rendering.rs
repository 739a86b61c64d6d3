use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use glam::Vec2;
use image::{Rgb, RgbImage};
use timeworn::prelude::*;
use tracing::info;
use tracing_subscriber::fmt::SubscriberBuilder;

/// Install a plain fmt subscriber. Repeated calls are ignored.
pub fn init_tracing() {
    let _ = SubscriberBuilder::default().with_target(false).try_init();
}

/// Image size, visible region and colors of a rendered effect.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub image_size: (u32, u32),
    /// Region of the document mapped onto the image.
    pub view: BoundingBox,
    pub background: [u8; 3],
    pub shape_color: [u8; 3],
    pub spot_color: [u8; 3],
    /// Line segments per cubic when filling outlines.
    pub flatten_segments: usize,
}

impl RenderConfig {
    pub fn new(image_size: (u32, u32), view: BoundingBox) -> Self {
        Self {
            image_size,
            view,
            background: [250, 248, 242],
            shape_color: [196, 186, 162],
            spot_color: [74, 58, 44],
            flatten_segments: DEFAULT_FLATTEN_SEGMENTS,
        }
    }

    /// View around `bounds` with a relative `margin`, keeping the image aspect ratio.
    pub fn fit(bounds: BoundingBox, width_px: u32, margin: f32) -> Self {
        let pad = bounds.size * margin;
        let view = BoundingBox::from_min_size(bounds.min - pad, bounds.size + pad * 2.0);
        let aspect = if view.width() > 0.0 {
            view.height() / view.width()
        } else {
            1.0
        };
        let height_px = ((width_px as f32 * aspect).round() as u32).max(1);
        Self::new((width_px, height_px), view)
    }

    pub fn with_background(mut self, color: [u8; 3]) -> Self {
        self.background = color;
        self
    }

    pub fn with_shape_color(mut self, color: [u8; 3]) -> Self {
        self.shape_color = color;
        self
    }

    pub fn with_spot_color(mut self, color: [u8; 3]) -> Self {
        self.spot_color = color;
        self
    }

    fn pixel_to_world(&self, x: u32, y: u32) -> Vec2 {
        let (w, h) = self.image_size;
        let uv = Vec2::new((x as f32 + 0.5) / w as f32, (y as f32 + 0.5) / h as f32);
        self.view.min + uv * self.view.size
    }

    fn world_to_pixel(&self, p: Vec2) -> Vec2 {
        let (w, h) = self.image_size;
        (p - self.view.min) / self.view.size * Vec2::new(w as f32, h as f32)
    }
}

/// Fill the shape and every spot outline into a PNG.
pub fn render_effect_to_png(
    shape: &PathShape,
    result: &RunResult,
    cfg: &RenderConfig,
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let (w, h) = cfg.image_size;
    let mut img = RgbImage::from_pixel(w, h, Rgb(cfg.background));

    let boundary = BoundaryPolygon::from_shape(shape, cfg.flatten_segments);
    fill_region(&mut img, cfg, &boundary, None, cfg.shape_color);

    for outline in result.outlines() {
        let polygon = BoundaryPolygon::from_points(&outline.flatten(cfg.flatten_segments));
        let Some(bounds) = polygon.bounding_box() else {
            continue;
        };
        fill_region(&mut img, cfg, &polygon, Some(bounds), cfg.spot_color);
    }

    let path = path.as_ref();
    img.save(path)?;
    info!(
        "Wrote {} ({} spots, {} dropped).",
        path.display(),
        result.placed(),
        result.dropped
    );
    Ok(())
}

fn fill_region(
    img: &mut RgbImage,
    cfg: &RenderConfig,
    mask: &BoundaryPolygon,
    bounds: Option<BoundingBox>,
    color: [u8; 3],
) {
    let (w, h) = cfg.image_size;
    let (x0, y0, x1, y1) = match bounds {
        Some(b) => {
            let lo = cfg.world_to_pixel(b.min).floor().max(Vec2::ZERO);
            let hi = cfg.world_to_pixel(b.max()).ceil();
            if hi.x < 0.0 || hi.y < 0.0 {
                return;
            }
            (
                lo.x as u32,
                lo.y as u32,
                (hi.x as u32).min(w),
                (hi.y as u32).min(h),
            )
        }
        None => (0, 0, w, h),
    };
    for y in y0..y1 {
        for x in x0..x1 {
            if mask.contains(cfg.pixel_to_world(x, y)) {
                img.put_pixel(x, y, Rgb(color));
            }
        }
    }
}

/// SVG path data for every contour of `shape`, cubic segments included.
pub fn shape_to_svg_path_data(shape: &PathShape) -> String {
    shape
        .contours
        .iter()
        .filter_map(|contour| {
            let first = contour.anchors.first()?;
            let mut commands = vec![PathCommand::MoveTo(first.point)];
            commands.extend(
                contour
                    .segments()
                    .map(|[_, c1, c2, p]| PathCommand::CubicTo(c1, c2, p)),
            );
            commands.push(PathCommand::Close);
            Some(Outline::from_commands(commands).to_svg_path_data())
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Write the shape and the spot outlines as an SVG document.
pub fn render_effect_to_svg(
    shape: &PathShape,
    result: &RunResult,
    cfg: &RenderConfig,
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let hex = |c: [u8; 3]| format!("#{:02x}{:02x}{:02x}", c[0], c[1], c[2]);
    let v = cfg.view;
    let mut svg = String::new();
    writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="{} {} {} {}">"#,
        cfg.image_size.0,
        cfg.image_size.1,
        v.min.x,
        v.min.y,
        v.width(),
        v.height()
    )?;
    writeln!(
        svg,
        r#"  <rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
        v.min.x,
        v.min.y,
        v.width(),
        v.height(),
        hex(cfg.background)
    )?;
    writeln!(
        svg,
        r#"  <path d="{}" fill="{}" fill-rule="evenodd"/>"#,
        shape_to_svg_path_data(shape),
        hex(cfg.shape_color)
    )?;
    writeln!(svg, r#"  <g fill="{}">"#, hex(cfg.spot_color))?;
    for outline in result.outlines() {
        writeln!(svg, r#"    <path d="{}"/>"#, outline.to_svg_path_data())?;
    }
    writeln!(svg, "  </g>\n</svg>")?;

    let path = path.as_ref();
    fs::write(path, svg)?;
    info!("Wrote {}.", path.display());
    Ok(())
}
