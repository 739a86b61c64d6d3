use std::fs;
use std::path::Path;

use anyhow::Context;
use glam::Vec2;
use serde::Deserialize;
use timeworn::prelude::{EffectConfig, PathShape};

use crate::shapes::{lobed_blob, ring};

/// Shape description used by preset files.
#[derive(Debug, Clone, Deserialize)]
pub enum ShapePreset {
    Rectangle {
        min: (f32, f32),
        size: (f32, f32),
    },
    Ring {
        center: (f32, f32),
        outer: f32,
        inner: f32,
    },
    Blob {
        center: (f32, f32),
        radius: f32,
        lobes: usize,
        #[serde(default = "default_depth")]
        depth: f32,
    },
}

fn default_depth() -> f32 {
    0.25
}

impl ShapePreset {
    pub fn to_shape(&self) -> PathShape {
        match *self {
            ShapePreset::Rectangle { min, size } => PathShape::rectangle(min, size),
            ShapePreset::Ring {
                center,
                outer,
                inner,
            } => ring(Vec2::from(center), outer, inner),
            ShapePreset::Blob {
                center,
                radius,
                lobes,
                depth,
            } => lobed_blob(Vec2::from(center), radius, lobes, depth),
        }
    }
}

/// A complete, reproducible run read from a RON file.
#[derive(Debug, Clone, Deserialize)]
pub struct Preset {
    pub name: String,
    pub seed: u64,
    pub shape: ShapePreset,
    /// Missing fields fall back to [`EffectConfig::default`].
    #[serde(default)]
    pub effect: EffectConfig,
}

pub fn load_preset(path: impl AsRef<Path>) -> anyhow::Result<Preset> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read preset {}", path.display()))?;
    let preset: Preset = ron::from_str(&text)
        .with_context(|| format!("failed to parse preset {}", path.display()))?;
    preset
        .effect
        .validate()
        .with_context(|| format!("preset '{}' has an invalid effect", preset.name))?;
    Ok(preset)
}
