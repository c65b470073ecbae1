//! Serializable fog settings.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::error::Error;
use crate::core::types::{Result, Vec2, Vec4};
use crate::fog::params::{FogParameters, DEFAULT_FOG_COLOR};

pub const DENSITY_RANGE: (f32, f32) = (0.0, 3.0);
pub const SPEED_RANGE: (f32, f32) = (-0.5, 0.5);
pub const NOISE_AMOUNT_RANGE: (f32, f32) = (0.0, 3.0);

/// User-facing fog configuration.
///
/// `start < end` is the intended usage but is not enforced.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FogSettings {
    /// Blend multiplier (0-3).
    pub density: f32,
    /// World Y where fog is thickest.
    pub start: f32,
    /// World Y above which fog vanishes.
    pub end: f32,
    /// Linear RGBA fog color.
    pub color: [f32; 4],
    /// Animated noise. `None` selects the basic variant.
    pub noise: Option<NoiseSettings>,
}

impl Default for FogSettings {
    fn default() -> Self {
        Self {
            density: 1.0,
            start: 0.0,
            end: 2.0,
            color: DEFAULT_FOG_COLOR,
            noise: None,
        }
    }
}

/// Animated noise configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseSettings {
    /// Scroll speed along world X (-0.5..0.5 tiles per second).
    pub x_speed: f32,
    /// Scroll speed along world Z (-0.5..0.5 tiles per second).
    pub z_speed: f32,
    /// Strength of the perturbation (0-3).
    pub amount: f32,
    /// World units per noise tile.
    pub world_scale: f32,
    pub source: NoiseSource,
}

impl Default for NoiseSettings {
    fn default() -> Self {
        Self {
            x_speed: 0.1,
            z_speed: 0.1,
            amount: 1.0,
            world_scale: 10.0,
            source: NoiseSource::default(),
        }
    }
}

/// Where the noise pattern comes from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NoiseSource {
    /// Tileable fractal Perlin noise generated at load time.
    Procedural {
        seed: u32,
        size: u32,
        frequency: f32,
        octaves: u32,
    },
    /// Grayscale image; relative paths resolve against the settings file.
    Image { path: PathBuf },
}

impl Default for NoiseSource {
    fn default() -> Self {
        Self::Procedural {
            seed: 12345,
            size: 128,
            frequency: 4.0,
            octaves: 4,
        }
    }
}

fn clamp_logged(name: &str, value: f32, (min, max): (f32, f32)) -> f32 {
    let clamped = value.clamp(min, max);
    if clamped != value {
        log::warn!("Fog {} {} outside [{}, {}], clamped to {}", name, value, min, max, clamped);
    }
    clamped
}

impl FogSettings {
    /// Clamp tunables to their editor ranges, warning about each change.
    pub fn clamped(mut self) -> Self {
        self.density = clamp_logged("density", self.density, DENSITY_RANGE);
        if let Some(noise) = self.noise.as_mut() {
            noise.x_speed = clamp_logged("x_speed", noise.x_speed, SPEED_RANGE);
            noise.z_speed = clamp_logged("z_speed", noise.z_speed, SPEED_RANGE);
            noise.amount = clamp_logged("noise amount", noise.amount, NOISE_AMOUNT_RANGE);
        }
        self
    }

    /// The parameters shared by both variants.
    pub fn parameters(&self) -> FogParameters {
        FogParameters {
            density: self.density,
            start: self.start,
            end: self.end,
            color: Vec4::from_array(self.color),
        }
    }

    /// Save as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| Error::Config(e.to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load from JSON, clamp to editor ranges and resolve a relative noise
    /// image path against the file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let mut settings: Self = serde_json::from_str(&json)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;

        if let Some(NoiseSource::Image { path: image_path }) =
            settings.noise.as_mut().map(|n| &mut n.source)
        {
            if image_path.is_relative() {
                if let Some(dir) = path.parent() {
                    *image_path = dir.join(&*image_path);
                }
            }
        }

        Ok(settings.clamped())
    }
}

impl NoiseSettings {
    #[inline]
    pub fn speed(&self) -> Vec2 {
        Vec2::new(self.x_speed, self.z_speed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_component() {
        let s = FogSettings::default();
        let p = s.parameters();
        assert_eq!(p.density, 1.0);
        assert_eq!(p.start, 0.0);
        assert_eq!(p.end, 2.0);
        assert!((p.color.x - 130.0 / 255.0).abs() < 1e-6);
        assert_eq!(p.color.w, 1.0);
        assert!(s.noise.is_none());
    }

    #[test]
    fn test_clamped() {
        let s = FogSettings {
            density: 5.0,
            noise: Some(NoiseSettings {
                x_speed: -2.0,
                z_speed: 0.25,
                amount: -1.0,
                ..Default::default()
            }),
            ..Default::default()
        }
        .clamped();

        assert_eq!(s.density, 3.0);
        let noise = s.noise.unwrap();
        assert_eq!(noise.x_speed, -0.5);
        assert_eq!(noise.z_speed, 0.25);
        assert_eq!(noise.amount, 0.0);
    }

    #[test]
    fn test_start_end_not_reordered() {
        let s = FogSettings { start: 5.0, end: 1.0, ..Default::default() }.clamped();
        assert_eq!((s.start, s.end), (5.0, 1.0));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let s: FogSettings = serde_json::from_str(r#"{ "end": 8.0, "noise": { "amount": 2.0 } }"#).unwrap();
        assert_eq!(s.end, 8.0);
        assert_eq!(s.density, 1.0);
        let noise = s.noise.unwrap();
        assert_eq!(noise.amount, 2.0);
        assert_eq!(noise.source, NoiseSource::default());
    }

    #[test]
    fn test_save_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg/fog.json");
        let s = FogSettings {
            density: 1.5,
            start: -1.0,
            end: 4.0,
            color: [0.1, 0.2, 0.3, 1.0],
            noise: Some(NoiseSettings {
                source: NoiseSource::Image { path: "noise.png".into() },
                ..Default::default()
            }),
        };
        s.save(&path).unwrap();

        let loaded = FogSettings::load(&path).unwrap();
        assert_eq!(loaded.density, 1.5);
        assert_eq!(loaded.color, [0.1, 0.2, 0.3, 1.0]);
        match loaded.noise.unwrap().source {
            NoiseSource::Image { path: p } => assert_eq!(p, dir.path().join("cfg/noise.png")),
            other => panic!("unexpected source {other:?}"),
        }
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(FogSettings::load(&path), Err(Error::Config(_))));
    }
}
