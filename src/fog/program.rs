//! The compositing resource: settings resolved into ready-to-shade state.

use crate::core::error::Error;
use crate::core::types::Result;
use crate::fog::config::{FogSettings, NoiseSettings, NoiseSource};
use crate::fog::noise_pattern::NoisePattern;
use crate::fog::params::{FogParameters, NoiseParameters};

/// Everything the per-pixel shading needs besides the frame inputs.
///
/// Hosts build one of these up front. If building fails they pass `None` to
/// the fog pass, which then copies the source through unchanged.
#[derive(Clone, Debug)]
pub struct FogProgram {
    params: FogParameters,
    noise: Option<NoiseParameters>,
}

impl FogProgram {
    /// Plain height fog.
    pub fn basic(params: FogParameters) -> Self {
        Self { params, noise: None }
    }

    /// Height fog perturbed by scrolling noise.
    pub fn animated(params: FogParameters, noise: NoiseParameters) -> Self {
        Self {
            params,
            noise: Some(noise),
        }
    }

    /// Resolve settings, generating or loading the noise pattern if needed.
    pub fn build(settings: &FogSettings) -> Result<Self> {
        let params = settings.parameters();
        let program = match &settings.noise {
            None => Self::basic(params),
            Some(noise) => Self::animated(params, resolve_noise(noise)?),
        };

        log::info!(
            "Fog program ready: density {:.2}, band {:.2}..{:.2}, {}",
            params.density,
            params.start,
            params.end,
            if program.is_animated() { "animated" } else { "basic" },
        );
        Ok(program)
    }

    #[inline]
    pub fn params(&self) -> &FogParameters {
        &self.params
    }

    #[inline]
    pub fn noise(&self) -> Option<&NoiseParameters> {
        self.noise.as_ref()
    }

    #[inline]
    pub fn is_animated(&self) -> bool {
        self.noise.is_some()
    }
}

fn resolve_noise(settings: &NoiseSettings) -> Result<NoiseParameters> {
    if !settings.world_scale.is_finite() || settings.world_scale <= 0.0 {
        return Err(Error::InvalidNoise(format!(
            "world_scale must be positive, got {}",
            settings.world_scale
        )));
    }

    let pattern = match &settings.source {
        NoiseSource::Procedural { seed, size, frequency, octaves } => {
            let start = std::time::Instant::now();
            let pattern = NoisePattern::procedural(*size, *seed, *frequency, *octaves)?;
            log::debug!("Generated {}x{} fog noise in {:.1}ms",
                size, size, start.elapsed().as_secs_f64() * 1000.0);
            pattern
        }
        NoiseSource::Image { path } => {
            let pattern = NoisePattern::from_image(path)?;
            log::debug!("Loaded {}x{} fog noise from {}",
                pattern.width(), pattern.height(), path.display());
            pattern
        }
    };

    Ok(NoiseParameters {
        pattern,
        speed: settings.speed(),
        amount: settings.amount,
        world_scale: settings.world_scale,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_basic() {
        let program = FogProgram::build(&FogSettings::default()).unwrap();
        assert!(!program.is_animated());
        assert_eq!(program.params().end, 2.0);
    }

    #[test]
    fn test_build_procedural() {
        let settings = FogSettings {
            noise: Some(NoiseSettings {
                x_speed: 0.2,
                z_speed: -0.3,
                source: NoiseSource::Procedural { seed: 1, size: 16, frequency: 4.0, octaves: 2 },
                ..Default::default()
            }),
            ..Default::default()
        };
        let program = FogProgram::build(&settings).unwrap();
        let noise = program.noise().unwrap();
        assert_eq!(noise.pattern.width(), 16);
        assert_eq!(noise.speed, crate::core::types::Vec2::new(0.2, -0.3));
    }

    #[test]
    fn test_build_missing_image_fails() {
        let settings = FogSettings {
            noise: Some(NoiseSettings {
                source: NoiseSource::Image { path: "/nonexistent/fog_noise.png".into() },
                ..Default::default()
            }),
            ..Default::default()
        };
        let err = FogProgram::build(&settings).unwrap_err();
        assert!(matches!(err, Error::Image(_)));
    }

    #[test]
    fn test_build_empty_procedural_fails() {
        let settings = FogSettings {
            noise: Some(NoiseSettings {
                source: NoiseSource::Procedural { seed: 1, size: 0, frequency: 4.0, octaves: 2 },
                ..Default::default()
            }),
            ..Default::default()
        };
        assert!(matches!(FogProgram::build(&settings), Err(Error::InvalidNoise(_))));
    }

    #[test]
    fn test_build_rejects_degenerate_world_scale() {
        for world_scale in [0.0, -4.0, f32::INFINITY, f32::NAN] {
            let settings = FogSettings {
                noise: Some(NoiseSettings {
                    world_scale,
                    source: NoiseSource::Procedural { seed: 1, size: 8, frequency: 2.0, octaves: 1 },
                    ..Default::default()
                }),
                ..Default::default()
            }
            .clamped();
            assert!(
                matches!(FogProgram::build(&settings), Err(Error::InvalidNoise(_))),
                "world_scale {world_scale} accepted"
            );
        }
    }
}
