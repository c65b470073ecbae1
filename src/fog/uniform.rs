//! GPU-layout copy of one frame's fog state.

use bytemuck::{Pod, Zeroable};

use crate::fog::pass::FogFrame;
use crate::fog::program::FogProgram;

/// Fog uniform buffer, 16-byte aligned for WGSL/std140 uniforms.
///
/// `frustum_corners` rows are bottom-left, bottom-right, top-right, top-left
/// with w = 0.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct FogUniform {
    // -- Rays (64 bytes) --
    pub frustum_corners: [[f32; 4]; 4],

    // -- Camera (16 bytes) --
    pub camera_position: [f32; 3],
    pub time: f32,

    // -- Color (16 bytes) --
    pub fog_color: [f32; 4],

    // -- Height band (16 bytes) --
    pub density: f32,
    pub start: f32,
    pub end: f32,
    pub noise_amount: f32,

    // -- Noise (16 bytes) --
    pub noise_speed: [f32; 2],
    pub noise_world_scale: f32,
    /// 1 when the noise texture should be sampled.
    pub animated: u32,
}

impl FogUniform {
    pub fn new(frame: &FogFrame, program: &FogProgram) -> Self {
        let params = program.params();
        let (noise_speed, noise_amount, noise_world_scale) = match program.noise() {
            Some(n) => (n.speed.to_array(), n.amount, n.world_scale),
            None => ([0.0; 2], 0.0, 1.0),
        };

        Self {
            frustum_corners: frame.rays.rays.map(|r| r.extend(0.0).to_array()),
            camera_position: frame.camera_position.to_array(),
            time: frame.time,
            fog_color: params.color.to_array(),
            density: params.density,
            start: params.start,
            end: params.end,
            noise_amount,
            noise_speed,
            noise_world_scale,
            animated: program.is_animated() as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::camera::Camera;
    use crate::core::types::{Vec2, Vec3};
    use crate::fog::noise_pattern::NoisePattern;
    use crate::fog::params::{FogParameters, NoiseParameters};

    #[test]
    fn test_uniform_size_aligned() {
        let size = std::mem::size_of::<FogUniform>();
        assert_eq!(size, 128);
        assert_eq!(size % 16, 0, "FogUniform size {size} is not 16-byte aligned");
    }

    #[test]
    fn test_basic_uniform() {
        let camera = Camera::new(Vec3::new(0.0, 3.0, 0.0), 60.0, 1.5);
        let frame = FogFrame::new(&camera.frame(), 2.0);
        let u = FogUniform::new(&frame, &FogProgram::basic(FogParameters::default()));

        assert_eq!(u.animated, 0);
        assert_eq!(u.end, 2.0);
        assert_eq!(u.time, 2.0);
        assert_eq!(u.camera_position, [0.0, 3.0, 0.0]);
        assert_eq!(u.frustum_corners[2][..3], frame.rays.top_right().to_array());
        assert_eq!(u.frustum_corners[3][3], 0.0);

        let bytes = bytemuck::bytes_of(&u);
        assert_eq!(bytes.len(), std::mem::size_of::<FogUniform>());
    }

    #[test]
    fn test_animated_uniform() {
        let frame = FogFrame::new(&Camera::default().frame(), 0.0);
        let program = FogProgram::animated(
            FogParameters::default(),
            NoiseParameters {
                pattern: NoisePattern::from_values(1, 1, vec![0.5]).unwrap(),
                speed: Vec2::new(0.1, -0.2),
                amount: 1.5,
                world_scale: 8.0,
            },
        );
        let u = FogUniform::new(&frame, &program);
        assert_eq!(u.animated, 1);
        assert_eq!(u.noise_speed, [0.1, -0.2]);
        assert_eq!(u.noise_amount, 1.5);
        assert_eq!(u.noise_world_scale, 8.0);
    }
}
