//! Camera state consumed by the fog pass

use crate::core::types::{Vec3, Quat};

/// Per-frame snapshot of everything the fog pass needs from the camera.
///
/// The basis vectors are world-space unit vectors. Nothing here is validated:
/// `near > 0` and `aspect > 0` are the caller's responsibility.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraFrame {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Width / height
    pub aspect: f32,
    pub position: Vec3,
    pub right: Vec3,
    pub up: Vec3,
    pub forward: Vec3,
}

/// Camera with position, rotation, and projection parameters
#[derive(Clone, Debug)]
pub struct Camera {
    /// World position
    pub position: Vec3,
    /// Rotation as quaternion
    pub rotation: Quat,
    /// Vertical field of view in radians
    pub fov_y: f32,
    /// Aspect ratio (width / height)
    pub aspect: f32,
    /// Near clip plane
    pub near: f32,
    /// Far clip plane
    pub far: f32,
}

impl Camera {
    /// Create a new camera
    pub fn new(position: Vec3, fov_y_degrees: f32, aspect: f32) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            fov_y: fov_y_degrees.to_radians(),
            aspect,
            near: 0.3,
            far: 1000.0,
        }
    }

    /// Create camera looking at a target
    pub fn look_at(position: Vec3, target: Vec3, up: Vec3) -> Self {
        let forward = (target - position).normalize();
        let right = forward.cross(up).normalize();
        let up = right.cross(forward);

        let rotation = Quat::from_mat3(&glam::Mat3::from_cols(right, up, -forward));

        Self {
            position,
            rotation,
            ..Self::default()
        }
    }

    /// Get forward direction (negative Z in camera space)
    pub fn forward(&self) -> Vec3 {
        self.rotation * -Vec3::Z
    }

    /// Get right direction (positive X in camera space)
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Get up direction (positive Y in camera space)
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Set rotation from euler angles (yaw, pitch in radians)
    pub fn set_rotation_euler(&mut self, yaw: f32, pitch: f32) {
        self.rotation = Quat::from_euler(glam::EulerRot::YXZ, yaw, pitch, 0.0);
    }

    /// Update aspect ratio (call on resize)
    pub fn set_aspect(&mut self, width: f32, height: f32) {
        self.aspect = width / height;
    }

    /// Snapshot the state the fog pass reads this frame.
    pub fn frame(&self) -> CameraFrame {
        CameraFrame {
            fov_degrees: self.fov_y.to_degrees(),
            near: self.near,
            far: self.far,
            aspect: self.aspect,
            position: self.position,
            right: self.right(),
            up: self.up(),
            forward: self.forward(),
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 1.0, 5.0), 60.0, 16.0 / 9.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directions() {
        let camera = Camera::default();

        // Default camera looks down -Z
        let forward = camera.forward();
        assert!((forward.z - (-1.0)).abs() < 0.001);

        let right = camera.right();
        assert!((right.x - 1.0).abs() < 0.001);

        let up = camera.up();
        assert!((up.y - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_look_at_forward() {
        let camera = Camera::look_at(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), Vec3::Y);
        assert!((camera.forward() - Vec3::X).length() < 0.001);
        assert!((camera.up() - Vec3::Y).length() < 0.001);
    }

    #[test]
    fn test_frame_snapshot() {
        let mut camera = Camera::new(Vec3::new(1.0, 2.0, 3.0), 90.0, 2.0);
        camera.set_rotation_euler(std::f32::consts::FRAC_PI_2, 0.0);
        let frame = camera.frame();

        assert!((frame.fov_degrees - 90.0).abs() < 0.001);
        assert_eq!(frame.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(frame.aspect, 2.0);
        // Basis stays orthonormal after rotation
        assert!(frame.right.dot(frame.forward).abs() < 0.001);
        assert!(frame.up.dot(frame.forward).abs() < 0.001);
        assert!((frame.forward.length() - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_set_aspect() {
        let mut camera = Camera::default();
        camera.set_aspect(800.0, 400.0);
        assert_eq!(camera.aspect, 2.0);
    }
}
