//! Contract the wall renderer consumes from the hosting level
//!
//! The level owns the camera, the scene lighting, and the ball. The walls
//! only read from it once per frame when filling their uniform buffer.

use glam::{Mat4, Vec3};

/// View and projection matrices for the arena camera.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub view: Mat4,
    pub projection: Mat4,
}

impl Camera {
    /// Perspective camera looking at `target` from `eye`.
    pub fn look_at(eye: Vec3, target: Vec3, aspect: f32) -> Self {
        Self {
            view: Mat4::look_at_rh(eye, target, Vec3::Y),
            projection: Mat4::perspective_rh(60f32.to_radians(), aspect, 0.1, 100.0),
        }
    }
}

/// What the walls need to know about the level each frame.
pub trait Level {
    fn camera(&self) -> &Camera;

    /// Direction of the scene's directional light, in world space.
    fn light_dir(&self) -> Vec3;

    /// Current ball position; used as the point-light source so the walls
    /// pick up a glow when the ball passes close to them.
    fn ball_position(&self) -> Vec3;

    /// Normal transform for the given model matrix.
    fn normal_matrix(&self, model: Mat4) -> Mat4 {
        model.inverse().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubLevel {
        camera: Camera,
    }

    impl Level for StubLevel {
        fn camera(&self) -> &Camera {
            &self.camera
        }
        fn light_dir(&self) -> Vec3 {
            Vec3::new(0.0, -1.0, 0.0)
        }
        fn ball_position(&self) -> Vec3 {
            Vec3::ZERO
        }
    }

    #[test]
    fn test_normal_matrix_identity() {
        let level = StubLevel {
            camera: Camera::look_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, 1.0),
        };
        let n = level.normal_matrix(Mat4::IDENTITY);
        assert!(n.abs_diff_eq(Mat4::IDENTITY, 1e-6));
    }

    #[test]
    fn test_normal_matrix_uniform_scale_preserves_direction() {
        let level = StubLevel {
            camera: Camera::look_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, 1.0),
        };
        let n = level.normal_matrix(Mat4::from_scale(Vec3::splat(2.0)));
        let v = n.transform_vector3(Vec3::X).normalize();
        assert!(v.abs_diff_eq(Vec3::X, 1e-6));
    }

    #[test]
    fn test_look_at_faces_target() {
        let camera = Camera::look_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, 16.0 / 9.0);
        // Target ends up in front of the camera (negative view-space z).
        let target_view = camera.view.transform_point3(Vec3::ZERO);
        assert!(target_view.z < 0.0);
    }
}
