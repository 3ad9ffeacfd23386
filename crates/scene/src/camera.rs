//! Camera model: projection kind, matrices, and unprojection.

use glam::{Mat4, Vec3};

/// Camera projection. The pointer engine can resolve screen-space rays for
/// perspective and orthographic projections; `Custom` carries an opaque
/// matrix for hosts with exotic projections (ray resolution reports those as
/// unsupported and keeps the previous ray).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// Standard perspective projection.
    Perspective {
        /// Vertical field of view in radians.
        fov_y: f32,
        /// Width over height.
        aspect: f32,
        /// Near plane distance.
        near: f32,
        /// Far plane distance.
        far: f32,
    },
    /// Orthographic projection with explicit frustum planes.
    Orthographic {
        /// Left frustum plane.
        left: f32,
        /// Right frustum plane.
        right: f32,
        /// Bottom frustum plane.
        bottom: f32,
        /// Top frustum plane.
        top: f32,
        /// Near plane distance.
        near: f32,
        /// Far plane distance.
        far: f32,
    },
    /// An opaque projection matrix the engine cannot classify.
    Custom {
        /// Raw clip-from-view matrix.
        matrix: Mat4,
    },
}

impl Projection {
    /// Near/far plane distances, when the projection exposes them.
    pub fn near_far(&self) -> Option<(f32, f32)> {
        match *self {
            Self::Perspective { near, far, .. } | Self::Orthographic { near, far, .. } => {
                Some((near, far))
            }
            Self::Custom { .. } => None,
        }
    }
}

/// A camera: projection plus world transform (camera-to-world).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Projection kind and parameters.
    pub projection: Projection,
    /// Camera-to-world transform.
    pub world: Mat4,
}

impl Camera {
    /// Perspective camera.
    pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32, world: Mat4) -> Self {
        Self {
            projection: Projection::Perspective {
                fov_y,
                aspect,
                near,
                far,
            },
            world,
        }
    }

    /// Orthographic camera with a symmetric `width` x `height` frustum.
    pub fn orthographic(width: f32, height: f32, near: f32, far: f32, world: Mat4) -> Self {
        Self {
            projection: Projection::Orthographic {
                left: -width / 2.0,
                right: width / 2.0,
                bottom: -height / 2.0,
                top: height / 2.0,
                near,
                far,
            },
            world,
        }
    }

    /// Camera with an opaque projection matrix.
    pub fn custom(matrix: Mat4, world: Mat4) -> Self {
        Self {
            projection: Projection::Custom { matrix },
            world,
        }
    }

    /// Clip-from-view matrix (GL clip conventions, matching the NDC cube
    /// used by [`Camera::unproject_ndc`]).
    pub fn projection_matrix(&self) -> Mat4 {
        match self.projection {
            Projection::Perspective {
                fov_y,
                aspect,
                near,
                far,
            } => Mat4::perspective_rh_gl(fov_y, aspect, near, far),
            Projection::Orthographic {
                left,
                right,
                bottom,
                top,
                near,
                far,
            } => Mat4::orthographic_rh_gl(left, right, bottom, top, near, far),
            Projection::Custom { matrix } => matrix,
        }
    }

    /// View matrix (world-to-camera).
    pub fn view_matrix(&self) -> Mat4 {
        self.world.inverse()
    }

    /// Camera position in world space.
    pub fn world_position(&self) -> Vec3 {
        self.world.transform_point3(Vec3::ZERO)
    }

    /// Camera forward axis (-Z) in world space.
    pub fn world_forward(&self) -> Vec3 {
        self.world.transform_vector3(Vec3::NEG_Z).normalize()
    }

    /// Map a point in normalized device coordinates back to world space.
    pub fn unproject_ndc(&self, ndc: Vec3) -> Vec3 {
        (self.projection_matrix() * self.view_matrix())
            .inverse()
            .project_point3(ndc)
    }
}

impl Default for Camera {
    /// A 4:3 perspective camera at the world origin looking down -Z.
    fn default() -> Self {
        Self::perspective(
            std::f32::consts::FRAC_PI_4,
            4.0 / 3.0,
            0.1,
            1000.0,
            Mat4::IDENTITY,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unproject_center_lands_on_camera_axis() {
        let camera = Camera::default();
        let point = camera.unproject_ndc(Vec3::new(0.0, 0.0, 0.5));
        assert!(point.x.abs() < 1e-4);
        assert!(point.y.abs() < 1e-4);
        assert!(point.z < 0.0, "in front of a -Z looking camera");
    }

    #[test]
    fn world_forward_follows_transform() {
        let world = Mat4::from_rotation_y(std::f32::consts::FRAC_PI_2);
        let camera = Camera::perspective(1.0, 1.0, 0.1, 100.0, world);
        // Rotating +90 degrees about Y turns -Z into -X.
        assert!((camera.world_forward() - Vec3::NEG_X).length() < 1e-5);
    }

    #[test]
    fn orthographic_frustum_is_symmetric() {
        let camera = Camera::orthographic(2.0, 2.0, 1.0, 1000.0, Mat4::IDENTITY);
        match camera.projection {
            Projection::Orthographic {
                left, right, top, ..
            } => {
                assert_eq!(left, -1.0);
                assert_eq!(right, 1.0);
                assert_eq!(top, 1.0);
            }
            _ => panic!("expected orthographic projection"),
        }
    }
}
