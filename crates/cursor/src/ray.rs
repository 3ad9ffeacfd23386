//! Ray source resolution: screen-space pointer positions and attached
//! entity transforms, each producing the world-space ray handed to the
//! raycaster.

use glam::{Vec2, Vec3};
use pointcast_core::{EntityId, Ray, SurfaceRect};
use pointcast_scene::{Camera, Projection, Scene};
use tracing::warn;

/// Computes and stores the engine's current ray.
///
/// The resolver is the only writer of the ray. When a resolution cannot be
/// performed (surface not ready, unsupported projection) the previous ray is
/// retained and the next pointer move or tick supersedes it.
#[derive(Debug, Default)]
pub struct RayResolver {
    current: Ray,
}

impl RayResolver {
    /// Create a resolver holding the rest-pose ray.
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently resolved ray.
    pub fn current(&self) -> Ray {
        self.current
    }

    /// Resolve a ray from a screen-space pointer position.
    ///
    /// Returns the new ray, or `None` when this update was skipped: empty
    /// bounds mean the surface is not ready yet, and a `Custom` projection is
    /// a reported configuration error (unsupported camera). In both cases the
    /// prior ray is kept.
    pub fn resolve_screen(
        &mut self,
        position: Vec2,
        bounds: SurfaceRect,
        camera: &Camera,
    ) -> Option<Ray> {
        if bounds.is_empty() {
            return None;
        }
        let ndc = bounds.to_ndc(position);

        let ray = match camera.projection {
            Projection::Perspective { .. } => {
                let origin = camera.world_position();
                // Unproject a point midway into the frustum; any depth picks
                // the same ray through the pixel.
                let through = camera.unproject_ndc(Vec3::new(ndc.x, ndc.y, 0.5));
                Ray::new(origin, through - origin)
            }
            Projection::Orthographic { near, far, .. } => {
                // Origin in the plane of the camera, direction along its
                // forward axis.
                let z = (near + far) / (near - far);
                let origin = camera.unproject_ndc(Vec3::new(ndc.x, ndc.y, z));
                Ray::new(origin, camera.world_forward())
            }
            Projection::Custom { .. } => {
                warn!("unsupported camera projection for ray resolution; keeping previous ray");
                return None;
            }
        };

        self.current = ray;
        Some(ray)
    }

    /// Resolve the ray rigidly attached to `entity`'s world transform.
    ///
    /// Returns `None` (prior ray kept) when the entity no longer exists.
    pub fn resolve_attached(&mut self, scene: &Scene, entity: EntityId) -> Option<Ray> {
        let ray = scene.world_ray(entity)?;
        self.current = ray;
        Some(ray)
    }
}
