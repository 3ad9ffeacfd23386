//! Rays and raycast hit records.

use crate::EntityId;
use glam::Vec3;

/// A world-space ray: origin plus normalized direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// World-space origin of the ray.
    pub origin: Vec3,
    /// World-space direction, unit length.
    pub direction: Vec3,
}

impl Ray {
    /// Build a ray, normalizing `direction`.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point at parametric distance `t` along the ray.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

impl Default for Ray {
    /// A ray at the world origin pointing down -Z (the rest pose of an
    /// attached pointer before its first transform update).
    fn default() -> Self {
        Self {
            origin: Vec3::ZERO,
            direction: Vec3::NEG_Z,
        }
    }
}

/// One raycast hit, as reported by a raycaster evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    /// The intersected entity.
    pub target: EntityId,
    /// Distance from the ray origin to the hit point.
    pub distance: f32,
    /// World-space hit point.
    pub point: Vec3,
}
