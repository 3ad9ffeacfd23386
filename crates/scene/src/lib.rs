#![warn(missing_docs)]
//! Scene host for the pointer engine: an entity registry with world
//! transforms and interaction state flags, a camera model, and the raycaster
//! collaborator interface.
//!
//! This crate deliberately stops at what the pointer engine consumes. There
//! is no scene graph hierarchy, no geometry beyond AABB colliders, and no
//! rendering: hosts with richer scenes implement [`Raycaster`] over their own
//! structures.

pub mod camera;
pub mod raycast;

use bitflags::bitflags;
use glam::{Mat4, Vec3};
use std::collections::HashMap;

pub use camera::{Camera, Projection};
pub use raycast::{Aabb, AabbRaycaster, RaycastUpdate, Raycaster};
use pointcast_core::{EntityId, Ray, SurfaceRect};

bitflags! {
    /// Interaction state flags carried by scene entities.
    ///
    /// `HOVERING`/`FUSING` are set on the pointer's own entity, `HOVERED` on
    /// the target under it, mirroring both ends of the hover relation.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct EntityStates: u8 {
        /// The entity is currently under a pointer session.
        const HOVERED = 1;
        /// The entity owns a pointer session that is hovering something.
        const HOVERING = 1 << 1;
        /// The entity owns a pointer session with a running fuse timer.
        const FUSING = 1 << 2;
    }
}

#[derive(Debug)]
struct EntityRecord {
    transform: Mat4,
    states: EntityStates,
    collider: Option<Aabb>,
}

/// Entity registry plus the camera and surface geometry the pointer engine
/// reads.
#[derive(Debug)]
pub struct Scene {
    entities: HashMap<EntityId, EntityRecord>,
    next_id: u64,
    camera: Camera,
    surface: SurfaceRect,
}

impl Scene {
    /// Create an empty scene with a default camera and a not-yet-ready
    /// (empty) surface rectangle.
    pub fn new() -> Self {
        Self {
            entities: HashMap::new(),
            next_id: 1,
            camera: Camera::default(),
            surface: SurfaceRect::default(),
        }
    }

    /// Add an entity with the given world transform.
    pub fn spawn(&mut self, transform: Mat4) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.entities.insert(
            id,
            EntityRecord {
                transform,
                states: EntityStates::empty(),
                collider: None,
            },
        );
        id
    }

    /// Add an entity positioned at `position` with identity orientation.
    pub fn spawn_at(&mut self, position: Vec3) -> EntityId {
        self.spawn(Mat4::from_translation(position))
    }

    /// Remove an entity. Removing an unknown id is tolerated.
    pub fn remove(&mut self, id: EntityId) {
        self.entities.remove(&id);
    }

    /// True while the entity exists.
    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    /// Number of live entities.
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// World transform of an entity.
    pub fn transform(&self, id: EntityId) -> Option<Mat4> {
        self.entities.get(&id).map(|e| e.transform)
    }

    /// Replace an entity's world transform.
    pub fn set_transform(&mut self, id: EntityId, transform: Mat4) {
        if let Some(entity) = self.entities.get_mut(&id) {
            entity.transform = transform;
        }
    }

    /// The ray rigidly attached to an entity: origin at its world position,
    /// pointing down its world -Z axis.
    pub fn world_ray(&self, id: EntityId) -> Option<Ray> {
        let entity = self.entities.get(&id)?;
        let origin = entity.transform.transform_point3(Vec3::ZERO);
        let direction = entity.transform.transform_vector3(Vec3::NEG_Z);
        Some(Ray::new(origin, direction))
    }

    /// Attach a world-space AABB collider, making the entity raycastable.
    pub fn set_collider(&mut self, id: EntityId, collider: Aabb) {
        if let Some(entity) = self.entities.get_mut(&id) {
            entity.collider = Some(collider);
        }
    }

    /// Iterate entities that currently have colliders.
    pub fn colliders(&self) -> impl Iterator<Item = (EntityId, Aabb)> + '_ {
        self.entities
            .iter()
            .filter_map(|(id, e)| e.collider.map(|c| (*id, c)))
    }

    /// Current state flags of an entity (empty for unknown ids).
    pub fn states(&self, id: EntityId) -> EntityStates {
        self.entities
            .get(&id)
            .map(|e| e.states)
            .unwrap_or_default()
    }

    /// True when the entity carries the given state flags.
    pub fn has_state(&self, id: EntityId, states: EntityStates) -> bool {
        self.states(id).contains(states)
    }

    /// Add state flags to an entity. Unknown ids are tolerated.
    pub fn add_state(&mut self, id: EntityId, states: EntityStates) {
        if let Some(entity) = self.entities.get_mut(&id) {
            entity.states.insert(states);
        }
    }

    /// Remove state flags from an entity. Unknown ids are tolerated.
    pub fn remove_state(&mut self, id: EntityId, states: EntityStates) {
        if let Some(entity) = self.entities.get_mut(&id) {
            entity.states.remove(states);
        }
    }

    /// The scene's active camera.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Replace the active camera.
    pub fn set_camera(&mut self, camera: Camera) {
        self.camera = camera;
    }

    /// Current surface bounding rectangle (empty until the host reports it).
    pub fn surface(&self) -> SurfaceRect {
        self.surface
    }

    /// Update the surface bounding rectangle (host calls this on resize).
    pub fn set_surface(&mut self, surface: SurfaceRect) {
        self.surface = surface;
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;

    #[test]
    fn spawn_allocates_distinct_ids() {
        let mut scene = Scene::new();
        let a = scene.spawn_at(Vec3::ZERO);
        let b = scene.spawn_at(Vec3::ONE);
        assert_ne!(a, b);
        assert_eq!(scene.entity_count(), 2);

        scene.remove(a);
        assert!(!scene.contains(a));
        assert!(scene.contains(b));
    }

    #[test]
    fn world_ray_tracks_entity_transform() {
        let mut scene = Scene::new();
        let id = scene.spawn_at(Vec3::new(0.0, 1.0, 5.0));

        let ray = scene.world_ray(id).expect("entity exists");
        assert_eq!(ray.origin, Vec3::new(0.0, 1.0, 5.0));
        assert_eq!(ray.direction, Vec3::NEG_Z);

        // Turn the entity to face +X.
        scene.set_transform(
            id,
            Mat4::from_rotation_translation(
                Quat::from_rotation_y(-std::f32::consts::FRAC_PI_2),
                Vec3::ZERO,
            ),
        );
        let ray = scene.world_ray(id).expect("entity exists");
        assert!((ray.direction - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn state_flags_are_per_entity() {
        let mut scene = Scene::new();
        let a = scene.spawn_at(Vec3::ZERO);
        let b = scene.spawn_at(Vec3::ONE);

        scene.add_state(a, EntityStates::HOVERED);
        assert!(scene.has_state(a, EntityStates::HOVERED));
        assert!(!scene.has_state(b, EntityStates::HOVERED));

        scene.remove_state(a, EntityStates::HOVERED);
        assert_eq!(scene.states(a), EntityStates::empty());
    }
}
