//! Canned scenes and engine builders.

use glam::{Mat4, Vec3};
use pointcast_core::{EntityId, SurfaceRect};
use pointcast_cursor::{CursorConfig, CursorEngine};
use pointcast_scene::{Aabb, AabbRaycaster, Scene};

/// A scene with three unit boxes stacked along the cursor's -Z ray at
/// increasing depth, plus the cursor entity at the origin.
#[derive(Debug)]
pub struct CorridorScene {
    /// The populated scene.
    pub scene: Scene,
    /// The pointer's own entity, at the origin looking down -Z.
    pub cursor: EntityId,
    /// Box centered at z = -5.
    pub near: EntityId,
    /// Box centered at z = -10.
    pub mid: EntityId,
    /// Box centered at z = -20.
    pub far: EntityId,
}

/// Build the standard corridor scene with an 800x600 surface.
pub fn corridor_scene() -> CorridorScene {
    let mut scene = Scene::new();
    scene.set_surface(SurfaceRect::from_size(800.0, 600.0));
    let cursor = scene.spawn_at(Vec3::ZERO);
    let near = spawn_box(&mut scene, Vec3::new(0.0, 0.0, -5.0));
    let mid = spawn_box(&mut scene, Vec3::new(0.0, 0.0, -10.0));
    let far = spawn_box(&mut scene, Vec3::new(0.0, 0.0, -20.0));
    CorridorScene {
        scene,
        cursor,
        near,
        mid,
        far,
    }
}

/// Spawn a unit box entity centered at `center`.
pub fn spawn_box(scene: &mut Scene, center: Vec3) -> EntityId {
    let id = scene.spawn(Mat4::from_translation(center));
    scene.set_collider(id, Aabb::from_center_size(center, Vec3::ONE));
    id
}

/// Move an existing box entity (transform and collider) to `center`.
pub fn place_box(scene: &mut Scene, id: EntityId, center: Vec3) {
    scene.set_transform(id, Mat4::from_translation(center));
    scene.set_collider(id, Aabb::from_center_size(center, Vec3::ONE));
}

/// An engine over the reference AABB raycaster for `cursor`.
pub fn engine_for(config: CursorConfig, cursor: EntityId) -> CursorEngine<AabbRaycaster> {
    CursorEngine::new(config, cursor, AabbRaycaster::new())
}
