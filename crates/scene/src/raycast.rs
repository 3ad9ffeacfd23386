//! The raycaster collaborator interface and the reference AABB
//! implementation used by tests and demos.

use crate::Scene;
use glam::Vec3;
use pointcast_core::{EntityId, Intersection, Ray};

/// Axis-aligned bounding box in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the box.
    pub min: Vec3,
    /// Maximum corner of the box.
    pub max: Vec3,
}

impl Aabb {
    /// Create a new AABB from min and max corners.
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create an AABB from center position and size.
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half_size = size * 0.5;
        Self {
            min: center - half_size,
            max: center + half_size,
        }
    }

    /// Test if a ray intersects this AABB.
    /// Returns distance to intersection point if hit.
    pub fn ray_intersection(&self, ray_origin: Vec3, ray_dir: Vec3) -> Option<f32> {
        let inv_dir = Vec3::new(1.0 / ray_dir.x, 1.0 / ray_dir.y, 1.0 / ray_dir.z);

        let t1 = (self.min.x - ray_origin.x) * inv_dir.x;
        let t2 = (self.max.x - ray_origin.x) * inv_dir.x;
        let t3 = (self.min.y - ray_origin.y) * inv_dir.y;
        let t4 = (self.max.y - ray_origin.y) * inv_dir.y;
        let t5 = (self.min.z - ray_origin.z) * inv_dir.z;
        let t6 = (self.max.z - ray_origin.z) * inv_dir.z;

        let tmin = t1.min(t2).max(t3.min(t4)).max(t5.min(t6));
        let tmax = t1.max(t2).min(t3.max(t4)).min(t5.max(t6));

        // If tmax < 0, ray is intersecting AABB but entire AABB is behind us
        if tmax < 0.0 {
            return None;
        }

        // If tmin > tmax, ray doesn't intersect AABB
        if tmin > tmax {
            return None;
        }

        // If tmin < 0, we're inside the AABB
        let distance = if tmin < 0.0 { tmax } else { tmin };

        Some(distance)
    }
}

/// Outcome of one raycaster evaluation.
#[derive(Debug, Clone, Default)]
pub struct RaycastUpdate {
    /// Current intersections, ordered nearest-first. May include the
    /// pointer's own entity; consumers are expected to skip self-hits.
    pub hits: Vec<Intersection>,
    /// Entities that were intersected in the previous evaluation but are
    /// not anymore.
    pub cleared: Vec<EntityId>,
    /// True when `hits` differs from the previous evaluation (membership or
    /// nearest-first order).
    pub changed: bool,
}

/// The intersection-testing collaborator the pointer engine consumes.
///
/// Implementations own the current ray and the result of the most recent
/// evaluation. [`Raycaster::intersection_of`] must answer from the current
/// evaluation so consumers always see geometrically fresh hit data.
pub trait Raycaster {
    /// Replace the ray used by subsequent evaluations.
    fn set_ray(&mut self, ray: Ray);

    /// The ray that the next evaluation will use.
    fn ray(&self) -> Ray;

    /// Re-test the scene against the current ray.
    fn evaluate(&mut self, scene: &Scene) -> RaycastUpdate;

    /// Intersections from the most recent evaluation, nearest-first.
    fn intersections(&self) -> &[Intersection];

    /// The current intersection record for `target`, if it is intersected.
    fn intersection_of(&self, target: EntityId) -> Option<Intersection> {
        self.intersections()
            .iter()
            .find(|hit| hit.target == target)
            .copied()
    }
}

/// Reference raycaster over the scene's AABB colliders.
#[derive(Debug, Default)]
pub struct AabbRaycaster {
    ray: Ray,
    current: Vec<Intersection>,
}

impl AabbRaycaster {
    /// Create a raycaster with the default rest-pose ray.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Raycaster for AabbRaycaster {
    fn set_ray(&mut self, ray: Ray) {
        self.ray = ray;
    }

    fn ray(&self) -> Ray {
        self.ray
    }

    fn evaluate(&mut self, scene: &Scene) -> RaycastUpdate {
        let mut hits: Vec<Intersection> = scene
            .colliders()
            .filter_map(|(id, collider)| {
                collider
                    .ray_intersection(self.ray.origin, self.ray.direction)
                    .map(|distance| Intersection {
                        target: id,
                        distance,
                        point: self.ray.at(distance),
                    })
            })
            .collect();
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));

        let cleared: Vec<EntityId> = self
            .current
            .iter()
            .map(|hit| hit.target)
            .filter(|id| !hits.iter().any(|hit| hit.target == *id))
            .collect();

        let changed = hits.len() != self.current.len()
            || hits
                .iter()
                .zip(self.current.iter())
                .any(|(new, old)| new.target != old.target);

        self.current = hits.clone();
        RaycastUpdate {
            hits,
            cleared,
            changed,
        }
    }

    fn intersections(&self) -> &[Intersection] {
        &self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Mat4;

    #[test]
    fn aabb_ray_intersection_hits_and_misses() {
        let aabb = Aabb::from_center_size(Vec3::ZERO, Vec3::ONE);

        // Ray pointing at center from positive Z
        let hit = aabb.ray_intersection(Vec3::new(0.0, 0.0, 2.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(hit.is_some());
        assert!((hit.unwrap() - 1.5).abs() < 0.001);

        // Ray missing the box
        let miss = aabb.ray_intersection(Vec3::new(2.0, 0.0, 2.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(miss.is_none());
    }

    fn boxed_scene(depths: &[f32]) -> (Scene, Vec<EntityId>) {
        let mut scene = Scene::new();
        let ids = depths
            .iter()
            .map(|&z| {
                let id = scene.spawn(Mat4::from_translation(Vec3::new(0.0, 0.0, z)));
                scene.set_collider(id, Aabb::from_center_size(Vec3::new(0.0, 0.0, z), Vec3::ONE));
                id
            })
            .collect();
        (scene, ids)
    }

    #[test]
    fn evaluate_orders_nearest_first() {
        let (scene, ids) = boxed_scene(&[-10.0, -5.0, -20.0]);
        let mut raycaster = AabbRaycaster::new();
        raycaster.set_ray(Ray::new(Vec3::ZERO, Vec3::NEG_Z));

        let update = raycaster.evaluate(&scene);
        assert!(update.changed);
        assert!(update.cleared.is_empty());
        let order: Vec<EntityId> = update.hits.iter().map(|h| h.target).collect();
        assert_eq!(order, vec![ids[1], ids[0], ids[2]]);
    }

    #[test]
    fn evaluate_reports_cleared_entities() {
        let (mut scene, ids) = boxed_scene(&[-5.0, -10.0]);
        let mut raycaster = AabbRaycaster::new();
        raycaster.set_ray(Ray::new(Vec3::ZERO, Vec3::NEG_Z));
        raycaster.evaluate(&scene);

        scene.remove(ids[0]);
        let update = raycaster.evaluate(&scene);
        assert_eq!(update.cleared, vec![ids[0]]);
        assert_eq!(update.hits.len(), 1);
        assert!(update.changed);
    }

    #[test]
    fn unchanged_scene_reports_no_change() {
        let (scene, _) = boxed_scene(&[-5.0, -10.0]);
        let mut raycaster = AabbRaycaster::new();
        raycaster.set_ray(Ray::new(Vec3::ZERO, Vec3::NEG_Z));
        raycaster.evaluate(&scene);

        let update = raycaster.evaluate(&scene);
        assert!(!update.changed);
        assert!(update.cleared.is_empty());
    }

    #[test]
    fn intersection_of_answers_from_current_set() {
        let (scene, ids) = boxed_scene(&[-5.0]);
        let mut raycaster = AabbRaycaster::new();
        raycaster.set_ray(Ray::new(Vec3::ZERO, Vec3::NEG_Z));
        raycaster.evaluate(&scene);

        let hit = raycaster.intersection_of(ids[0]).expect("intersected");
        assert!((hit.distance - 4.5).abs() < 1e-4);
        assert!(raycaster.intersection_of(EntityId(999)).is_none());
    }
}
