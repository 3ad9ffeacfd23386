//! A raycaster whose evaluations are scripted by the test.

use pointcast_core::{EntityId, Intersection, Ray};
use pointcast_scene::{RaycastUpdate, Raycaster, Scene};
use std::collections::{HashMap, VecDeque};

/// Build a hit record at `distance` along the +forward of a default ray.
/// Tests that only care about ordering and distances use this.
pub fn hit(target: EntityId, distance: f32) -> Intersection {
    Intersection {
        target,
        distance,
        point: Ray::default().at(distance),
    }
}

/// A [`Raycaster`] that replays updates queued by the test, one per
/// evaluation, and lets the test override the "freshly measured" distance
/// an entity reports after the list was produced.
#[derive(Debug, Default)]
pub struct ScriptedRaycaster {
    ray: Ray,
    queue: VecDeque<RaycastUpdate>,
    current: Vec<Intersection>,
    fresh_distances: HashMap<EntityId, f32>,
}

impl ScriptedRaycaster {
    /// Create a raycaster with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a changed evaluation with the given hits and cleared set.
    pub fn push_update(&mut self, hits: Vec<Intersection>, cleared: Vec<EntityId>) {
        self.queue.push_back(RaycastUpdate {
            hits,
            cleared,
            changed: true,
        });
    }

    /// Queue a raw update (for unchanged or partial notifications).
    pub fn push_raw(&mut self, update: RaycastUpdate) {
        self.queue.push_back(update);
    }

    /// Override the distance `intersection_of` reports for `target`,
    /// simulating scene motion after the hit list was produced.
    pub fn set_fresh_distance(&mut self, target: EntityId, distance: f32) {
        self.fresh_distances.insert(target, distance);
    }
}

impl Raycaster for ScriptedRaycaster {
    fn set_ray(&mut self, ray: Ray) {
        self.ray = ray;
    }

    fn ray(&self) -> Ray {
        self.ray
    }

    fn evaluate(&mut self, _scene: &Scene) -> RaycastUpdate {
        match self.queue.pop_front() {
            Some(update) => {
                self.current = update.hits.clone();
                update
            }
            None => RaycastUpdate {
                hits: self.current.clone(),
                cleared: Vec::new(),
                changed: false,
            },
        }
    }

    fn intersections(&self) -> &[Intersection] {
        &self.current
    }

    fn intersection_of(&self, target: EntityId) -> Option<Intersection> {
        if let Some(&distance) = self.fresh_distances.get(&target) {
            return Some(Intersection {
                target,
                distance,
                point: self.ray.at(distance),
            });
        }
        self.current
            .iter()
            .find(|intersection| intersection.target == target)
            .copied()
    }
}
