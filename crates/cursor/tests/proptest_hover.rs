//! Property-based tests for hover arbitration invariants
//!
//! Validates, across random interleavings of scene motion, ticks, and
//! gestures:
//! - At most one entity is hovered at any time (exclusivity)
//! - The hovered entity is always among the current intersections, at the
//!   nearest (or tied-nearest) distance (nearest-wins with hysteresis)
//! - The fusing state and an observable pending fuse timer coincide

use glam::{Mat4, Vec3};
use pointcast_core::{DeviceEvent, EntityId};
use pointcast_cursor::{CursorConfig, CursorEngine, CursorState};
use pointcast_scene::{Aabb, AabbRaycaster, EntityStates, Raycaster, Scene};
use proptest::prelude::*;

const BOX_COUNT: usize = 3;

#[derive(Debug, Clone)]
enum Op {
    /// Move box `index` to depth `z`, optionally shoving it off the ray.
    MoveBox { index: usize, z: f32, off_ray: bool },
    /// Advance time and run one engine tick.
    Tick { dt: u64 },
    /// Press the primary button.
    Press,
    /// Release the primary button.
    Release,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..BOX_COUNT, -20.0f32..-1.0, any::<bool>())
            .prop_map(|(index, z, off_ray)| Op::MoveBox { index, z, off_ray }),
        (1u64..2000).prop_map(|dt| Op::Tick { dt }),
        Just(Op::Press),
        Just(Op::Release),
    ]
}

fn place_box(scene: &mut Scene, id: EntityId, center: Vec3) {
    scene.set_transform(id, Mat4::from_translation(center));
    scene.set_collider(id, Aabb::from_center_size(center, Vec3::ONE));
}

fn check_invariants(
    engine: &CursorEngine<AabbRaycaster>,
    scene: &Scene,
    cursor: EntityId,
    boxes: &[EntityId],
) -> Result<(), TestCaseError> {
    // Exclusivity: at most one hovered entity, and the flags agree with the
    // engine's view.
    let flagged: Vec<EntityId> = boxes
        .iter()
        .copied()
        .filter(|id| scene.has_state(*id, EntityStates::HOVERED))
        .collect();
    prop_assert!(flagged.len() <= 1, "multiple hovered entities: {flagged:?}");
    prop_assert_eq!(engine.hovered(), flagged.first().copied());

    if let Some(hovered) = engine.hovered() {
        let hits = engine.raycaster().intersections();
        let hovered_distance = hits
            .iter()
            .find(|hit| hit.target == hovered)
            .map(|hit| hit.distance);
        prop_assert!(
            hovered_distance.is_some(),
            "hovered entity missing from the current intersections"
        );
        let nearest = hits
            .iter()
            .filter(|hit| hit.target != cursor)
            .map(|hit| hit.distance)
            .fold(f32::INFINITY, f32::min);
        prop_assert!(
            hovered_distance.unwrap() <= nearest + 1e-4,
            "a nearer candidate was left unhovered"
        );
    }

    // The fusing state and an armed timer always coincide.
    prop_assert_eq!(
        engine.state() == CursorState::Fusing,
        engine.fuse_pending()
    );
    Ok(())
}

proptest! {
    #[test]
    fn hover_invariants_hold_across_interleavings(
        ops in prop::collection::vec(op_strategy(), 1..40),
        fuse in any::<bool>(),
    ) {
        let mut scene = Scene::new();
        scene.set_surface(pointcast_core::SurfaceRect::from_size(800.0, 600.0));
        let cursor = scene.spawn_at(Vec3::ZERO);
        let boxes: Vec<EntityId> = (0..BOX_COUNT)
            .map(|i| {
                let id = scene.spawn(Mat4::IDENTITY);
                place_box(&mut scene, id, Vec3::new(0.0, 0.0, -5.0 * (i as f32 + 1.0)));
                id
            })
            .collect();

        let config = CursorConfig {
            fuse,
            ..CursorConfig::default()
        };
        let mut engine = CursorEngine::new(config, cursor, AabbRaycaster::new());
        engine.start(&mut scene, 0);

        let mut now = 0u64;
        for op in ops {
            match op {
                Op::MoveBox { index, z, off_ray } => {
                    let x = if off_ray { 100.0 } else { 0.0 };
                    place_box(&mut scene, boxes[index], Vec3::new(x, 0.0, z));
                }
                Op::Tick { dt } => {
                    now += dt;
                    engine.tick(&mut scene, now);
                }
                Op::Press => {
                    engine.handle_device_event(&DeviceEvent::MouseDown, &mut scene, now);
                }
                Op::Release => {
                    engine.handle_device_event(&DeviceEvent::MouseUp, &mut scene, now);
                }
            }
            check_invariants(&engine, &scene, cursor, &boxes)?;
        }

        // A final settle tick: the hovered entity, if any, is the nearest
        // on-ray box.
        now += 16;
        engine.tick(&mut scene, now);
        check_invariants(&engine, &scene, cursor, &boxes)?;
    }
}
