//! Intersection arbiter behavior: nearest-wins with hysteresis, hover
//! exclusivity, self-exclusion, and fall-through on clear.

use glam::Vec3;
use pointcast::{
    CursorConfig, CursorEngine, CursorState, EntityId, EntityStates, Scene, SurfaceRect,
};
use pointcast_testkit::{corridor_scene, engine_for, hit, EventRecorder, ScriptedRaycaster};

struct Scripted {
    scene: Scene,
    cursor: EntityId,
    a: EntityId,
    b: EntityId,
    engine: CursorEngine<ScriptedRaycaster>,
    recorder: EventRecorder,
}

fn scripted() -> Scripted {
    let mut scene = Scene::new();
    scene.set_surface(SurfaceRect::from_size(800.0, 600.0));
    let cursor = scene.spawn_at(Vec3::ZERO);
    let a = scene.spawn_at(Vec3::new(0.0, 0.0, -5.0));
    let b = scene.spawn_at(Vec3::new(0.0, 0.0, -9.0));

    let mut engine = CursorEngine::new(CursorConfig::default(), cursor, ScriptedRaycaster::new());
    let recorder = EventRecorder::new();
    recorder.attach_session(&mut engine);
    recorder.attach_target(&mut engine, a);
    recorder.attach_target(&mut engine, b);
    engine.start(&mut scene, 0);
    Scripted {
        scene,
        cursor,
        a,
        b,
        engine,
        recorder,
    }
}

impl Scripted {
    fn push_and_tick(&mut self, hits: Vec<pointcast::Intersection>, cleared: Vec<EntityId>) {
        self.engine.raycaster_mut().push_update(hits, cleared);
        self.engine.tick(&mut self.scene, 16);
    }
}

#[test]
fn at_most_one_target_hovered() {
    let mut fixture = corridor_scene();
    let mut engine = engine_for(CursorConfig::default(), fixture.cursor);
    engine.start(&mut fixture.scene, 0);
    engine.tick(&mut fixture.scene, 16);

    assert_eq!(engine.hovered(), Some(fixture.near));
    assert!(fixture.scene.has_state(fixture.near, EntityStates::HOVERED));
    assert!(!fixture.scene.has_state(fixture.mid, EntityStates::HOVERED));
    assert!(!fixture.scene.has_state(fixture.far, EntityStates::HOVERED));
    assert!(fixture
        .scene
        .has_state(fixture.cursor, EntityStates::HOVERING));
}

#[test]
fn self_intersection_is_skipped() {
    let mut s = scripted();
    let (cursor, a) = (s.cursor, s.a);
    s.push_and_tick(vec![hit(cursor, 0.1), hit(a, 5.0)], vec![]);
    assert_eq!(s.engine.hovered(), Some(a));
}

#[test]
fn cursor_only_intersection_is_ignored() {
    let mut s = scripted();
    let (cursor, a) = (s.cursor, s.a);
    s.push_and_tick(vec![hit(a, 5.0)], vec![]);
    assert_eq!(s.engine.hovered(), Some(a));

    // A notification where the pointer is the only hit changes nothing.
    s.push_and_tick(vec![hit(cursor, 0.1)], vec![]);
    assert_eq!(s.engine.hovered(), Some(a));
}

#[test]
fn closer_candidate_preempts() {
    let mut s = scripted();
    let (a, b) = (s.a, s.b);
    s.push_and_tick(vec![hit(a, 5.0)], vec![]);
    assert_eq!(s.engine.hovered(), Some(a));
    s.recorder.clear();

    s.push_and_tick(vec![hit(b, 3.0), hit(a, 5.0)], vec![]);
    assert_eq!(s.engine.hovered(), Some(b));
    assert_eq!(s.recorder.session_kinds(), vec!["mouseleave", "mouseenter"]);
    assert_eq!(s.recorder.target_kinds(a), vec!["mouseleave"]);
    assert_eq!(s.recorder.target_kinds(b), vec!["mouseenter"]);
}

#[test]
fn equal_distance_never_preempts() {
    let mut s = scripted();
    let (a, b) = (s.a, s.b);
    s.push_and_tick(vec![hit(a, 5.0)], vec![]);
    s.recorder.clear();

    s.push_and_tick(vec![hit(b, 5.0), hit(a, 5.0)], vec![]);
    assert_eq!(s.engine.hovered(), Some(a), "equal distance must not flicker");
    assert!(s.recorder.events().is_empty());
}

#[test]
fn farther_superseded_notification_is_a_noop() {
    let mut s = scripted();
    let (a, b) = (s.a, s.b);
    s.push_and_tick(vec![hit(a, 5.0)], vec![]);
    s.recorder.clear();

    // A stale notification about a farther target, with the hovered entity
    // still measuring nearer right now.
    s.engine.raycaster_mut().set_fresh_distance(a, 5.0);
    s.push_and_tick(vec![hit(b, 7.0)], vec![]);
    assert_eq!(s.engine.hovered(), Some(a));
    assert!(s.recorder.events().is_empty());
}

#[test]
fn distance_is_remeasured_at_decision_time() {
    let mut s = scripted();
    let (a, b) = (s.a, s.b);
    s.push_and_tick(vec![hit(a, 5.0)], vec![]);
    s.recorder.clear();

    // The hovered entity has since moved away; the candidate, although
    // farther than the *old* hover distance, now measures nearer.
    s.engine.raycaster_mut().set_fresh_distance(a, 10.0);
    s.push_and_tick(vec![hit(b, 7.0), hit(a, 10.0)], vec![]);
    assert_eq!(s.engine.hovered(), Some(b));
    assert_eq!(s.recorder.session_kinds(), vec!["mouseleave", "mouseenter"]);
}

#[test]
fn clear_falls_through_to_next_nearest() {
    let mut s = scripted();
    let (a, b) = (s.a, s.b);
    s.push_and_tick(vec![hit(a, 5.0), hit(b, 9.0)], vec![]);
    assert_eq!(s.engine.hovered(), Some(a));
    s.recorder.clear();

    s.push_and_tick(vec![hit(b, 9.0)], vec![a]);
    assert_eq!(s.engine.hovered(), Some(b), "no idle frame between targets");
    assert_ne!(s.engine.state(), CursorState::Idle);

    // One leave for the old target, one enter for the new one; never a
    // leave+enter pair for the same entity.
    let events = s.recorder.events();
    let session: Vec<_> = events
        .iter()
        .filter(|event| event.listener.is_none())
        .collect();
    assert_eq!(session.len(), 2);
    assert_eq!(session[0].kind, "mouseleave");
    assert_eq!(session[0].intersected, Some(a));
    assert_eq!(session[1].kind, "mouseenter");
    assert_eq!(session[1].intersected, Some(b));
}

#[test]
fn clear_with_nothing_remaining_goes_idle() {
    let mut s = scripted();
    let a = s.a;
    s.push_and_tick(vec![hit(a, 5.0)], vec![]);
    s.recorder.clear();

    s.push_and_tick(vec![], vec![a]);
    assert_eq!(s.engine.hovered(), None);
    assert_eq!(s.engine.state(), CursorState::Idle);
    assert_eq!(s.recorder.session_kinds(), vec!["mouseleave"]);
}
