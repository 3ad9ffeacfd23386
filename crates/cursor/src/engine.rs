//! The pointer interaction engine: intersection arbitration, fuse timing,
//! and press/release/click gesture pairing over a raycaster collaborator.

use crate::canvas::CanvasTracker;
use crate::config::{CursorConfig, RayOrigin};
use crate::events::{CursorEventKind, EventBus, SessionEvent, TargetEvent};
use crate::listeners::ListenerSet;
use crate::ray::RayResolver;
use crate::session::{CursorState, PointerSession};
use pointcast_core::{
    DeviceEvent, EntityId, InputDisposition, Intersection, Ray, SurfaceRect, TimerService,
};
use pointcast_scene::{Camera, EntityStates, RaycastUpdate, Raycaster, Scene};
use tracing::debug;

/// Which half of a gesture a device event maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GestureKind {
    Down,
    Up,
}

/// One pointer interaction engine instance.
///
/// The engine is driven entirely by the host: `tick` once per frame,
/// `handle_device_event` for each input, and the notification methods for
/// surface and XR lifecycle changes. All time arrives as explicit `now_ms`.
pub struct CursorEngine<R: Raycaster> {
    config: CursorConfig,
    own_entity: EntityId,
    raycaster: R,
    resolver: RayResolver,
    canvas: CanvasTracker,
    listeners: ListenerSet,
    timers: TimerService,
    bus: EventBus,
    session: PointerSession,
    xr_session_active: bool,
    started: bool,
}

impl<R: Raycaster> CursorEngine<R> {
    /// Create an engine for the pointer entity `own_entity`, consuming the
    /// injected raycaster collaborator. The engine is inert until
    /// [`CursorEngine::start`].
    pub fn new(config: CursorConfig, own_entity: EntityId, raycaster: R) -> Self {
        let canvas = CanvasTracker::new(config.canvas, config.camera);
        Self {
            config,
            own_entity,
            raycaster,
            resolver: RayResolver::new(),
            canvas,
            listeners: ListenerSet::empty(),
            timers: TimerService::new(),
            bus: EventBus::new(),
            session: PointerSession::default(),
            xr_session_active: false,
            started: false,
        }
    }

    // === Lifecycle ===

    /// Attach: subscribe device listeners and take the initial bounds
    /// measurement.
    pub fn start(&mut self, scene: &mut Scene, now_ms: u64) {
        if self.started {
            return;
        }
        self.started = true;
        self.canvas.refresh_bounds(scene);
        self.sync_listeners(scene, now_ms);
    }

    /// Detach: remove every device listener, cancel the fuse timer, and
    /// clear hover state without emitting. No event fires after this
    /// returns.
    pub fn stop(&mut self, scene: &mut Scene) {
        if !self.started {
            return;
        }
        self.started = false;
        if let Some(target) = self.session.hovered.take() {
            scene.remove_state(target, EntityStates::HOVERED);
        }
        scene.remove_state(
            self.own_entity,
            EntityStates::HOVERING | EntityStates::FUSING,
        );
        self.session.state = CursorState::Idle;
        self.session.pressed = None;
        self.session.is_down = false;
        self.session.hover_cursor = false;
        if let Some(token) = self.session.fuse_timer.take() {
            self.timers.cancel(token);
        }
        self.listeners = ListenerSet::empty();
    }

    /// Replace the configuration. Listener subscriptions are re-derived
    /// idempotently, so toggling ray-origin mode back and forth never
    /// accumulates duplicates.
    pub fn reconfigure(&mut self, config: CursorConfig, scene: &Scene, now_ms: u64) {
        let left_mouse_mode =
            self.config.ray_origin == RayOrigin::Mouse && config.ray_origin != RayOrigin::Mouse;
        self.canvas.set_modes(config.canvas, config.camera);
        self.config = config;
        if left_mouse_mode {
            self.session.hover_cursor = false;
        }
        if self.started {
            self.sync_listeners(scene, now_ms);
        }
    }

    /// Re-point the engine at a different canvas rectangle and/or camera
    /// (secondary viewport support). Bounds are remeasured immediately.
    pub fn retarget(
        &mut self,
        canvas: Option<SurfaceRect>,
        camera: Option<Camera>,
        scene: &Scene,
        now_ms: u64,
    ) {
        self.canvas.retarget(canvas, camera);
        self.canvas.refresh_bounds(scene);
        if self.started {
            self.sync_listeners(scene, now_ms);
        }
    }

    // === Host notifications ===

    /// The rendering surface became available (or changed identity).
    /// Bounds are remeasured immediately and deferred canvas listeners are
    /// subscribed.
    pub fn on_surface_ready(&mut self, scene: &Scene, now_ms: u64) {
        self.canvas.refresh_bounds(scene);
        if self.started {
            self.sync_listeners(scene, now_ms);
        }
    }

    /// A resize/scroll/renderer-resize occurred. The bounds recomputation
    /// is debounced; a burst of notifications costs one layout query.
    pub fn notify_resize(&mut self, now_ms: u64) {
        self.canvas.notify_resize(now_ms);
    }

    /// An XR session began: the current hover is force-cleared and, unless
    /// the ray originates from the mouse, VR select gestures are subscribed.
    pub fn on_xr_session_started(&mut self, scene: &mut Scene, now_ms: u64) {
        self.xr_session_active = true;
        self.clear_current_intersection(scene, now_ms, true);
        if self.started {
            self.sync_listeners(scene, now_ms);
        }
    }

    /// The XR session ended; VR select gestures are unsubscribed.
    pub fn on_xr_session_ended(&mut self, scene: &Scene, now_ms: u64) {
        self.xr_session_active = false;
        if self.started {
            self.sync_listeners(scene, now_ms);
        }
    }

    // === Per-frame driving ===

    /// Advance deferred work and re-evaluate the ray. Call once per frame.
    pub fn tick(&mut self, scene: &mut Scene, now_ms: u64) {
        if !self.started {
            return;
        }
        self.canvas.poll(scene, now_ms);

        for token in self.timers.poll(now_ms) {
            if self.session.fuse_timer == Some(token) {
                self.session.fuse_timer = None;
                self.fire_fuse(scene);
            }
        }

        if self.config.ray_origin == RayOrigin::Entity {
            if let Some(ray) = self.resolver.resolve_attached(scene, self.own_entity) {
                self.raycaster.set_ray(ray);
            }
        }

        let update = self.raycaster.evaluate(scene);
        self.process_raycast_update(&update, scene, now_ms);
    }

    /// Force an immediate ray and intersection recomputation, outside the
    /// normal tick cadence.
    pub fn refresh_now(&mut self, scene: &mut Scene, now_ms: u64) {
        if !self.started {
            return;
        }
        self.canvas.refresh_bounds(scene);
        if self.config.ray_origin == RayOrigin::Entity {
            if let Some(ray) = self.resolver.resolve_attached(scene, self.own_entity) {
                self.raycaster.set_ray(ray);
            }
        }
        let update = self.raycaster.evaluate(scene);
        self.process_raycast_update(&update, scene, now_ms);
    }

    /// Feed one device event. Returns whether the engine consumed it (the
    /// host should then suppress its default handling, the touch paths).
    pub fn handle_device_event(
        &mut self,
        event: &DeviceEvent,
        scene: &mut Scene,
        now_ms: u64,
    ) -> InputDisposition {
        if !self.started {
            return InputDisposition::Ignored;
        }

        if matches!(
            event,
            DeviceEvent::MouseMove { .. } | DeviceEvent::TouchMove { .. }
        ) {
            if !self.listeners.contains(ListenerSet::POINTER_MOVE) {
                return InputDisposition::Ignored;
            }
            if let Some(position) = event.position() {
                let camera = self.canvas.camera(scene);
                let bounds = self.canvas.bounds();
                if let Some(ray) = self.resolver.resolve_screen(position, bounds, &camera) {
                    self.raycaster.set_ray(ray);
                }
            }
            return if event.is_touch() {
                InputDisposition::Consumed
            } else {
                InputDisposition::Handled
            };
        }

        match self.gesture_of(event) {
            Some(GestureKind::Down) => self.on_cursor_down(event, scene, now_ms),
            Some(GestureKind::Up) => self.on_cursor_up(event, scene, now_ms),
            None => InputDisposition::Ignored,
        }
    }

    // === Queries ===

    /// Current arbiter state.
    pub fn state(&self) -> CursorState {
        self.session.state()
    }

    /// The hovered target, if any.
    pub fn hovered(&self) -> Option<EntityId> {
        self.session.hovered()
    }

    /// The live session record.
    pub fn session(&self) -> &PointerSession {
        &self.session
    }

    /// True while the hover cursor style should be applied to the surface.
    pub fn hover_cursor_active(&self) -> bool {
        self.session.hover_cursor()
    }

    /// True while a fuse timer is scheduled and has not fired.
    pub fn fuse_pending(&self) -> bool {
        self.session
            .fuse_timer
            .map(|token| self.timers.is_pending(token))
            .unwrap_or(false)
    }

    /// The device event classes currently subscribed.
    pub fn listeners(&self) -> ListenerSet {
        self.listeners
    }

    /// The ray the raycaster is being fed.
    pub fn ray(&self) -> Ray {
        self.resolver.current()
    }

    /// Cached surface bounds.
    pub fn bounds(&self) -> SurfaceRect {
        self.canvas.bounds()
    }

    /// The canvas rectangle the engine is currently pointed at (scene
    /// surface in auto mode, the injected override after a retarget).
    pub fn canvas(&self, scene: &Scene) -> SurfaceRect {
        self.canvas.canvas(scene)
    }

    /// The camera screen-space rays are resolved through.
    pub fn camera(&self, scene: &Scene) -> Camera {
        self.canvas.camera(scene)
    }

    /// True between `start` and `stop`.
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Active configuration.
    pub fn config(&self) -> &CursorConfig {
        &self.config
    }

    /// The injected raycaster.
    pub fn raycaster(&self) -> &R {
        &self.raycaster
    }

    /// Mutable access to the injected raycaster (retuning layer masks,
    /// intervals, and similar collaborator-side knobs).
    pub fn raycaster_mut(&mut self) -> &mut R {
        &mut self.raycaster
    }

    /// Register a session-scoped event listener.
    pub fn on_session_event(&mut self, listener: impl FnMut(&SessionEvent) + 'static) {
        self.bus.on_session(listener);
    }

    /// Register a target-scoped event listener.
    pub fn on_target_event(
        &mut self,
        target: EntityId,
        listener: impl FnMut(&TargetEvent) + 'static,
    ) {
        self.bus.on_target(target, listener);
    }

    /// Drop all listeners registered for `target` (target removed from the
    /// application).
    pub fn remove_target_listeners(&mut self, target: EntityId) {
        self.bus.remove_target_listeners(target);
    }

    // === Listener management ===

    /// Drop every device listener without touching session state. Paired
    /// with [`CursorEngine::resubscribe_listeners`] by collaborators that
    /// rewire the engine (overlay viewports swapping canvas and camera).
    pub fn unsubscribe_listeners(&mut self) {
        self.listeners = ListenerSet::empty();
    }

    /// Re-derive the full listener set from the current configuration.
    pub fn resubscribe_listeners(&mut self, scene: &Scene, now_ms: u64) {
        if self.started {
            self.sync_listeners(scene, now_ms);
        }
    }

    /// Derive the full listener set from configuration and session context.
    /// Re-deriving is idempotent; repeated mode toggles end in the same set.
    fn sync_listeners(&mut self, scene: &Scene, now_ms: u64) {
        let mut set = ListenerSet::empty();

        if self.config.has_custom_gestures() {
            set |= ListenerSet::CUSTOM_DOWN_UP;
        } else if !self.canvas.canvas(scene).is_empty() {
            // Canvas gestures wait for the surface to exist; on_surface_ready
            // re-derives the set once it does.
            set |= ListenerSet::CANVAS_DOWN_UP;
        }

        if self.xr_session_active && self.config.ray_origin != RayOrigin::Mouse {
            set |= ListenerSet::XR_SELECT;
        }

        if self.config.ray_origin == RayOrigin::Mouse {
            set |= ListenerSet::POINTER_MOVE;
            self.canvas.notify_resize(now_ms);
        }

        self.listeners = set;
    }

    /// Map a device event onto the down/up gesture vocabulary, honoring the
    /// current subscriptions and any custom event name lists.
    fn gesture_of(&self, event: &DeviceEvent) -> Option<GestureKind> {
        match event {
            DeviceEvent::MouseDown | DeviceEvent::TouchStart { .. }
                if self.listeners.contains(ListenerSet::CANVAS_DOWN_UP) =>
            {
                Some(GestureKind::Down)
            }
            DeviceEvent::MouseUp | DeviceEvent::TouchEnd
                if self.listeners.contains(ListenerSet::CANVAS_DOWN_UP) =>
            {
                Some(GestureKind::Up)
            }
            DeviceEvent::SelectStart if self.listeners.contains(ListenerSet::XR_SELECT) => {
                Some(GestureKind::Down)
            }
            DeviceEvent::SelectEnd if self.listeners.contains(ListenerSet::XR_SELECT) => {
                Some(GestureKind::Up)
            }
            DeviceEvent::Named { name } if self.listeners.contains(ListenerSet::CUSTOM_DOWN_UP) => {
                if self.config.down_events.iter().any(|n| n == name) {
                    Some(GestureKind::Down)
                } else if self.config.up_events.iter().any(|n| n == name) {
                    Some(GestureKind::Up)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    // === Gesture arbitration ===

    /// Trigger mousedown and keep track of the pressed entity.
    fn on_cursor_down(
        &mut self,
        event: &DeviceEvent,
        scene: &mut Scene,
        now_ms: u64,
    ) -> InputDisposition {
        self.session.is_down = true;

        let mut consumed = false;
        // Touch has no hover-producing move event before it: re-resolve the
        // ray and evaluate synchronously so the press sees a hover target.
        if self.config.ray_origin == RayOrigin::Mouse
            && matches!(event, DeviceEvent::TouchStart { .. })
        {
            if let Some(position) = event.position() {
                let camera = self.canvas.camera(scene);
                let bounds = self.canvas.bounds();
                if let Some(ray) = self.resolver.resolve_screen(position, bounds, &camera) {
                    self.raycaster.set_ray(ray);
                }
            }
            let update = self.raycaster.evaluate(scene);
            self.process_raycast_update(&update, scene, now_ms);
            consumed = true;
        }

        self.two_way_emit(CursorEventKind::MouseDown);
        self.session.pressed = self.session.hovered;

        if consumed {
            InputDisposition::Consumed
        } else {
            InputDisposition::Handled
        }
    }

    /// Trigger mouseup, the synthetic release for an abandoned press
    /// target, and the click when press and release resolved to the same
    /// target.
    fn on_cursor_up(
        &mut self,
        event: &DeviceEvent,
        _scene: &mut Scene,
        _now_ms: u64,
    ) -> InputDisposition {
        // Release without a matching press (pressed outside the surface,
        // double delivery): not an error, just nothing to resolve.
        if !self.session.is_down {
            return InputDisposition::Ignored;
        }
        self.session.is_down = false;

        self.two_way_emit(CursorEventKind::MouseUp);

        // The hover moved between press and release: the pressed entity
        // still gets its release, with no intersection payload.
        if let Some(pressed) = self.session.pressed {
            if Some(pressed) != self.session.hovered {
                self.bus
                    .notify_target(CursorEventKind::MouseUp, self.own_entity, pressed, None);
            }
        }

        // A discrete release produces a click unless fuse owns clicking
        // (entity-origin fuse mode has no meaningful release).
        if (!self.config.fuse || self.config.ray_origin == RayOrigin::Mouse)
            && self.session.hovered.is_some()
            && self.session.pressed == self.session.hovered
        {
            self.two_way_emit(CursorEventKind::Click);
        }

        self.session.pressed = None;

        if matches!(event, DeviceEvent::TouchEnd) {
            InputDisposition::Consumed
        } else {
            InputDisposition::Handled
        }
    }

    // === Intersection arbitration ===

    fn process_raycast_update(&mut self, update: &RaycastUpdate, scene: &mut Scene, now_ms: u64) {
        if let Some(hovered) = self.session.hovered {
            if update.cleared.contains(&hovered) {
                // Fall through to the next-nearest candidate in one step.
                self.clear_current_intersection(scene, now_ms, false);
            }
        }
        if update.changed {
            self.on_intersection(&update.hits, scene, now_ms);
        }
    }

    fn on_intersection(&mut self, hits: &[Intersection], scene: &mut Scene, now_ms: u64) {
        // Select closest target, excluding the pointer's own entity.
        let index = if hits.first().map(|hit| hit.target) == Some(self.own_entity) {
            1
        } else {
            0
        };
        // The pointer being the only intersected entity counts as no hit.
        let Some(candidate) = hits.get(index).copied() else {
            return;
        };

        // Already hovering this entity.
        if self.session.hovered == Some(candidate.target) {
            return;
        }

        // A farther or equally-near candidate never displaces the current
        // hover. Distance is re-measured now, not taken from when the hover
        // began.
        if let Some(current) = self.session.hovered {
            if let Some(current_hit) = self.raycaster.intersection_of(current) {
                if current_hit.distance <= candidate.distance {
                    return;
                }
            }
        }

        self.clear_current_intersection(scene, now_ms, true);
        self.set_intersection(candidate.target, scene, now_ms);
    }

    fn set_intersection(&mut self, target: EntityId, scene: &mut Scene, now_ms: u64) {
        if self.session.hovered == Some(target) {
            return;
        }
        self.session.hovered = Some(target);
        self.session.state = CursorState::Hovering;
        scene.add_state(self.own_entity, EntityStates::HOVERING);
        scene.add_state(target, EntityStates::HOVERED);
        debug!(%target, "hover acquired");
        self.two_way_emit(CursorEventKind::MouseEnter);

        if self.config.mouse_cursor_styles_enabled && self.config.ray_origin == RayOrigin::Mouse {
            self.session.hover_cursor = true;
        }

        // Begin fuse if necessary. A zero timeout means the fuse never
        // arms, even when enabled.
        if self.config.fuse_timeout_ms == 0 || !self.config.fuse {
            return;
        }
        self.session.state = CursorState::Fusing;
        scene.add_state(self.own_entity, EntityStates::FUSING);
        self.two_way_emit(CursorEventKind::Fusing);
        if let Some(token) = self.session.fuse_timer.take() {
            self.timers.cancel(token);
        }
        self.session.fuse_timer = Some(self.timers.schedule(now_ms, self.config.fuse_timeout_ms));
    }

    fn clear_current_intersection(
        &mut self,
        scene: &mut Scene,
        now_ms: u64,
        ignore_remaining: bool,
    ) {
        let Some(target) = self.session.hovered else {
            return;
        };

        scene.remove_state(target, EntityStates::HOVERED);
        scene.remove_state(
            self.own_entity,
            EntityStates::HOVERING | EntityStates::FUSING,
        );
        self.session.state = CursorState::Idle;
        // Emit while the hover is still set so the target side is reached.
        self.two_way_emit(CursorEventKind::MouseLeave);

        if self.config.mouse_cursor_styles_enabled && self.config.ray_origin == RayOrigin::Mouse {
            self.session.hover_cursor = false;
        }

        self.session.hovered = None;
        if let Some(token) = self.session.fuse_timer.take() {
            self.timers.cancel(token);
        }
        debug!(%target, "hover cleared");

        if ignore_remaining {
            return;
        }

        // Hover falls through to the next-nearest remaining intersection
        // rather than dropping to idle for a frame.
        let next = {
            let hits = self.raycaster.intersections();
            let index = if hits.first().map(|hit| hit.target) == Some(self.own_entity) {
                1
            } else {
                0
            };
            hits.get(index).copied()
        };
        if let Some(next) = next {
            self.set_intersection(next.target, scene, now_ms);
        }
    }

    /// Fuse dwell elapsed: leave the fusing state and synthesize the click.
    fn fire_fuse(&mut self, scene: &mut Scene) {
        scene.remove_state(self.own_entity, EntityStates::FUSING);
        self.session.state = CursorState::Hovering;
        debug!("fuse click");
        self.two_way_emit(CursorEventKind::Click);
    }

    // === Emission ===

    /// Emit on both the session and the hovered target, with intersection
    /// data queried fresh at emit time.
    fn two_way_emit(&mut self, kind: CursorEventKind) {
        let intersection = self
            .session
            .hovered
            .and_then(|target| self.raycaster.intersection_of(target));
        self.bus
            .notify(kind, self.own_entity, self.session.hovered, intersection);
    }
}

impl<R: Raycaster> std::fmt::Debug for CursorEngine<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CursorEngine")
            .field("own_entity", &self.own_entity)
            .field("state", &self.session.state())
            .field("hovered", &self.session.hovered())
            .field("listeners", &self.listeners)
            .field("started", &self.started)
            .finish()
    }
}
