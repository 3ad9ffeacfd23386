//! Canvas geometry tracking: the debounced bounding rectangle and the
//! auto/user indirection for canvas and camera sources.
//!
//! Bounds recomputation goes through a 500ms trailing debounce so a burst of
//! resize/scroll notifications costs one layout query, not one per event.
//! Reads between a resize and the debounce firing see the stale rectangle;
//! that inconsistency is bounded by the debounce window and accepted.

use crate::config::SourceMode;
use pointcast_core::{Debouncer, SurfaceRect};
use pointcast_scene::{Camera, Scene};

const BOUNDS_DEBOUNCE_MS: u64 = 500;

/// Tracks the rendering-surface rectangle the engine maps pointer
/// coordinates against, and resolves the canvas/camera indirection so the
/// engine can be retargeted to a secondary viewport after creation.
#[derive(Debug)]
pub struct CanvasTracker {
    canvas_mode: SourceMode,
    camera_mode: SourceMode,
    user_canvas: Option<SurfaceRect>,
    user_camera: Option<Camera>,
    bounds: SurfaceRect,
    debounce: Debouncer,
}

impl CanvasTracker {
    /// Create a tracker with empty bounds; call
    /// [`CanvasTracker::refresh_bounds`] once the surface is known.
    pub fn new(canvas_mode: SourceMode, camera_mode: SourceMode) -> Self {
        Self {
            canvas_mode,
            camera_mode,
            user_canvas: None,
            user_camera: None,
            bounds: SurfaceRect::default(),
            debounce: Debouncer::new(BOUNDS_DEBOUNCE_MS),
        }
    }

    /// The canvas rectangle for the current source mode.
    pub fn canvas(&self, scene: &Scene) -> SurfaceRect {
        match self.canvas_mode {
            SourceMode::Auto => scene.surface(),
            SourceMode::User => self.user_canvas.unwrap_or_default(),
        }
    }

    /// The camera for the current source mode.
    pub fn camera(&self, scene: &Scene) -> Camera {
        match self.camera_mode {
            SourceMode::Auto => *scene.camera(),
            SourceMode::User => self.user_camera.unwrap_or(*scene.camera()),
        }
    }

    /// The cached bounds pointer coordinates are mapped against.
    pub fn bounds(&self) -> SurfaceRect {
        self.bounds
    }

    /// Recompute the cached bounds immediately (attach, surface-ready,
    /// explicit retarget).
    pub fn refresh_bounds(&mut self, scene: &Scene) {
        self.bounds = self.canvas(scene);
    }

    /// Record a resize/scroll/renderer-resize notification; the actual
    /// recomputation is debounced.
    pub fn notify_resize(&mut self, now_ms: u64) {
        self.debounce.trigger(now_ms);
    }

    /// Fire the debounce if due. Returns true when bounds were recomputed.
    pub fn poll(&mut self, scene: &Scene, now_ms: u64) -> bool {
        if self.debounce.poll(now_ms) {
            self.refresh_bounds(scene);
            true
        } else {
            false
        }
    }

    /// Switch source modes (on reconfigure).
    pub fn set_modes(&mut self, canvas_mode: SourceMode, camera_mode: SourceMode) {
        self.canvas_mode = canvas_mode;
        self.camera_mode = camera_mode;
    }

    /// Install user overrides for the canvas rectangle and/or camera, and
    /// switch the corresponding sources to `User`. Used to re-point the
    /// engine at a secondary viewport at runtime.
    pub fn retarget(&mut self, canvas: Option<SurfaceRect>, camera: Option<Camera>) {
        if let Some(rect) = canvas {
            self.user_canvas = Some(rect);
            self.canvas_mode = SourceMode::User;
        }
        if let Some(camera) = camera {
            self.user_camera = Some(camera);
            self.camera_mode = SourceMode::User;
        }
        self.debounce.reset();
    }
}
