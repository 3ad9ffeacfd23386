#![warn(missing_docs)]
//! pointcast: a pointer interaction engine for 3D scenes.
//!
//! Point into a scene with a mouse, a touch, or a VR controller's select
//! ray, and get hover, dwell ("fuse") clicks, and press/release/click
//! gestures against whatever the raycaster reports under the pointer.
//!
//! The workspace splits into focused crates, re-exported here:
//! - [`mod@cursor`] — the interaction engine itself.
//! - [`mod@scene`] — the scene host: entities, cameras, the raycaster
//!   interface and its reference AABB implementation.
//! - [`mod@render`] — render scheduling hooks for overlay viewports.
//!
//! ```
//! use pointcast::{AabbRaycaster, CursorConfig, CursorEngine, Scene, SurfaceRect};
//!
//! let mut scene = Scene::new();
//! scene.set_surface(SurfaceRect::from_size(800.0, 600.0));
//! let pointer = scene.spawn_at(glam::Vec3::ZERO);
//!
//! let mut engine = CursorEngine::new(CursorConfig::default(), pointer, AabbRaycaster::new());
//! engine.start(&mut scene, 0);
//! engine.tick(&mut scene, 16);
//! assert!(engine.hovered().is_none(), "nothing to intersect yet");
//! ```

pub use pointcast_cursor as cursor;
pub use pointcast_render as render;
pub use pointcast_scene as scene;

pub use pointcast_core::{
    Debouncer, DeviceEvent, EntityId, InputDisposition, Intersection, Ray, SurfaceRect,
    TimerService, TimerToken,
};
pub use pointcast_cursor::{
    map_window_event, CursorConfig, CursorEngine, CursorEventKind, CursorState, DeviceProfile,
    RayOrigin, SessionEvent, SourceMode, TargetEvent,
};
pub use pointcast_render::{RenderSchedule, Sequence, ViewportRegion};
pub use pointcast_scene::{
    Aabb, AabbRaycaster, Camera, EntityStates, Projection, RaycastUpdate, Raycaster, Scene,
};
