#![warn(missing_docs)]
//! Pointer interaction engine: hover arbitration, fuse (dwell) clicks, and
//! press/release/click gesture pairing over an injected raycaster.
//!
//! The engine is host-driven and single-threaded: the embedding loop calls
//! [`CursorEngine::tick`] once per frame, forwards device events through
//! [`CursorEngine::handle_device_event`], and passes explicit `now_ms`
//! timestamps everywhere, so every timed behavior is deterministic.

pub mod canvas;
pub mod config;
pub mod device;
pub mod engine;
pub mod events;
pub mod listeners;
pub mod ray;
pub mod session;

pub use canvas::CanvasTracker;
pub use config::{ConfigError, CursorConfig, DeviceProfile, RayOrigin, SourceMode};
pub use device::map_window_event;
pub use engine::CursorEngine;
pub use events::{CursorEventKind, EventBus, SessionEvent, TargetEvent};
pub use listeners::ListenerSet;
pub use ray::RayResolver;
pub use session::{CursorState, PointerSession};
