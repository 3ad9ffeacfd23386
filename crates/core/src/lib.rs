#![warn(missing_docs)]
//! Core primitives shared across the workspace.

pub mod input;
pub mod ray;
pub mod surface;
pub mod timer;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use input::{DeviceEvent, InputDisposition};
pub use ray::{Intersection, Ray};
pub use surface::SurfaceRect;
pub use timer::{Debouncer, TimerService, TimerToken};

/// Opaque handle to a scene entity.
///
/// Allocated by the scene registry; never reused within a scene's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u64);

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "entity#{}", self.0)
    }
}
