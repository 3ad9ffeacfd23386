#![warn(missing_docs)]
//! Render scheduling hooks for overlay and secondary-viewport features.
//!
//! The pointer engine itself does no rendering. This crate carries the
//! scheduling surface those layered features need: hook lists that run
//! before/after (or instead of) the host's primary render call, and the
//! viewport-region bookkeeping for drawing an overlay into a sub-rectangle
//! of the surface.

pub mod schedule;
pub mod viewport;

pub use schedule::{HookId, RenderSchedule, Sequence};
pub use viewport::{ViewportRegion, ViewportTarget, with_region};
