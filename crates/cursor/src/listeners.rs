//! Device-listener subscription tracking.
//!
//! The engine does not own an event loop; the host forwards device events
//! into it. This set records which event classes the engine currently wants,
//! so repeated mode toggles or XR transitions cannot leave duplicate
//! subscriptions behind (flag insertion is idempotent) and unsubscribed
//! classes are ignored on arrival.

use bitflags::bitflags;

bitflags! {
    /// Device event classes the engine is currently subscribed to.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ListenerSet: u8 {
        /// Default canvas press/release events (mouse down/up, touch
        /// start/end).
        const CANVAS_DOWN_UP = 1;
        /// Pointer movement events (mouse move, touch move). Present only
        /// in mouse ray-origin mode.
        const POINTER_MOVE = 1 << 1;
        /// Host-named custom down/up events; replaces `CANVAS_DOWN_UP`.
        const CUSTOM_DOWN_UP = 1 << 2;
        /// VR select start/end from an active XR session.
        const XR_SELECT = 1 << 3;
    }
}
