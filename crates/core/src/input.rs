//! Unified device-event vocabulary for the pointer engine.
//!
//! Mouse, touch, the single VR select gesture, and user-named custom events
//! all arrive through [`DeviceEvent`]. Anything richer (multi-touch, gamepad
//! axes) is out of scope for the engine and stays with the host.

use glam::Vec2;

/// A single input event delivered to the pointer engine by the host loop.
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceEvent {
    /// Mouse moved over the surface, position in window device pixels.
    MouseMove {
        /// Pointer position in window device pixels.
        position: Vec2,
    },
    /// Primary mouse button pressed.
    MouseDown,
    /// Primary mouse button released.
    MouseUp,
    /// First touch point began. Carries the touch position because no move
    /// event precedes it.
    TouchStart {
        /// Touch position in window device pixels.
        position: Vec2,
    },
    /// First touch point moved.
    TouchMove {
        /// Touch position in window device pixels.
        position: Vec2,
    },
    /// First touch point lifted.
    TouchEnd,
    /// VR controller select gesture began.
    SelectStart,
    /// VR controller select gesture ended.
    SelectEnd,
    /// A host-defined event, matched against the configured custom
    /// down/up event name lists.
    Named {
        /// Host-defined event name.
        name: String,
    },
}

impl DeviceEvent {
    /// Pointer position carried by the event, if any.
    pub fn position(&self) -> Option<Vec2> {
        match self {
            Self::MouseMove { position }
            | Self::TouchStart { position }
            | Self::TouchMove { position } => Some(*position),
            _ => None,
        }
    }

    /// True for touch-family events, which suppress default host handling.
    pub fn is_touch(&self) -> bool {
        matches!(
            self,
            Self::TouchStart { .. } | Self::TouchMove { .. } | Self::TouchEnd
        )
    }
}

/// What the engine did with a device event, so the host can decide whether
/// to run its default handling (scrolling, text selection, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputDisposition {
    /// The engine acted on the event and the host should suppress defaults.
    Consumed,
    /// The engine acted on the event; default handling may proceed.
    Handled,
    /// The event was not relevant to the engine's current subscriptions.
    Ignored,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_only_on_move_like_events() {
        assert!(DeviceEvent::MouseMove {
            position: Vec2::ZERO
        }
        .position()
        .is_some());
        assert!(DeviceEvent::MouseDown.position().is_none());
        assert!(DeviceEvent::SelectStart.position().is_none());
    }

    #[test]
    fn touch_family_is_classified() {
        assert!(DeviceEvent::TouchEnd.is_touch());
        assert!(!DeviceEvent::MouseUp.is_touch());
    }
}
