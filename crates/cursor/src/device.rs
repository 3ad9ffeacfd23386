//! winit adapter: translate window events into the engine's device-event
//! vocabulary.
//!
//! Only the inputs the engine unifies are mapped — primary-button mouse,
//! single-touch, and cursor movement. Everything else returns `None` and
//! stays with the host.

use glam::Vec2;
use pointcast_core::DeviceEvent;
use winit::event::{ElementState, MouseButton, Touch, TouchPhase, WindowEvent};

/// Map a winit window event to a pointer device event, if it is one the
/// engine consumes.
pub fn map_window_event(event: &WindowEvent) -> Option<DeviceEvent> {
    match event {
        WindowEvent::CursorMoved { position, .. } => Some(DeviceEvent::MouseMove {
            position: Vec2::new(position.x as f32, position.y as f32),
        }),
        WindowEvent::MouseInput {
            state,
            button: MouseButton::Left,
            ..
        } => Some(match state {
            ElementState::Pressed => DeviceEvent::MouseDown,
            ElementState::Released => DeviceEvent::MouseUp,
        }),
        WindowEvent::Touch(Touch {
            phase, location, ..
        }) => {
            let position = Vec2::new(location.x as f32, location.y as f32);
            Some(match phase {
                TouchPhase::Started => DeviceEvent::TouchStart { position },
                TouchPhase::Moved => DeviceEvent::TouchMove { position },
                TouchPhase::Ended | TouchPhase::Cancelled => DeviceEvent::TouchEnd,
            })
        }
        _ => None,
    }
}
