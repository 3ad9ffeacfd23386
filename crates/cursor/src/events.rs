//! Interaction events and the dual-emission bus.
//!
//! Every logical event is delivered twice: to session-scoped listeners (the
//! pointer's side) and, when a hover target exists, to that target's
//! listeners. The two registries are independent; registering on one never
//! affects the other.

use pointcast_core::{EntityId, Intersection};
use std::collections::HashMap;

/// The interaction event vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CursorEventKind {
    /// The pointer began hovering a target.
    MouseEnter,
    /// The pointer stopped hovering a target.
    MouseLeave,
    /// A press gesture began.
    MouseDown,
    /// A press gesture ended.
    MouseUp,
    /// A click resolved (press/release pair or fuse dwell).
    Click,
    /// A fuse dwell timer started on the hovered target.
    Fusing,
}

impl CursorEventKind {
    /// Canonical lowercase name for logs and recorded streams.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MouseEnter => "mouseenter",
            Self::MouseLeave => "mouseleave",
            Self::MouseDown => "mousedown",
            Self::MouseUp => "mouseup",
            Self::Click => "click",
            Self::Fusing => "fusing",
        }
    }
}

/// Payload delivered to session-scoped listeners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionEvent {
    /// Which event occurred.
    pub kind: CursorEventKind,
    /// The hovered target at emit time, if any.
    pub intersected: Option<EntityId>,
    /// Fresh intersection data for the hovered target, if any.
    pub intersection: Option<Intersection>,
}

/// Payload delivered to target-scoped listeners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetEvent {
    /// Which event occurred.
    pub kind: CursorEventKind,
    /// The pointer entity that emitted the event.
    pub cursor: EntityId,
    /// Fresh intersection data, absent for the synthetic release delivered
    /// to a previously-pressed target the pointer has left.
    pub intersection: Option<Intersection>,
}

type SessionListener = Box<dyn FnMut(&SessionEvent)>;
type TargetListener = Box<dyn FnMut(&TargetEvent)>;

/// Dual-emission pub-sub: one notify call fans out to the session registry
/// and the per-target registry.
#[derive(Default)]
pub struct EventBus {
    session: Vec<SessionListener>,
    targets: HashMap<EntityId, Vec<TargetListener>>,
}

impl EventBus {
    /// Create an empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a session-scoped listener.
    pub fn on_session(&mut self, listener: impl FnMut(&SessionEvent) + 'static) {
        self.session.push(Box::new(listener));
    }

    /// Register a listener for events delivered to `target`.
    pub fn on_target(&mut self, target: EntityId, listener: impl FnMut(&TargetEvent) + 'static) {
        self.targets.entry(target).or_default().push(Box::new(listener));
    }

    /// Drop all listeners registered for `target`.
    pub fn remove_target_listeners(&mut self, target: EntityId) {
        self.targets.remove(&target);
    }

    /// Deliver an event on both sides: session listeners always, target
    /// listeners when `intersected` names a target.
    pub fn notify(
        &mut self,
        kind: CursorEventKind,
        cursor: EntityId,
        intersected: Option<EntityId>,
        intersection: Option<Intersection>,
    ) {
        let session_event = SessionEvent {
            kind,
            intersected,
            intersection,
        };
        for listener in &mut self.session {
            listener(&session_event);
        }

        if let Some(target) = intersected {
            self.notify_target(kind, cursor, target, intersection);
        }
    }

    /// Deliver an event to one target only (the synthetic release path).
    pub fn notify_target(
        &mut self,
        kind: CursorEventKind,
        cursor: EntityId,
        target: EntityId,
        intersection: Option<Intersection>,
    ) {
        let target_event = TargetEvent {
            kind,
            cursor,
            intersection,
        };
        if let Some(listeners) = self.targets.get_mut(&target) {
            for listener in listeners {
                listener(&target_event);
            }
        }
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("session_listeners", &self.session.len())
            .field("target_entities", &self.targets.len())
            .finish()
    }
}
