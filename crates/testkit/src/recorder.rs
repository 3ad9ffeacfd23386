//! Event stream capture for assertions on dual emission.

use anyhow::Result;
use pointcast_core::EntityId;
use pointcast_cursor::CursorEngine;
use pointcast_scene::Raycaster;
use serde::Serialize;
use std::cell::RefCell;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::rc::Rc;

/// Which side of a dual emission the record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EventSide {
    /// The pointer session's listeners.
    Session,
    /// A target entity's listeners.
    Target,
}

/// One captured interaction event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordedEvent {
    /// Side the listener was registered on.
    pub side: EventSide,
    /// Canonical event name (`"mouseenter"`, `"click"`, ...).
    pub kind: &'static str,
    /// Target-side records: the entity whose listener fired.
    pub listener: Option<EntityId>,
    /// Session-side records: the hovered target in the payload.
    pub intersected: Option<EntityId>,
    /// Hit distance from the intersection payload, when present.
    pub distance: Option<f32>,
}

/// Captures session- and target-side emissions into one shared, ordered
/// stream.
#[derive(Debug, Clone, Default)]
pub struct EventRecorder {
    events: Rc<RefCell<Vec<RecordedEvent>>>,
}

impl EventRecorder {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record every session-side emission of `engine`.
    pub fn attach_session<R: Raycaster>(&self, engine: &mut CursorEngine<R>) {
        let events = self.events.clone();
        engine.on_session_event(move |event| {
            events.borrow_mut().push(RecordedEvent {
                side: EventSide::Session,
                kind: event.kind.as_str(),
                listener: None,
                intersected: event.intersected,
                distance: event.intersection.map(|hit| hit.distance),
            });
        });
    }

    /// Record every emission delivered to `target`.
    pub fn attach_target<R: Raycaster>(&self, engine: &mut CursorEngine<R>, target: EntityId) {
        let events = self.events.clone();
        engine.on_target_event(target, move |event| {
            events.borrow_mut().push(RecordedEvent {
                side: EventSide::Target,
                kind: event.kind.as_str(),
                listener: Some(target),
                intersected: None,
                distance: event.intersection.map(|hit| hit.distance),
            });
        });
    }

    /// Snapshot of everything recorded so far, in emission order.
    pub fn events(&self) -> Vec<RecordedEvent> {
        self.events.borrow().clone()
    }

    /// Drain the recorded stream.
    pub fn take(&self) -> Vec<RecordedEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    /// Discard everything recorded so far.
    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    /// Session-side event names, in order.
    pub fn session_kinds(&self) -> Vec<&'static str> {
        self.events
            .borrow()
            .iter()
            .filter(|event| event.side == EventSide::Session)
            .map(|event| event.kind)
            .collect()
    }

    /// Event names delivered to `target`, in order.
    pub fn target_kinds(&self, target: EntityId) -> Vec<&'static str> {
        self.events
            .borrow()
            .iter()
            .filter(|event| event.listener == Some(target))
            .map(|event| event.kind)
            .collect()
    }

    /// Number of session-side emissions of `kind` (each logical event is
    /// session-emitted exactly once, so this counts logical events).
    pub fn count(&self, kind: &str) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|event| event.side == EventSide::Session && event.kind == kind)
            .count()
    }

    /// Dump the stream as newline-delimited JSON, for diffing failed runs.
    pub fn write_jsonl<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut file = File::create(path)?;
        for event in self.events.borrow().iter() {
            let line = serde_json::to_string(event)?;
            file.write_all(line.as_bytes())?;
            file.write_all(b"\n")?;
        }
        Ok(())
    }
}
