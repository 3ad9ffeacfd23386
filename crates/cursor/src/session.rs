//! Live state of one pointer engine instance.

use pointcast_core::{EntityId, TimerToken};

/// The interaction arbiter's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorState {
    /// No hover target.
    #[default]
    Idle,
    /// A target is hovered; no fuse timer is running.
    Hovering,
    /// A target is hovered and the fuse dwell timer is running.
    Fusing,
}

/// Mutable per-session state: the hover relation, the in-flight gesture
/// record, and the fuse timer handle.
///
/// Invariants maintained by the engine: at most one hovered target; a set
/// fuse timer implies `state == Fusing`; `pressed` is only meaningful while
/// a down/up pair is being resolved.
#[derive(Debug, Default)]
pub struct PointerSession {
    pub(crate) state: CursorState,
    pub(crate) hovered: Option<EntityId>,
    pub(crate) pressed: Option<EntityId>,
    pub(crate) is_down: bool,
    pub(crate) fuse_timer: Option<TimerToken>,
    pub(crate) hover_cursor: bool,
}

impl PointerSession {
    /// Current arbiter state.
    pub fn state(&self) -> CursorState {
        self.state
    }

    /// The hovered target, if any.
    pub fn hovered(&self) -> Option<EntityId> {
        self.hovered
    }

    /// The target that received the most recent unresolved press, if any.
    pub fn pressed_target(&self) -> Option<EntityId> {
        self.pressed
    }

    /// True between a down event and its matching up event.
    pub fn is_down(&self) -> bool {
        self.is_down
    }

    /// True while the hover cursor style applies (screen mode, styles
    /// enabled, target hovered).
    pub fn hover_cursor(&self) -> bool {
        self.hover_cursor
    }
}
