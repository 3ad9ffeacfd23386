//! Pre/post/replace hooks around the host's primary render call.

use tracing::warn;

/// Handle to a registered render hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HookId(u64);

/// Where a hook runs relative to the primary render call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sequence {
    /// Before the primary call.
    Before,
    /// After the primary call.
    #[default]
    After,
    /// After the primary call, with the primary call suppressed.
    Replace,
}

type Hook<C> = Box<dyn FnMut(&mut C)>;

/// Hook lists run around the primary render call, plus a suppression
/// counter gating the primary call itself.
///
/// `C` is whatever per-frame context the host passes through (renderer
/// handle, frame data); the schedule never inspects it.
pub struct RenderSchedule<C> {
    next_id: u64,
    pre: Vec<(HookId, Hook<C>)>,
    post: Vec<(HookId, Hook<C>)>,
    suppress_primary: u32,
}

impl<C> RenderSchedule<C> {
    /// Create an empty schedule.
    pub fn new() -> Self {
        Self {
            next_id: 1,
            pre: Vec::new(),
            post: Vec::new(),
            suppress_primary: 0,
        }
    }

    fn allocate_id(&mut self) -> HookId {
        let id = HookId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Register a hook that runs before the primary call.
    pub fn add_pre(&mut self, hook: impl FnMut(&mut C) + 'static) -> HookId {
        let id = self.allocate_id();
        self.pre.push((id, Box::new(hook)));
        id
    }

    /// Remove a pre-hook. Removing one that was never added is tolerated.
    pub fn remove_pre(&mut self, id: HookId) -> bool {
        let before = self.pre.len();
        self.pre.retain(|(hook_id, _)| *hook_id != id);
        self.pre.len() != before
    }

    /// Register a hook that runs after the primary call.
    pub fn add_post(&mut self, hook: impl FnMut(&mut C) + 'static) -> HookId {
        let id = self.allocate_id();
        self.post.push((id, Box::new(hook)));
        id
    }

    /// Remove a post-hook. Removing one that was never added is reported
    /// and tolerated.
    pub fn remove_post(&mut self, id: HookId) -> bool {
        let before = self.post.len();
        self.post.retain(|(hook_id, _)| *hook_id != id);
        if self.post.len() == before {
            warn!("unexpected failure to remove render call");
            false
        } else {
            true
        }
    }

    /// Register a hook according to its sequence, suppressing the primary
    /// call for `Replace`.
    pub fn add_call(&mut self, sequence: Sequence, hook: impl FnMut(&mut C) + 'static) -> HookId {
        match sequence {
            Sequence::Before => self.add_pre(hook),
            Sequence::After => self.add_post(hook),
            Sequence::Replace => {
                self.suppress_primary();
                self.add_post(hook)
            }
        }
    }

    /// Remove a hook registered with [`RenderSchedule::add_call`],
    /// releasing its suppression for `Replace`.
    pub fn remove_call(&mut self, sequence: Sequence, id: HookId) -> bool {
        match sequence {
            Sequence::Before => self.remove_pre(id),
            Sequence::After => self.remove_post(id),
            Sequence::Replace => {
                self.unsuppress_primary();
                self.remove_post(id)
            }
        }
    }

    /// Suppress the primary render call until a matching unsuppress.
    pub fn suppress_primary(&mut self) {
        self.suppress_primary += 1;
    }

    /// Release one suppression of the primary render call. Unsuppressing
    /// below zero is reported and the counter clamped.
    pub fn unsuppress_primary(&mut self) {
        if self.suppress_primary == 0 {
            warn!("unexpected unsuppression of primary render");
            return;
        }
        self.suppress_primary -= 1;
    }

    /// True while the primary call is suppressed.
    pub fn is_primary_suppressed(&self) -> bool {
        self.suppress_primary > 0
    }

    /// Run one frame: pre-hooks in insertion order, the primary call
    /// (unless suppressed), then post-hooks in insertion order.
    pub fn run(&mut self, context: &mut C, primary: impl FnOnce(&mut C)) {
        for (_, hook) in &mut self.pre {
            hook(context);
        }
        if self.suppress_primary == 0 {
            primary(context);
        }
        for (_, hook) in &mut self.post {
            hook(context);
        }
    }
}

impl<C> Default for RenderSchedule<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> std::fmt::Debug for RenderSchedule<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderSchedule")
            .field("pre_hooks", &self.pre.len())
            .field("post_hooks", &self.post.len())
            .field("suppress_primary", &self.suppress_primary)
            .finish()
    }
}
