//! Deferred-work primitives: single-shot timers with cancel tokens and a
//! trailing-edge debouncer.
//!
//! There is no ambient clock anywhere in the engine. Hosts pass `now_ms`
//! (milliseconds on any monotonic timeline) into every call that can schedule
//! or fire deferred work, and poll at their own cadence. This keeps every
//! timing-dependent behavior deterministic under test.

/// Handle to a scheduled timer. Tokens are never reused, so a token held
/// after cancellation can never match a later timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

#[derive(Debug)]
struct TimerEntry {
    token: TimerToken,
    deadline_ms: u64,
}

/// Single-shot timer queue polled with explicit time.
///
/// Scheduling returns a [`TimerToken`]; cancelling removes the entry before
/// it can fire. [`TimerService::poll`] returns every token whose deadline
/// has passed, in deadline order, and forgets them.
#[derive(Debug, Default)]
pub struct TimerService {
    next_token: u64,
    entries: Vec<TimerEntry>,
}

impl TimerService {
    /// Create an empty timer service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a single-shot timer `delay_ms` from `now_ms`.
    pub fn schedule(&mut self, now_ms: u64, delay_ms: u64) -> TimerToken {
        self.next_token += 1;
        let token = TimerToken(self.next_token);
        self.entries.push(TimerEntry {
            token,
            deadline_ms: now_ms.saturating_add(delay_ms),
        });
        token
    }

    /// Cancel a pending timer. Returns false if the token already fired or
    /// was cancelled; that case is tolerated, not an error.
    pub fn cancel(&mut self, token: TimerToken) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.token != token);
        self.entries.len() != before
    }

    /// True while the token's timer is scheduled and has not fired.
    pub fn is_pending(&self, token: TimerToken) -> bool {
        self.entries.iter().any(|e| e.token == token)
    }

    /// Collect every timer whose deadline is at or before `now_ms`,
    /// in deadline order. Fired timers are removed.
    pub fn poll(&mut self, now_ms: u64) -> Vec<TimerToken> {
        let mut fired: Vec<TimerEntry> = Vec::new();
        let mut i = 0;
        while i < self.entries.len() {
            if self.entries[i].deadline_ms <= now_ms {
                fired.push(self.entries.swap_remove(i));
            } else {
                i += 1;
            }
        }
        fired.sort_by_key(|e| e.deadline_ms);
        fired.into_iter().map(|e| e.token).collect()
    }
}

/// Trailing-edge debouncer: a burst of triggers produces one firing,
/// `delay_ms` after the last trigger in the burst.
#[derive(Debug)]
pub struct Debouncer {
    delay_ms: u64,
    deadline_ms: Option<u64>,
}

impl Debouncer {
    /// Create a debouncer with the given trailing delay.
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            deadline_ms: None,
        }
    }

    /// Record a trigger, pushing the pending deadline out to
    /// `now_ms + delay_ms`.
    pub fn trigger(&mut self, now_ms: u64) {
        self.deadline_ms = Some(now_ms.saturating_add(self.delay_ms));
    }

    /// True while a firing is pending.
    pub fn is_pending(&self) -> bool {
        self.deadline_ms.is_some()
    }

    /// Returns true exactly once per burst, when the trailing deadline has
    /// passed.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        match self.deadline_ms {
            Some(deadline) if deadline <= now_ms => {
                self.deadline_ms = None;
                true
            }
            _ => false,
        }
    }

    /// Drop any pending firing.
    pub fn reset(&mut self) {
        self.deadline_ms = None;
    }
}
