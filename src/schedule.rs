//! Cancellable scheduled callbacks.
//!
//! Delayed work in the behavior layer (the modal settle-delay focus, the
//! pulse apply/clear pair) is modeled as data: the scheduler holds
//! `(owner, due, action)` entries against a virtual clock, and the runtime
//! routes due entries back to their owning hooks. Cancellation is explicit
//! through the returned handle, and every pending entry a hook owns is
//! dropped when the hook is destroyed - a fired or cancelled timer never
//! reaches a hook that is gone.

use std::time::Duration;

use crate::hooks::HookId;
use crate::page::ElementId;

/// Handle for cancelling one scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

/// What a due timer does, routed to the owning hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    /// The settle delay elapsed; move focus into the modal.
    FocusSettled,
    /// Apply the pulse class to the element.
    PulseApply(ElementId),
    /// Remove the pulse class from the element.
    PulseClear(ElementId),
}

#[derive(Debug, Clone)]
struct TimerEntry {
    handle: TimerHandle,
    owner: HookId,
    due: Duration,
    action: TimerAction,
}

/// Virtual-clock timer queue.
///
/// Tests advance the clock directly; the async driver advances it from its
/// tick interval. Entries fire in due order, insertion order breaking ties.
#[derive(Debug, Default)]
pub struct Scheduler {
    now: Duration,
    next_handle: u64,
    entries: Vec<TimerEntry>,
}

impl Scheduler {
    /// Creates a scheduler at virtual time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of pending timers.
    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    /// Schedules `action` for `owner` after `delay`, returning the
    /// cancellation handle.
    pub fn schedule(&mut self, owner: HookId, delay: Duration, action: TimerAction) -> TimerHandle {
        self.next_handle += 1;
        let handle = TimerHandle(self.next_handle);
        self.entries.push(TimerEntry {
            handle,
            owner,
            due: self.now + delay,
            action,
        });
        handle
    }

    /// Cancels a pending timer. Returns `false` if it already fired or was
    /// already cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.handle != handle);
        self.entries.len() != before
    }

    /// Drops every pending timer owned by `owner`.
    pub fn cancel_owned(&mut self, owner: HookId) {
        self.entries.retain(|entry| entry.owner != owner);
    }

    /// Advances the clock by `dt`, returning due entries in firing order.
    pub(crate) fn advance(&mut self, dt: Duration) -> Vec<(HookId, TimerAction)> {
        self.now += dt;
        let now = self.now;
        let mut due: Vec<TimerEntry> = self
            .entries
            .iter()
            .filter(|entry| entry.due <= now)
            .cloned()
            .collect();
        self.entries.retain(|entry| entry.due > now);
        due.sort_by_key(|entry| (entry.due, entry.handle.0));
        due.into_iter()
            .map(|entry| (entry.owner, entry.action))
            .collect()
    }
}
