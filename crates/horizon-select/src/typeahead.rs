//! Typeahead idle tracking.
//!
//! The typed character buffer itself lives in
//! [`SelectState::keys_so_far`](crate::SelectState); this module owns only
//! the timing side: a single cancellable deadline that, once it elapses,
//! makes the engine raise [`Action::TypeaheadTimeout`](crate::Action) through
//! the normal pipeline.

use std::time::{Duration, Instant};

use horizon_select_core::{DeadlineTimers, TimerId};

/// Tracks the idle-reset deadline for the typeahead buffer.
///
/// At most one deadline is pending at a time. Re-arming cancels the previous
/// deadline; a fire that was queued before a cancellation is discarded by the
/// timer service, so a cleared tracker can never report a stale fire.
#[derive(Debug)]
pub(crate) struct TypeaheadTracker {
    timers: DeadlineTimers,
    pending: Option<TimerId>,
    window: Duration,
}

impl TypeaheadTracker {
    pub(crate) fn new(window: Duration) -> Self {
        Self {
            timers: DeadlineTimers::new(),
            pending: None,
            window,
        }
    }

    /// Restart the idle window from `now`.
    pub(crate) fn arm(&mut self, now: Instant) {
        self.cancel();
        self.pending = Some(self.timers.start_one_shot(now, self.window));
    }

    /// Drop any pending deadline.
    pub(crate) fn cancel(&mut self) {
        if let Some(id) = self.pending.take()
            && self.timers.cancel(id).is_err()
        {
            // The deadline fired (and was drained) before the cancel; there
            // is nothing left to discard.
            tracing::trace!(
                target: "horizon_select::typeahead",
                "cancelled an already-expired deadline"
            );
        }
    }

    /// Whether the pending deadline has elapsed at `now`.
    ///
    /// Consumes the deadline when it has; the caller is expected to raise
    /// the timeout action in response.
    pub(crate) fn expired(&mut self, now: Instant) -> bool {
        let fired = self.timers.process_expired(now);
        match self.pending {
            Some(id) if fired.contains(&id) => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    /// The instant the pending deadline fires, if one is armed.
    pub(crate) fn deadline(&mut self) -> Option<Instant> {
        self.pending.and_then(|_| self.timers.next_deadline())
    }

    /// Change the idle window for subsequent arms.
    pub(crate) fn set_window(&mut self, window: Duration) {
        self.window = window;
    }
}
