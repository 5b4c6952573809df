//! Deterministic one-shot timer service.
//!
//! Provides cancellable deadlines without an event loop: the current instant
//! is passed in explicitly, so a host drives real time and tests drive
//! simulated time through the same code path.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

use slotmap::{SlotMap, new_key_type};

use crate::error::{Result, TimerError};

new_key_type! {
    /// A unique identifier for a pending deadline.
    pub struct TimerId;
}

/// Internal timer data.
#[derive(Debug)]
struct TimerData {
    /// When this timer should fire.
    fire_at: Instant,
    /// Whether this timer is active.
    active: bool,
}

/// An entry in the timer queue (min-heap by fire time).
#[derive(Debug, Clone, Copy)]
struct TimerQueueEntry {
    id: TimerId,
    fire_time: Instant,
}

impl PartialEq for TimerQueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.fire_time == other.fire_time
    }
}

impl Eq for TimerQueueEntry {}

impl PartialOrd for TimerQueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimerQueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap (BinaryHeap is max-heap by default).
        other.fire_time.cmp(&self.fire_time)
    }
}

/// Manages one-shot deadlines.
///
/// Cancelled timers are removed from the slot map immediately but their heap
/// entries are invalidated lazily, when they reach the front of the queue.
#[derive(Debug)]
pub struct DeadlineTimers {
    /// All registered timers.
    timers: SlotMap<TimerId, TimerData>,
    /// Priority queue of pending fires (min-heap by fire time).
    queue: BinaryHeap<TimerQueueEntry>,
}

impl DeadlineTimers {
    /// Create an empty timer service.
    pub fn new() -> Self {
        Self {
            timers: SlotMap::with_key(),
            queue: BinaryHeap::new(),
        }
    }

    /// Start a one-shot timer that fires `after` the given instant.
    ///
    /// Returns the timer ID that can be used to cancel the timer.
    pub fn start_one_shot(&mut self, now: Instant, after: Duration) -> TimerId {
        let fire_at = now + after;

        let id = self.timers.insert(TimerData {
            fire_at,
            active: true,
        });
        self.queue.push(TimerQueueEntry {
            id,
            fire_time: fire_at,
        });

        id
    }

    /// Cancel a pending timer.
    ///
    /// Returns an error if the timer has already fired or been cancelled.
    pub fn cancel(&mut self, id: TimerId) -> Result<()> {
        if let Some(timer) = self.timers.get_mut(id) {
            timer.active = false;
            self.timers.remove(id);
            Ok(())
        } else {
            Err(TimerError::InvalidTimerId.into())
        }
    }

    /// Check if a timer is still pending.
    pub fn is_active(&self, id: TimerId) -> bool {
        self.timers.get(id).is_some_and(|t| t.active)
    }

    /// Get the instant at which the next pending timer fires, if any.
    pub fn next_deadline(&mut self) -> Option<Instant> {
        // Clean up any cancelled timers from the front of the queue.
        while let Some(entry) = self.queue.peek() {
            if self.timers.get(entry.id).is_some_and(|t| t.active) {
                break;
            }
            self.queue.pop();
        }

        self.queue.peek().map(|entry| entry.fire_time)
    }

    /// Pop all timers whose deadlines have been reached at `now`.
    ///
    /// Returns the fired timer ids in deadline order. Fired timers are
    /// removed; cancelled entries encountered along the way are discarded.
    #[tracing::instrument(skip(self), target = "horizon_select_core::timer", level = "trace")]
    pub fn process_expired(&mut self, now: Instant) -> Vec<TimerId> {
        let mut fired = Vec::new();

        while let Some(entry) = self.queue.peek() {
            if entry.fire_time > now {
                break;
            }

            let entry = *entry;
            self.queue.pop();

            // Skip entries whose timer was cancelled after queueing.
            let Some(timer) = self.timers.get_mut(entry.id) else {
                continue;
            };
            if !timer.active {
                continue;
            }

            tracing::trace!(target: "horizon_select_core::timer", id = ?entry.id, "timer fired");
            timer.active = false;
            self.timers.remove(entry.id);
            fired.push(entry.id);
        }

        fired
    }

    /// Get the number of pending timers.
    pub fn active_count(&self) -> usize {
        self.timers.iter().filter(|(_, t)| t.active).count()
    }
}

impl Default for DeadlineTimers {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_shot_fires_once() {
        let mut timers = DeadlineTimers::new();
        let t0 = Instant::now();

        let id = timers.start_one_shot(t0, Duration::from_millis(500));
        assert!(timers.is_active(id));

        // Not yet due.
        assert!(timers.process_expired(t0 + Duration::from_millis(499)).is_empty());
        assert!(timers.is_active(id));

        // Due exactly at the deadline.
        let fired = timers.process_expired(t0 + Duration::from_millis(500));
        assert_eq!(fired, vec![id]);
        assert!(!timers.is_active(id));

        // Never fires again.
        assert!(timers.process_expired(t0 + Duration::from_secs(10)).is_empty());
    }

    #[test]
    fn test_cancel_prevents_fire() {
        let mut timers = DeadlineTimers::new();
        let t0 = Instant::now();

        let id = timers.start_one_shot(t0, Duration::from_millis(100));
        assert!(timers.cancel(id).is_ok());
        assert!(!timers.is_active(id));

        assert!(timers.process_expired(t0 + Duration::from_secs(1)).is_empty());
    }

    #[test]
    fn test_cancel_unknown_id_errors() {
        let mut timers = DeadlineTimers::new();
        let t0 = Instant::now();

        let id = timers.start_one_shot(t0, Duration::from_millis(1));
        timers.process_expired(t0 + Duration::from_millis(1));

        // Already fired: the id is gone.
        assert!(timers.cancel(id).is_err());
    }

    #[test]
    fn test_fires_in_deadline_order() {
        let mut timers = DeadlineTimers::new();
        let t0 = Instant::now();

        let late = timers.start_one_shot(t0, Duration::from_millis(300));
        let early = timers.start_one_shot(t0, Duration::from_millis(100));

        let fired = timers.process_expired(t0 + Duration::from_millis(400));
        assert_eq!(fired, vec![early, late]);
    }

    #[test]
    fn test_next_deadline_skips_cancelled() {
        let mut timers = DeadlineTimers::new();
        let t0 = Instant::now();

        let first = timers.start_one_shot(t0, Duration::from_millis(100));
        let second = timers.start_one_shot(t0, Duration::from_millis(200));
        timers.cancel(first).unwrap();

        assert_eq!(timers.next_deadline(), Some(t0 + Duration::from_millis(200)));
        assert_eq!(timers.active_count(), 1);
        assert!(timers.is_active(second));
    }

    #[test]
    fn test_rearming_replaces_deadline() {
        // The typeahead pattern: cancel and restart on every keystroke.
        let mut timers = DeadlineTimers::new();
        let t0 = Instant::now();

        let first = timers.start_one_shot(t0, Duration::from_millis(500));
        let t1 = t0 + Duration::from_millis(300);
        timers.cancel(first).unwrap();
        let second = timers.start_one_shot(t1, Duration::from_millis(500));

        // The original deadline passes without firing.
        assert!(timers.process_expired(t0 + Duration::from_millis(500)).is_empty());

        let fired = timers.process_expired(t1 + Duration::from_millis(500));
        assert_eq!(fired, vec![second]);
    }
}
