/// FrameScheduler - frame-driven one-shot timers.
///
/// Replaces suspended "wait N seconds, then continue" routines with explicit
/// timers: `schedule` arms a cancelable one-shot timer carrying a payload,
/// `advance` moves the clock by one frame and hands back the payloads of
/// every timer that came due. Timers live in a SlotMap so cancelling is
/// O(1) and a stale key never cancels somebody else's timer.
///
/// The scheduler is started once and keeps running across scene reloads;
/// reloads only `clear` the pending timers.

use std::time::Duration;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle of a pending one-shot timer.
    pub struct TimerKey;
}

struct PendingTimer<T> {
    /// Scheduler time at which the timer fires
    due: Duration,
    /// Insertion order, breaks ties between timers due at the same time
    sequence: u64,
    payload: T,
}

/// Result of one `advance` call.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick<T> {
    /// Frame number of this tick (first tick = 1)
    pub frame: u64,
    /// Scheduler time after this tick
    pub elapsed: Duration,
    /// Payloads of timers that fired, earliest first
    pub fired: Vec<T>,
}

pub struct FrameScheduler<T> {
    running: bool,
    elapsed: Duration,
    frame: u64,
    next_sequence: u64,
    timers: SlotMap<TimerKey, PendingTimer<T>>,
}

impl<T> FrameScheduler<T> {
    /// Create a stopped scheduler with no timers.
    pub fn new() -> Self {
        Self {
            running: false,
            elapsed: Duration::ZERO,
            frame: 0,
            next_sequence: 0,
            timers: SlotMap::with_key(),
        }
    }

    /// Start ticking. Idempotent.
    pub fn start(&mut self) {
        self.running = true;
    }

    /// Stop ticking and drop all pending timers.
    pub fn stop(&mut self) {
        self.running = false;
        self.timers.clear();
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Arm a one-shot timer firing `delay` after the current scheduler time.
    pub fn schedule(&mut self, delay: Duration, payload: T) -> TimerKey {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.timers.insert(PendingTimer {
            due: self.elapsed.saturating_add(delay),
            sequence,
            payload,
        })
    }

    /// Cancel a pending timer, returning its payload.
    ///
    /// Returns `None` if the timer already fired or was cancelled.
    pub fn cancel(&mut self, key: TimerKey) -> Option<T> {
        self.timers.remove(key).map(|timer| timer.payload)
    }

    pub fn is_pending(&self, key: TimerKey) -> bool {
        self.timers.contains_key(key)
    }

    /// Number of timers still waiting to fire.
    pub fn pending_count(&self) -> usize {
        self.timers.len()
    }

    /// Cancel every pending timer. The clock and running state are kept.
    pub fn clear(&mut self) {
        self.timers.clear();
    }

    /// Scheduler time (sum of all deltas while running).
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Number of ticks processed while running.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Advance the clock by one frame of length `delta`.
    ///
    /// Returns `None` while stopped. Otherwise every timer whose due time
    /// is reached is removed and its payload returned, ordered by due time
    /// then by scheduling order.
    pub fn advance(&mut self, delta: Duration) -> Option<Tick<T>> {
        if !self.running {
            return None;
        }

        self.frame += 1;
        self.elapsed = self.elapsed.saturating_add(delta);

        let now = self.elapsed;
        let mut due: Vec<(Duration, u64, TimerKey)> = self.timers
            .iter()
            .filter(|(_, timer)| timer.due <= now)
            .map(|(key, timer)| (timer.due, timer.sequence, key))
            .collect();
        due.sort_unstable_by_key(|&(due, sequence, _)| (due, sequence));

        let fired = due
            .into_iter()
            .filter_map(|(_, _, key)| self.timers.remove(key))
            .map(|timer| timer.payload)
            .collect();

        Some(Tick { frame: self.frame, elapsed: now, fired })
    }
}

impl<T> Default for FrameScheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
