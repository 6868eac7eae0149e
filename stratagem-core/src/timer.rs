//! Logical one-shot timers.
//!
//! Timers never run code on their own. [`TimerQueue::expire`] hands back every
//! timer whose deadline has passed, and the event loop enqueues them behind
//! whatever input is already waiting. Each timer carries the interaction
//! epoch it was scheduled in so a late delivery can be recognised and dropped.

use std::collections::{BTreeMap, HashMap};
use std::time::{Duration, Instant};

/// Handle returned by [`Scheduler::schedule_once`]. Handles are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

/// Which dwell period a timer ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DwellKind {
    Match,
    Failure,
}

/// Payload delivered when a timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DwellTimer {
    pub kind: DwellKind,
    pub epoch: u64,
}

pub trait Scheduler {
    fn schedule_once(&mut self, delay: Duration, timer: DwellTimer) -> TimerHandle;

    /// Cancel a pending timer. Unknown, fired and already cancelled handles
    /// are ignored.
    fn cancel(&mut self, handle: TimerHandle);
}

/// Deadline-ordered timer queue driven by an externally supplied clock.
#[derive(Debug)]
pub struct TimerQueue {
    now: Instant,
    next_handle: u64,
    pending: BTreeMap<(Instant, TimerHandle), DwellTimer>,
    deadlines: HashMap<TimerHandle, Instant>,
}

impl TimerQueue {
    pub fn new(now: Instant) -> Self {
        Self {
            now,
            next_handle: 0,
            pending: BTreeMap::new(),
            deadlines: HashMap::new(),
        }
    }

    /// Clock value used as the base for new deadlines.
    pub fn now(&self) -> Instant {
        self.now
    }

    /// Advance the clock and remove every timer due at or before `now`, in
    /// deadline order (ties in scheduling order).
    pub fn expire(&mut self, now: Instant) -> Vec<(TimerHandle, DwellTimer)> {
        if now > self.now {
            self.now = now;
        }
        let mut fired = Vec::new();
        while let Some(entry) = self.pending.first_entry() {
            let (deadline, handle) = *entry.key();
            if deadline > self.now {
                break;
            }
            let timer = entry.remove();
            self.deadlines.remove(&handle);
            fired.push((handle, timer));
        }
        fired
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.keys().next().map(|(deadline, _)| *deadline)
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.deadlines.contains_key(&handle)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl Scheduler for TimerQueue {
    fn schedule_once(&mut self, delay: Duration, timer: DwellTimer) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        let deadline = self.now + delay;
        self.pending.insert((deadline, handle), timer);
        self.deadlines.insert(handle, deadline);
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if let Some(deadline) = self.deadlines.remove(&handle) {
            self.pending.remove(&(deadline, handle));
        }
    }
}
