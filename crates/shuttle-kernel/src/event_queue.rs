//! `EventQueue`: the virtual clock and its pending-event set.
//!
//! # Ordering
//!
//! Events are ordered by `(time, seq)` where `seq` is a counter assigned at
//! insertion.  Two events scheduled for the same instant therefore fire in
//! the order they were scheduled, which is what makes a run reproducible:
//! the heap never has to break a tie on its own.
//!
//! # Performance note
//!
//! `BinaryHeap` gives O(log N) push and pop where N is the number of pending
//! events.  A bus-stop run has at most one pending event per process plus a
//! handful of same-instant resumptions, so N stays tiny.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use shuttle_core::SimTime;

use crate::{SchedulingError, SchedulingResult};

struct Scheduled<E> {
    time:  SimTime,
    seq:   u64,
    event: E,
}

impl<E> PartialEq for Scheduled<E> {
    fn eq(&self, other: &Self) -> bool {
        self.time == other.time && self.seq == other.seq
    }
}

impl<E> Eq for Scheduled<E> {}

impl<E> PartialOrd for Scheduled<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Ord for Scheduled<E> {
    // Reversed: `BinaryHeap` is a max-heap and we want the earliest first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .time
            .cmp(&self.time)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// A min-priority queue of events keyed by virtual time, owning the clock.
///
/// `now` only moves forward, and only inside [`pop`][Self::pop].
pub struct EventQueue<E> {
    heap:     BinaryHeap<Scheduled<E>>,
    now:      SimTime,
    next_seq: u64,
}

impl<E> Default for EventQueue<E> {
    fn default() -> Self {
        Self {
            heap:     BinaryHeap::new(),
            now:      SimTime::ZERO,
            next_seq: 0,
        }
    }
}

impl<E> EventQueue<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time: the time of the most recently popped event.
    #[inline]
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// Schedule `event` at the current instant, behind anything already
    /// scheduled for it.
    pub fn schedule_now(&mut self, event: E) {
        self.push(self.now, event);
    }

    /// Schedule `event` to fire `delay` time units from now.  Returns the
    /// absolute fire time.
    ///
    /// # Errors
    /// Negative and non-finite delays are rejected, never clamped.
    pub fn schedule_in(&mut self, delay: f64, event: E) -> SchedulingResult<SimTime> {
        if !delay.is_finite() {
            return Err(SchedulingError::NonFiniteDelay(delay));
        }
        if delay < 0.0 {
            return Err(SchedulingError::NegativeDelay(delay));
        }
        let at = self.now + delay;
        self.push(at, event);
        Ok(at)
    }

    /// Schedule `event` at absolute time `at`.
    ///
    /// # Errors
    /// `SchedulingError::InPast` if `at` is earlier than `now`.
    pub fn schedule_at(&mut self, at: SimTime, event: E) -> SchedulingResult<()> {
        if at < self.now {
            return Err(SchedulingError::InPast { at, now: self.now });
        }
        self.push(at, event);
        Ok(())
    }

    /// Remove the earliest event, advance the clock to its time and return
    /// both.  Returns `None` when nothing is pending; the clock is left as is.
    pub fn pop(&mut self) -> Option<(SimTime, E)> {
        let next = self.heap.pop()?;
        self.now = next.time;
        Some((next.time, next.event))
    }

    /// Fire time of the earliest pending event, or `None` if empty.
    pub fn peek_time(&self) -> Option<SimTime> {
        self.heap.peek().map(|s| s.time)
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    fn push(&mut self, time: SimTime, event: E) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Scheduled { time, seq, event });
    }
}
