//! `Store`: a shared container with blocking `put` and `get`.
//!
//! A process that cannot complete an operation is parked in a FIFO waiting
//! line together with its token `W`.  Every operation then "settles" the
//! store: blocked putters are admitted while there is room and waiting
//! getters are served while a matching item exists, repeating until neither
//! makes progress.  The returned [`Resumption`]s are exactly the waiters
//! whose operation completed, in completion order.
//!
//! Two ways to get:
//!
//! - [`get`][Store::get] takes the oldest item (strict FIFO).
//! - [`take`][Store::take] takes the oldest item equal to a given one.  This
//!   is the bag flavor used when a process removes its own prior insertion.

use std::collections::VecDeque;

/// A waiter whose store operation has completed and must be resumed now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resumption<T, W> {
    /// `put` by this waiter was accepted.
    Stored(W),
    /// `get`/`take` by this waiter obtained `T`.
    Taken(W, T),
}

/// A blocking put/get container.  `capacity: None` means unbounded.
#[derive(Debug)]
pub struct Store<T, W> {
    items:    VecDeque<T>,
    capacity: Option<usize>,
    /// Waiting getters with an optional filter (`Some(x)` only accepts `x`).
    getters:  VecDeque<(W, Option<T>)>,
    /// Waiting putters with the item they are trying to store.
    putters:  VecDeque<(W, T)>,
}

impl<T: PartialEq, W> Store<T, W> {
    /// A store with no capacity bound.
    pub fn unbounded() -> Self {
        Self::with_capacity(None)
    }

    /// A store holding at most `capacity` items (`None` = unbounded).
    pub fn with_capacity(capacity: Option<usize>) -> Self {
        Self {
            items: VecDeque::new(),
            capacity,
            getters: VecDeque::new(),
            putters: VecDeque::new(),
        }
    }

    /// Offer `item`.  If accepted, the result starts with
    /// `Resumption::Stored(waiter)`; otherwise `waiter` is parked until room
    /// frees up.
    pub fn put(&mut self, item: T, waiter: W) -> Vec<Resumption<T, W>> {
        self.putters.push_back((waiter, item));
        self.settle()
    }

    /// Request the oldest item.  If one is available, the result starts with
    /// `Resumption::Taken(waiter, item)`; otherwise `waiter` is parked.
    pub fn get(&mut self, waiter: W) -> Vec<Resumption<T, W>> {
        self.getters.push_back((waiter, None));
        self.settle()
    }

    /// Request the oldest item equal to `wanted`.
    pub fn take(&mut self, wanted: T, waiter: W) -> Vec<Resumption<T, W>> {
        self.getters.push_back((waiter, Some(wanted)));
        self.settle()
    }

    /// Number of stored items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Iterate over stored items, oldest first.
    pub fn items(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    /// Number of processes parked in `get`/`take`.
    pub fn waiting_getters(&self) -> usize {
        self.getters.len()
    }

    /// Number of processes parked in `put`.
    pub fn waiting_putters(&self) -> usize {
        self.putters.len()
    }

    fn has_room(&self) -> bool {
        self.capacity.is_none_or(|cap| self.items.len() < cap)
    }

    fn settle(&mut self) -> Vec<Resumption<T, W>> {
        let mut resumed = Vec::new();
        loop {
            let mut progressed = false;

            // Admit putters strictly in arrival order: a blocked head blocks
            // everyone behind it.
            while self.has_room() {
                let Some((waiter, item)) = self.putters.pop_front() else {
                    break;
                };
                self.items.push_back(item);
                resumed.push(Resumption::Stored(waiter));
                progressed = true;
            }

            // Serve getters in arrival order; a filtered getter with no match
            // stays parked without blocking the ones behind it.
            let mut i = 0;
            while i < self.getters.len() && !self.items.is_empty() {
                let slot = match &self.getters[i].1 {
                    None => Some(0),
                    Some(wanted) => self.items.iter().position(|item| item == wanted),
                };
                match slot {
                    Some(pos) => {
                        let item = self.items.remove(pos);
                        let getter = self.getters.remove(i);
                        if let (Some(item), Some((waiter, _))) = (item, getter) {
                            resumed.push(Resumption::Taken(waiter, item));
                            progressed = true;
                        }
                    }
                    None => i += 1,
                }
            }

            if !progressed {
                return resumed;
            }
        }
    }
}
