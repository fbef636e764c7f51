//! Mutable run state lent to the process being resumed.

use shuttle_core::{SimRng, SimTime};

use crate::{HistoryLedger, ShuttleConfig, Transition, TripLog};

/// Everything a process may read or write while it runs.
///
/// Built by the simulation for a single resumption.  Only one process runs
/// at a time, so handing out `&mut` to the shared ledgers is sound without
/// any locking.
pub struct ProcessContext<'a> {
    /// Current virtual time.
    pub now: SimTime,

    pub config: &'a ShuttleConfig,

    pub ledger: &'a mut HistoryLedger,

    pub trips: &'a mut TripLog,

    /// The run's single RNG.  Draw order follows event order.
    pub rng: &'a mut SimRng,

    /// Transitions recorded during this resumption, in order.
    pub transitions: &'a mut Vec<Transition>,
}

impl ProcessContext<'_> {
    #[inline]
    pub fn record(&mut self, transition: Transition) {
        self.transitions.push(transition);
    }
}
