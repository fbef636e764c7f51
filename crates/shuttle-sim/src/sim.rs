//! The `Sim` struct and its event loop.

use shuttle_core::{BusId, ParticipantId, ProcessId, SimRng, SimTime};
use shuttle_fleet::{
    ArrivalGenerator, BusDispatcher, Command, HistoryLedger, Process, ProcessContext, Resume,
    ShuttleConfig, Transition, TripLog,
};
use shuttle_kernel::{EventQueue, Resumption, Store};

use crate::{SimError, SimObserver, SimReport, SimResult};

/// A pending resumption: which process, answered with what.
pub type Wakeup = (ProcessId, Resume);

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// Each step pops one [`Wakeup`] and runs the target process until it
/// yields its next [`Command`], which is then carried out:
///
/// - `Timeout(d)`      → schedule `TimeoutElapsed` at `now + d`.
/// - `Enqueue(p)`      → `put` into the passenger queue.
/// - `AwaitPassenger`  → `get` from the passenger queue.
/// - `Register(b)`     → `put` into the active-boarding registry.
/// - `Deregister(b)`   → `take` this bus's own entry from the registry.
/// - `Finish`          → nothing; the process is never woken again.
///
/// Store operations that complete are resumed through the event queue at
/// the current time, so simultaneous wake-ups run in the order they were
/// produced.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    /// Validated run configuration.
    pub config: ShuttleConfig,

    /// The virtual clock and pending wake-ups.
    pub events: EventQueue<Wakeup>,

    /// Unbounded FIFO line of waiting participants, shared by all buses.
    pub passengers: Store<ParticipantId, ProcessId>,

    /// Buses currently open for boarding.  Bounded by `boarding_slots`.
    pub registry: Store<BusId, ProcessId>,

    pub arrivals: ArrivalGenerator,

    /// One per bus, indexed by `BusId`.
    pub dispatchers: Vec<BusDispatcher>,

    pub ledger: HistoryLedger,

    pub trips: TripLog,

    pub(crate) rng: SimRng,

    /// Scratch buffer for the transitions of the process being resumed.
    pub(crate) transitions: Vec<Transition>,
}

impl Sim {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run until no events remain.
    ///
    /// Buses never finish, so the run ends once arrivals are over and every
    /// bus is parked on an empty passenger queue or a full registry.
    pub fn run<O: SimObserver + ?Sized>(&mut self, observer: &mut O) -> SimResult<()> {
        while self.step(observer)? {}
        observer.on_sim_end(self.now(), &self.ledger);
        Ok(())
    }

    /// Run every event scheduled at or before `deadline`.  Later events stay
    /// pending and the clock stays at the last event fired.
    pub fn run_until<O: SimObserver + ?Sized>(&mut self, deadline: SimTime, observer: &mut O) -> SimResult<()> {
        while self.events.peek_time().is_some_and(|t| t <= deadline) {
            self.step(observer)?;
        }
        Ok(())
    }

    /// Run while `keep_going` holds before each event (and events remain).
    pub fn run_while<O, F>(&mut self, observer: &mut O, mut keep_going: F) -> SimResult<()>
    where
        O: SimObserver + ?Sized,
        F: FnMut(&Sim) -> bool,
    {
        while keep_going(self) && self.step(observer)? {}
        Ok(())
    }

    /// Fire the next event.  Returns `false` if none was pending.
    pub fn step<O: SimObserver + ?Sized>(&mut self, observer: &mut O) -> SimResult<bool> {
        let Some((now, (process, resume))) = self.events.pop() else {
            return Ok(false);
        };
        let command = self.resume(process, resume, now)?;
        self.notify(now, observer);
        self.execute(process, command)?;
        Ok(true)
    }

    /// Current virtual time.
    pub fn now(&self) -> SimTime {
        self.events.now()
    }

    /// Snapshot of the outputs produced so far.
    pub fn report(&self) -> SimReport {
        SimReport {
            ledger:     self.ledger.clone(),
            trips:      self.trips.clone(),
            travels:    self.travels(),
            final_time: self.now(),
        }
    }

    /// Consume the simulation, keeping only its outputs.
    pub fn into_report(self) -> SimReport {
        let travels = self.travels();
        let final_time = self.now();
        SimReport { ledger: self.ledger, trips: self.trips, travels, final_time }
    }

    fn travels(&self) -> Vec<(BusId, u32)> {
        self.dispatchers
            .iter()
            .map(|d| (d.bus().id, d.bus().travels))
            .collect()
    }

    // ── Core event processing ─────────────────────────────────────────────

    fn resume(&mut self, process: ProcessId, resume: Resume, now: SimTime) -> SimResult<Command> {
        // Explicit field borrows so the borrow checker sees disjoint access.
        let target: &mut dyn Process = match process {
            ProcessId::Arrivals => &mut self.arrivals,
            ProcessId::Bus(bus) => self
                .dispatchers
                .get_mut(bus.index())
                .ok_or(SimError::UnknownProcess(process))?,
        };
        debug_assert_eq!(target.id(), process);
        let mut ctx = ProcessContext {
            now,
            config:      &self.config,
            ledger:      &mut self.ledger,
            trips:       &mut self.trips,
            rng:         &mut self.rng,
            transitions: &mut self.transitions,
        };
        Ok(target.resume(resume, &mut ctx)?)
    }

    fn notify<O: SimObserver + ?Sized>(&mut self, now: SimTime, observer: &mut O) {
        for transition in self.transitions.drain(..) {
            match transition {
                Transition::Arrived { participant } => observer.on_arrival(now, participant),
                Transition::Registered { bus } => observer.on_registered(now, bus),
                Transition::SmartDisabled { bus } => observer.on_smart_disabled(now, bus),
                Transition::Boarded { bus, participant, on_board, capacity } => {
                    observer.on_boarded(now, bus, participant, on_board, capacity)
                }
                Transition::Departed { bus, passengers, early } => {
                    observer.on_departed(now, bus, passengers, early)
                }
                Transition::Deregistered { bus } => observer.on_deregistered(now, bus),
                Transition::TripEnded { bus } => observer.on_trip_end(now, bus),
            }
        }
    }

    fn execute(&mut self, process: ProcessId, command: Command) -> SimResult<()> {
        match command {
            Command::Timeout(delay) => {
                self.events.schedule_in(delay, (process, Resume::TimeoutElapsed))?;
            }
            Command::Enqueue(participant) => {
                let resumed = self.passengers.put(participant, process);
                self.wake_passenger_waiters(resumed);
            }
            Command::AwaitPassenger => {
                let resumed = self.passengers.get(process);
                self.wake_passenger_waiters(resumed);
            }
            Command::Register(bus) => {
                let resumed = self.registry.put(bus, process);
                self.wake_registry_waiters(resumed);
            }
            Command::Deregister(bus) => {
                let resumed = self.registry.take(bus, process);
                self.wake_registry_waiters(resumed);
            }
            Command::Finish => {}
        }
        Ok(())
    }

    fn wake_passenger_waiters(&mut self, resumed: Vec<Resumption<ParticipantId, ProcessId>>) {
        for r in resumed {
            let wakeup = match r {
                Resumption::Stored(w) => (w, Resume::Enqueued),
                Resumption::Taken(w, participant) => (w, Resume::Passenger(participant)),
            };
            self.events.schedule_now(wakeup);
        }
    }

    fn wake_registry_waiters(&mut self, resumed: Vec<Resumption<BusId, ProcessId>>) {
        for r in resumed {
            let wakeup = match r {
                Resumption::Stored(w) => (w, Resume::Registered),
                Resumption::Taken(w, _) => (w, Resume::Deregistered),
            };
            self.events.schedule_now(wakeup);
        }
    }
}
