//! The bus dispatcher process: boarding, departure policy, travel.
//!
//! # Cycle
//!
//! ```text
//! Registering ──Registered──▶ Boarding ──(policy says go)──▶ Deregistering
//!      ▲                        │  ▲                               │
//!      │                        └──┘ Passenger                     │ Deregistered
//!      │                                                           ▼
//!      └─────────────── unload ◀──TimeoutElapsed─────────── Traveling
//! ```
//!
//! # Departure policy
//!
//! The policy is evaluated when boarding opens and after every boarding,
//! never while the bus is parked waiting on an empty queue.  A bus keeps
//! boarding while it has free seats and either
//!
//! - it is not smart, or
//! - it has waited at most `smart_wait_time` and is filled to at most
//!   `smart_fill_fraction`, or
//! - it has waited at most `smart_wait_time` and the last boarding gap is
//!   below `smart_last_boarding_gap`.
//!
//! Past `smart_wait_time` a smart bus leaves at its next boarding.  Within
//! it, the bus leaves only once it is above the fill fraction and the last
//! gap reached `smart_last_boarding_gap`.

use shuttle_core::{BusId, ParticipantId, ProcessId, SimTime};

use crate::{
    Bus, Command, FleetError, FleetResult, Process, ProcessContext, Resume, ShuttleConfig,
    Transition, Trip,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    NotStarted,
    Registering,
    Boarding,
    Deregistering,
    Traveling,
}

impl Stage {
    fn describe(self) -> &'static str {
        match self {
            Stage::NotStarted    => "not started",
            Stage::Registering   => "registering for boarding",
            Stage::Boarding      => "boarding",
            Stage::Deregistering => "deregistering",
            Stage::Traveling     => "traveling",
        }
    }
}

/// Bookkeeping for the boarding cycle in progress.
#[derive(Debug, Clone, Default)]
struct BoardingCycle {
    idle_since:              SimTime,
    last_boarding_at:        SimTime,
    gap_since_last_boarding: f64,
    boarded:                 Vec<ParticipantId>,
}

impl BoardingCycle {
    fn open(now: SimTime) -> Self {
        Self {
            idle_since:              now,
            last_boarding_at:        now,
            gap_since_last_boarding: 0.0,
            boarded:                 Vec::new(),
        }
    }
}

/// Drives one [`Bus`] through its boarding/travel cycle forever.
#[derive(Debug)]
pub struct BusDispatcher {
    bus:   Bus,
    stage: Stage,
    cycle: BoardingCycle,
}

impl BusDispatcher {
    /// A dispatcher whose bus starts with the configured smart-driver flag.
    pub fn new(id: BusId, capacity: u32, smart_driver: bool) -> Self {
        Self {
            bus:   Bus::new(id, capacity, smart_driver),
            stage: Stage::NotStarted,
            cycle: BoardingCycle::default(),
        }
    }

    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    /// Participants boarded in the current cycle so far.
    pub fn boarded_this_cycle(&self) -> &[ParticipantId] {
        &self.cycle.boarded
    }

    /// `true` while the bus is open for boarding.
    pub fn is_boarding(&self) -> bool {
        self.stage == Stage::Boarding
    }

    /// The boarding-loop condition.
    pub fn keep_boarding(&self, now: SimTime, config: &ShuttleConfig) -> bool {
        if self.bus.is_full() {
            return false;
        }
        if !self.bus.smart_driver {
            return true;
        }
        let within_wait = now - self.cycle.idle_since <= config.smart_wait_time;
        let under_filled = f64::from(self.bus.passengers_on_board)
            <= f64::from(self.bus.capacity) * config.smart_fill_fraction;
        let still_flowing = self.cycle.gap_since_last_boarding < config.smart_last_boarding_gap;
        within_wait && (under_filled || still_flowing)
    }

    fn unexpected(&self, resume: Resume) -> FleetError {
        FleetError::UnexpectedResume {
            process: ProcessId::Bus(self.bus.id),
            stage: self.stage.describe(),
            resume,
        }
    }

    fn register(&mut self) -> Command {
        self.stage = Stage::Registering;
        Command::Register(self.bus.id)
    }

    fn open_boarding(&mut self, ctx: &mut ProcessContext<'_>) -> FleetResult<Command> {
        let bus = self.bus.id;
        if ctx.config.hybrid
            && self.bus.smart_driver
            && ctx.now.as_f64() >= ctx.config.hybrid_switch_time
        {
            self.bus.smart_driver = false;
            ctx.record(Transition::SmartDisabled { bus });
        }
        ctx.record(Transition::Registered { bus });

        self.bus.passengers_on_board = 0;
        self.cycle = BoardingCycle::open(ctx.now);
        self.stage = Stage::Boarding;
        self.next_boarding_step(ctx)
    }

    fn board(&mut self, participant: ParticipantId, ctx: &mut ProcessContext<'_>) -> FleetResult<Command> {
        let now = ctx.now;
        ctx.ledger.board(participant, self.bus.id, now)?;
        self.cycle.boarded.push(participant);
        self.bus.passengers_on_board += 1;

        if self.bus.smart_driver {
            self.cycle.gap_since_last_boarding = now - self.cycle.last_boarding_at;
            self.cycle.last_boarding_at = now;
        }

        ctx.record(Transition::Boarded {
            bus: self.bus.id,
            participant,
            on_board: self.bus.passengers_on_board,
            capacity: self.bus.capacity,
        });
        self.next_boarding_step(ctx)
    }

    fn next_boarding_step(&mut self, ctx: &mut ProcessContext<'_>) -> FleetResult<Command> {
        if self.keep_boarding(ctx.now, ctx.config) {
            Ok(Command::AwaitPassenger)
        } else {
            self.depart(ctx)
        }
    }

    fn depart(&mut self, ctx: &mut ProcessContext<'_>) -> FleetResult<Command> {
        let now = ctx.now;
        self.bus.travels += 1;
        for &participant in &self.cycle.boarded {
            ctx.ledger.depart(participant, now)?;
        }
        ctx.trips.push(Trip {
            bus:           self.bus.id,
            cycle_started: self.cycle.idle_since,
            departed_at:   now,
            boarded:       self.bus.passengers_on_board,
            capacity:      self.bus.capacity,
            smart:         self.bus.smart_driver,
        });
        ctx.record(Transition::Departed {
            bus:        self.bus.id,
            passengers: self.bus.passengers_on_board,
            early:      !self.bus.is_full(),
        });
        self.stage = Stage::Deregistering;
        Ok(Command::Deregister(self.bus.id))
    }

    fn travel(&mut self, ctx: &mut ProcessContext<'_>) -> FleetResult<Command> {
        ctx.record(Transition::Deregistered { bus: self.bus.id });
        self.bus.traveling = true;
        let sample = ctx
            .rng
            .gaussian(ctx.config.travel_time_mean, ctx.config.travel_time_std)?;
        self.stage = Stage::Traveling;
        // A bus never travels backwards in time.
        Ok(Command::Timeout(sample.max(0.0)))
    }

    fn unload(&mut self, ctx: &mut ProcessContext<'_>) -> Command {
        self.bus.traveling = false;
        self.bus.passengers_on_board = 0;
        ctx.record(Transition::TripEnded { bus: self.bus.id });
        self.register()
    }
}

impl Process for BusDispatcher {
    fn id(&self) -> ProcessId {
        ProcessId::Bus(self.bus.id)
    }

    fn resume(&mut self, resume: Resume, ctx: &mut ProcessContext<'_>) -> FleetResult<Command> {
        match (self.stage, resume) {
            (Stage::NotStarted, Resume::Start) => Ok(self.register()),
            (Stage::Registering, Resume::Registered) => self.open_boarding(ctx),
            (Stage::Boarding, Resume::Passenger(p)) => self.board(p, ctx),
            (Stage::Deregistering, Resume::Deregistered) => self.travel(ctx),
            (Stage::Traveling, Resume::TimeoutElapsed) => Ok(self.unload(ctx)),
            (_, resume) => Err(self.unexpected(resume)),
        }
    }
}
