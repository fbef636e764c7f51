//! What a process asks of the kernel, and what it is resumed with.

use shuttle_core::{BusId, ParticipantId};

/// The suspension a process requests when it yields.
///
/// Produced by [`Process::resume`][crate::Process::resume] and carried out by
/// the simulation loop against the event queue and the two stores.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Resume after `delay` time units (must be `>= 0`).
    Timeout(f64),

    /// Put a participant into the passenger queue.
    Enqueue(ParticipantId),

    /// Get the next participant from the passenger queue.
    AwaitPassenger,

    /// Put this bus into the active-boarding registry.
    Register(BusId),

    /// Remove this bus's own entry from the active-boarding registry.
    Deregister(BusId),

    /// The process is done and will never be resumed again.
    Finish,
}

/// Why a process is being resumed.  Always answers the `Command` it last
/// returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resume {
    /// First activation at simulation start.
    Start,
    /// The requested `Timeout` has elapsed.
    TimeoutElapsed,
    /// `Enqueue` was accepted.
    Enqueued,
    /// `AwaitPassenger` obtained this participant.
    Passenger(ParticipantId),
    /// `Register` was accepted.
    Registered,
    /// `Deregister` completed.
    Deregistered,
}

/// A state change worth reporting.  Processes record these in the
/// [`ProcessContext`][crate::ProcessContext]; the simulation forwards them
/// to its observer.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    Arrived { participant: ParticipantId },
    Registered { bus: BusId },
    SmartDisabled { bus: BusId },
    Boarded { bus: BusId, participant: ParticipantId, on_board: u32, capacity: u32 },
    Departed { bus: BusId, passengers: u32, early: bool },
    Deregistered { bus: BusId },
    TripEnded { bus: BusId },
}
