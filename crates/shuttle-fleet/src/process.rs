//! The `Process` trait: a suspendable unit of simulated activity.

use shuttle_core::ProcessId;

use crate::{Command, FleetResult, ProcessContext, Resume};

/// A cooperative process written as an explicit state machine.
///
/// The simulation calls [`resume`][Self::resume] once at start
/// (`Resume::Start`) and then once each time the suspension named by the
/// previously returned [`Command`] completes.  A process never blocks; it
/// always returns the next thing it is waiting for.
pub trait Process {
    fn id(&self) -> ProcessId;

    /// Advance to the next suspension point.
    ///
    /// # Errors
    /// A `FleetError` aborts the run: an invalid ledger update or a resume
    /// that does not match the pending command.
    fn resume(&mut self, resume: Resume, ctx: &mut ProcessContext<'_>) -> FleetResult<Command>;
}
