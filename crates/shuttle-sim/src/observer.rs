//! Simulation observer trait for tracing and data collection.

use shuttle_core::{BusId, ParticipantId, SimTime};
use shuttle_fleet::HistoryLedger;

/// Callbacks invoked by [`Sim`][crate::Sim] at every process state change.
///
/// Every hook defaults to doing nothing; override the ones you need.  Hooks
/// fire after the process that caused them has yielded, in the order the
/// transitions happened.
///
/// # Example
///
/// ```rust,ignore
/// struct Departures(usize);
///
/// impl SimObserver for Departures {
///     fn on_departed(&mut self, _now: SimTime, _bus: BusId, _passengers: u32, _early: bool) {
///         self.0 += 1;
///     }
/// }
/// ```
pub trait SimObserver {
    /// A participant arrived and is about to join the passenger queue.
    fn on_arrival(&mut self, _now: SimTime, _participant: ParticipantId) {}

    /// A bus was admitted to the active-boarding registry.
    fn on_registered(&mut self, _now: SimTime, _bus: BusId) {}

    /// Hybrid mode permanently switched this bus to naive dispatch.
    fn on_smart_disabled(&mut self, _now: SimTime, _bus: BusId) {}

    fn on_boarded(
        &mut self,
        _now:         SimTime,
        _bus:         BusId,
        _participant: ParticipantId,
        _on_board:    u32,
        _capacity:    u32,
    ) {}

    /// A bus closed its doors.  `early` is `true` if it left with free seats.
    fn on_departed(&mut self, _now: SimTime, _bus: BusId, _passengers: u32, _early: bool) {}

    /// A departed bus removed itself from the active-boarding registry.
    fn on_deregistered(&mut self, _now: SimTime, _bus: BusId) {}

    /// A bus is back at the stop, empty.
    fn on_trip_end(&mut self, _now: SimTime, _bus: BusId) {}

    /// Called once when [`Sim::run`][crate::Sim::run] runs out of events.
    fn on_sim_end(&mut self, _now: SimTime, _ledger: &HistoryLedger) {}
}

/// Ignores every hook.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

/// Writes a human-readable trace line per transition through the `log`
/// facade: per-passenger lines at `debug`, departures and the end of the run
/// at `info`.
///
/// Install any `log` backend (e.g. `env_logger`) to see the output.
#[derive(Default)]
pub struct LogObserver;

impl SimObserver for LogObserver {
    fn on_arrival(&mut self, now: SimTime, participant: ParticipantId) {
        log::debug!("{now}: participant {} arrives and joins the queue", participant.0);
    }

    fn on_registered(&mut self, now: SimTime, bus: BusId) {
        log::debug!("{now}: bus {} is at the stop and open for boarding", bus.0);
    }

    fn on_smart_disabled(&mut self, now: SimTime, bus: BusId) {
        log::info!("{now}: bus {} switches to non-smart driving", bus.0);
    }

    fn on_boarded(
        &mut self,
        now:         SimTime,
        bus:         BusId,
        participant: ParticipantId,
        on_board:    u32,
        capacity:    u32,
    ) {
        log::debug!(
            "{now}: bus {} boarded participant {} ({on_board}/{capacity})",
            bus.0,
            participant.0
        );
    }

    fn on_departed(&mut self, now: SimTime, bus: BusId, passengers: u32, early: bool) {
        if early {
            log::info!("{now}: bus {} leaves early with {passengers} passengers", bus.0);
        } else {
            log::info!("{now}: bus {} is full ({passengers} passengers), departing", bus.0);
        }
    }

    fn on_trip_end(&mut self, now: SimTime, bus: BusId) {
        log::debug!("{now}: bus {} unloaded at destination, returning empty", bus.0);
    }

    fn on_sim_end(&mut self, now: SimTime, ledger: &HistoryLedger) {
        log::info!("{now}: simulation finished with {} participants", ledger.len());
    }
}
