//! The outputs of a run, with a few summary statistics.

use shuttle_core::{BusId, SimTime};
use shuttle_fleet::{HistoryLedger, TripLog};

/// Everything a reporting collaborator needs from a finished (or paused)
/// run.
#[derive(Debug, Clone)]
pub struct SimReport {
    /// Every participant, in arrival order.
    pub ledger: HistoryLedger,

    /// Every departure, in departure order.
    pub trips: TripLog,

    /// Completed trips per bus, in `BusId` order.
    pub travels: Vec<(BusId, u32)>,

    /// Virtual time of the last event fired.
    pub final_time: SimTime,
}

impl SimReport {
    /// Participants carried away by a bus.
    pub fn served(&self) -> usize {
        self.ledger
            .iter()
            .filter(|p| p.departure_time.is_some())
            .count()
    }

    /// Participants still waiting (or seated on a bus that has not left).
    pub fn stranded(&self) -> usize {
        self.ledger.len() - self.served()
    }

    /// Mean queue time over boarded participants.
    pub fn mean_waiting_time(&self) -> Option<f64> {
        mean(self.ledger.iter().filter_map(|p| p.waiting_time()))
    }

    /// Mean `boarded / capacity` over all departures.
    pub fn mean_load_factor(&self) -> Option<f64> {
        mean(self.trips.iter().map(|t| t.load_factor()))
    }

    /// Departures that left with free seats.
    pub fn early_departures(&self) -> usize {
        self.trips.iter().filter(|t| t.boarded < t.capacity).count()
    }

    pub fn total_travels(&self) -> u32 {
        self.travels.iter().map(|&(_, n)| n).sum()
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}
