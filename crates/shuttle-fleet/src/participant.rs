//! Participants and the append-only ledgers the run produces.

use shuttle_core::{BusId, ParticipantId, SimTime};

use crate::{FleetError, FleetResult};

/// One passenger's journey through the stop.
///
/// Timestamps are filled in order and never overwritten:
/// `arrival_time <= boarding_time <= departure_time` whenever defined.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Participant {
    pub id:             ParticipantId,
    pub arrival_time:   SimTime,
    pub boarding_time:  Option<SimTime>,
    pub departure_time: Option<SimTime>,
    /// The bus that boarded this participant.
    pub bus:            Option<BusId>,
}

impl Participant {
    pub fn new(id: ParticipantId, arrival_time: SimTime) -> Self {
        Self {
            id,
            arrival_time,
            boarding_time: None,
            departure_time: None,
            bus: None,
        }
    }

    /// Time spent in the queue before boarding.
    pub fn waiting_time(&self) -> Option<f64> {
        self.boarding_time.map(|b| b.since(self.arrival_time))
    }

    /// Time spent seated on a bus that had not yet left.
    pub fn onboard_wait(&self) -> Option<f64> {
        match (self.boarding_time, self.departure_time) {
            (Some(b), Some(d)) => Some(d.since(b)),
            _ => None,
        }
    }

    fn board(&mut self, bus: BusId, at: SimTime) -> FleetResult<()> {
        if self.boarding_time.is_some() {
            return Err(FleetError::AlreadyBoarded(self.id));
        }
        self.boarding_time = Some(at);
        self.bus = Some(bus);
        Ok(())
    }

    fn depart(&mut self, at: SimTime) -> FleetResult<()> {
        if self.boarding_time.is_none() || self.departure_time.is_some() {
            return Err(FleetError::InvalidDeparture(self.id));
        }
        self.departure_time = Some(at);
        Ok(())
    }
}

// ── HistoryLedger ─────────────────────────────────────────────────────────────

/// Append-only record of every participant, in arrival order.
///
/// `ParticipantId`s are handed out densely from 0, so the id doubles as the
/// index into the ledger.
#[derive(Debug, Default, Clone)]
pub struct HistoryLedger {
    participants: Vec<Participant>,
}

impl HistoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new arrival and return its id.
    ///
    /// # Errors
    /// `FleetError::LedgerFull` once ids no longer fit a `ParticipantId`.
    pub fn append(&mut self, arrival_time: SimTime) -> FleetResult<ParticipantId> {
        let len = self.participants.len();
        let id = ParticipantId::try_from(len).map_err(|_| FleetError::LedgerFull(len))?;
        self.participants.push(Participant::new(id, arrival_time));
        Ok(id)
    }

    /// Stamp `boarding_time` (and the carrying bus) on `id`.
    ///
    /// # Errors
    /// Unknown id, or the participant already boarded.
    pub fn board(&mut self, id: ParticipantId, bus: BusId, at: SimTime) -> FleetResult<()> {
        self.get_mut(id)?.board(bus, at)
    }

    /// Stamp `departure_time` on `id`.
    ///
    /// # Errors
    /// Unknown id, not yet boarded, or already departed.
    pub fn depart(&mut self, id: ParticipantId, at: SimTime) -> FleetResult<()> {
        self.get_mut(id)?.depart(at)
    }

    pub fn get(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Participant> {
        self.participants.iter()
    }

    pub fn as_slice(&self) -> &[Participant] {
        &self.participants
    }

    fn get_mut(&mut self, id: ParticipantId) -> FleetResult<&mut Participant> {
        self.participants
            .get_mut(id.index())
            .ok_or(FleetError::UnknownParticipant(id))
    }
}

// ── TripLog ───────────────────────────────────────────────────────────────────

/// One departure of one bus.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trip {
    pub bus:           BusId,
    /// When the bus opened for boarding this cycle.
    pub cycle_started: SimTime,
    pub departed_at:   SimTime,
    pub boarded:       u32,
    pub capacity:      u32,
    /// Whether the early-departure heuristic was active for this cycle.
    pub smart:         bool,
}

impl Trip {
    /// `boarded / capacity`, in `[0, 1]`.
    pub fn load_factor(&self) -> f64 {
        f64::from(self.boarded) / f64::from(self.capacity)
    }
}

/// Append-only record of every departure, in departure order.
#[derive(Debug, Default, Clone)]
pub struct TripLog {
    trips: Vec<Trip>,
}

impl TripLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, trip: Trip) {
        self.trips.push(trip);
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Trip> {
        self.trips.iter()
    }

    pub fn as_slice(&self) -> &[Trip] {
        &self.trips
    }
}
