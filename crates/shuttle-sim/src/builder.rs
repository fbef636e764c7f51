//! Fluent builder for constructing a [`Sim`].

use shuttle_core::{BusId, ProcessId, SimRng};
use shuttle_fleet::{ArrivalGenerator, BusDispatcher, HistoryLedger, Resume, ShuttleConfig, TripLog};
use shuttle_kernel::{EventQueue, Store};

use crate::{Sim, SimError, SimResult};

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`ShuttleConfig`]: fleet, policy thresholds, arrival and travel
///   parameters, seed, …
///
/// # Optional inputs (have defaults)
///
/// | Method                 | Default                                 |
/// |------------------------|-----------------------------------------|
/// | `.capacities(v)`       | `config.bus_capacity` for every bus     |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config)
///     .capacities(vec![20, 20, 40])
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// let report = sim.into_report();
/// ```
pub struct SimBuilder {
    config:     ShuttleConfig,
    capacities: Option<Vec<u32>>,
}

impl SimBuilder {
    pub fn new(config: ShuttleConfig) -> Self {
        Self { config, capacities: None }
    }

    /// Give each bus its own capacity (must be length `fleet_size`).
    pub fn capacities(mut self, capacities: Vec<u32>) -> Self {
        self.capacities = Some(capacities);
        self
    }

    /// Validate inputs, create the processes, and schedule their start at
    /// time zero: the arrival generator first, then buses in `BusId` order.
    pub fn build(self) -> SimResult<Sim> {
        self.config.validate()?;
        let fleet_size = self.config.fleet_size as usize;

        // ── Validate and resolve optional inputs ──────────────────────────
        let capacities = match self.capacities {
            Some(c) => {
                if c.len() != fleet_size {
                    return Err(SimError::FleetSizeMismatch {
                        expected: fleet_size,
                        got:      c.len(),
                    });
                }
                if let Some(i) = c.iter().position(|&cap| cap == 0) {
                    return Err(SimError::Config(format!("bus {i} has zero capacity")));
                }
                c
            }
            None => vec![self.config.bus_capacity; fleet_size],
        };

        let dispatchers: Vec<BusDispatcher> = capacities
            .iter()
            .enumerate()
            .map(|(i, &cap)| BusDispatcher::new(BusId(i as u32), cap, self.config.smart_driver))
            .collect();

        // ── Schedule process starts ───────────────────────────────────────
        let mut events = EventQueue::new();
        events.schedule_now((ProcessId::Arrivals, Resume::Start));
        for d in &dispatchers {
            events.schedule_now((ProcessId::Bus(d.bus().id), Resume::Start));
        }

        Ok(Sim {
            rng:         SimRng::new(self.config.seed),
            passengers:  Store::unbounded(),
            registry:    Store::with_capacity(self.config.boarding_slots),
            config:      self.config,
            events,
            arrivals:    ArrivalGenerator::new(),
            dispatchers,
            ledger:      HistoryLedger::new(),
            trips:       TripLog::new(),
            transitions: Vec::new(),
        })
    }
}
