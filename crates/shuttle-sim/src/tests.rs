//! Integration tests for shuttle-sim.

use std::collections::HashMap;

use shuttle_core::{BusId, ParticipantId, SimTime};
use shuttle_fleet::{FleetError, HistoryLedger, ShuttleConfig};

use crate::{NoopObserver, Sim, SimBuilder, SimError, SimObserver, SimReport};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn test_config() -> ShuttleConfig {
    ShuttleConfig {
        fleet_size:     3,
        bus_capacity:   10,
        max_passengers: 300,
        max_sim_time:   10_000.0,
        seed:           42,
        ..ShuttleConfig::default()
    }
}

fn run(config: ShuttleConfig) -> Sim {
    let mut sim = SimBuilder::new(config).build().unwrap();
    sim.run(&mut NoopObserver).unwrap();
    sim
}

fn assert_timestamps_ordered(ledger: &HistoryLedger) {
    let mut prev = SimTime::ZERO;
    for p in ledger.iter() {
        assert!(p.arrival_time >= prev, "arrivals out of order at {}", p.id);
        prev = p.arrival_time;
        if let Some(b) = p.boarding_time {
            assert!(p.arrival_time <= b, "{} boarded before arriving", p.id);
            assert!(p.bus.is_some());
            if let Some(d) = p.departure_time {
                assert!(b <= d, "{} departed before boarding", p.id);
            }
        } else {
            assert!(p.departure_time.is_none());
        }
    }
}

/// Records the per-bus registry membership sequence and the peak number of
/// buses registered at once.
#[derive(Default)]
struct RegistryTracker {
    registered:     HashMap<BusId, bool>,
    open:           usize,
    peak_open:      usize,
    registrations:  usize,
    smart_disabled: Vec<(SimTime, BusId)>,
    arrivals:       usize,
    ended:          bool,
}

impl SimObserver for RegistryTracker {
    fn on_arrival(&mut self, _now: SimTime, _participant: ParticipantId) {
        self.arrivals += 1;
    }

    fn on_registered(&mut self, _now: SimTime, bus: BusId) {
        let was = self.registered.insert(bus, true).unwrap_or(false);
        assert!(!was, "{bus} registered twice without deregistering");
        self.open += 1;
        self.peak_open = self.peak_open.max(self.open);
        self.registrations += 1;
    }

    fn on_deregistered(&mut self, _now: SimTime, bus: BusId) {
        let was = self.registered.insert(bus, false).unwrap_or(false);
        assert!(was, "{bus} deregistered without being registered");
        self.open -= 1;
    }

    fn on_smart_disabled(&mut self, now: SimTime, bus: BusId) {
        self.smart_disabled.push((now, bus));
    }

    fn on_sim_end(&mut self, _now: SimTime, _ledger: &HistoryLedger) {
        self.ended = true;
    }
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_successfully_with_defaults() {
        let sim = SimBuilder::new(ShuttleConfig::default()).build().unwrap();
        assert_eq!(sim.dispatchers.len(), 3);
        assert!(sim.dispatchers.iter().all(|d| d.bus().capacity == 20));
        // One start event per process.
        assert_eq!(sim.events.len(), 4);
        assert_eq!(sim.registry.capacity(), Some(1));
        assert_eq!(sim.passengers.capacity(), None);
    }

    #[test]
    fn capacity_count_mismatch_errors() {
        let result = SimBuilder::new(test_config()).capacities(vec![10, 10]).build();
        assert!(matches!(
            result,
            Err(SimError::FleetSizeMismatch { expected: 3, got: 2 })
        ));
    }

    #[test]
    fn zero_capacity_override_errors() {
        let result = SimBuilder::new(test_config()).capacities(vec![10, 0, 10]).build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn per_bus_capacities_applied() {
        let sim = SimBuilder::new(test_config()).capacities(vec![5, 10, 15]).build().unwrap();
        let caps: Vec<u32> = sim.dispatchers.iter().map(|d| d.bus().capacity).collect();
        assert_eq!(caps, vec![5, 10, 15]);
    }

    #[test]
    fn invalid_config_rejected_before_running() {
        let config = ShuttleConfig { smart_fill_fraction: -0.2, ..test_config() };
        match SimBuilder::new(config).build() {
            Err(SimError::Fleet(FleetError::Config(msg))) => {
                assert!(msg.contains("smart_fill_fraction"))
            }
            other => panic!("expected a configuration error, got {:?}", other.err()),
        }
    }
}

// ── Whole-run invariants ──────────────────────────────────────────────────────

#[cfg(test)]
mod invariants {
    use super::*;

    #[test]
    fn timestamps_are_ordered() {
        let sim = run(test_config());
        assert_timestamps_ordered(&sim.ledger);

        let smart = run(ShuttleConfig { smart_driver: true, ..test_config() });
        assert_timestamps_ordered(&smart.ledger);
    }

    #[test]
    fn naive_buses_only_leave_full() {
        let sim = run(test_config());
        assert!(!sim.trips.is_empty());
        for trip in sim.trips.iter() {
            assert_eq!(trip.boarded, trip.capacity, "{:?}", trip);
            assert!(!trip.smart);
        }
        // Every departed participant left with a full bus of 10.
        assert_eq!(sim.report().served(), sim.trips.len() * 10);
    }

    #[test]
    fn smart_buses_never_exceed_capacity() {
        let config = ShuttleConfig { smart_driver: true, ..test_config() };
        let sim = SimBuilder::new(config)
            .capacities(vec![4, 10, 25])
            .build()
            .and_then(|mut sim| sim.run(&mut NoopObserver).map(|_| sim))
            .unwrap();
        for trip in sim.trips.iter() {
            assert!(trip.boarded >= 1 && trip.boarded <= trip.capacity, "{:?}", trip);
        }
    }

    #[test]
    fn early_departures_follow_the_policy() {
        let config = ShuttleConfig {
            smart_driver: true,
            smart_wait_time: 3.0,
            base_lambda: 0.3,
            peak_factor: 0.0,
            ..test_config()
        };
        let sim = run(config.clone());
        let report = sim.report();
        assert!(report.early_departures() > 0, "low demand should trigger early departures");

        for trip in sim.trips.iter().filter(|t| t.boarded < t.capacity) {
            let waited = trip.departed_at - trip.cycle_started;
            let above_fill = f64::from(trip.boarded) > f64::from(trip.capacity) * config.smart_fill_fraction;
            assert!(trip.smart);
            assert!(waited > config.smart_wait_time || above_fill, "{:?}", trip);
        }
    }

    #[test]
    fn passengers_on_one_trip_share_a_departure_time() {
        let sim = run(ShuttleConfig { smart_driver: true, ..test_config() });
        for trip in sim.trips.iter() {
            let on_trip = sim
                .ledger
                .iter()
                .filter(|p| p.bus == Some(trip.bus) && p.departure_time == Some(trip.departed_at))
                .count();
            assert_eq!(on_trip as u32, trip.boarded);
        }
    }
}

// ── Termination ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod termination {
    use super::*;

    #[test]
    fn stops_at_max_passengers_with_all_buses_parked() {
        let mut tracker = RegistryTracker::default();
        let mut sim = SimBuilder::new(test_config()).build().unwrap();
        sim.run(&mut tracker).unwrap();

        assert_eq!(sim.ledger.len(), 300);
        assert_eq!(tracker.arrivals, 300);
        assert!(tracker.ended);
        assert!(sim.arrivals.is_finished());
        assert!(sim.events.is_empty());
        // Every bus is blocked: one on the empty queue, the rest on the full
        // registry.
        assert_eq!(sim.passengers.waiting_getters(), 1);
        assert_eq!(sim.registry.waiting_putters(), 2);
        assert!(sim.dispatchers.iter().all(|d| !d.bus().traveling));
    }

    #[test]
    fn unbounded_registry_parks_every_bus_on_the_queue() {
        let sim = run(ShuttleConfig { boarding_slots: None, ..test_config() });
        assert!(sim.events.is_empty());
        assert_eq!(sim.passengers.waiting_getters(), 3);
        assert_eq!(sim.registry.waiting_putters(), 0);
    }

    #[test]
    fn time_bound_admits_one_late_arrival() {
        let sim = run(ShuttleConfig { max_sim_time: 20.0, max_passengers: 100_000, ..test_config() });
        let arrivals: Vec<f64> = sim.ledger.iter().map(|p| p.arrival_time.as_f64()).collect();
        let (last, rest) = arrivals.split_last().unwrap();
        assert!(*last > 20.0);
        assert!(rest.iter().all(|&a| a <= 20.0));
    }

    #[test]
    fn smart_bus_stays_parked_on_an_empty_queue() {
        let config = ShuttleConfig {
            fleet_size:      1,
            smart_driver:    true,
            smart_wait_time: 0.5,
            base_lambda:     50.0,
            peak_factor:     0.0,
            max_passengers:  3,
            ..test_config()
        };
        let sim = run(config);

        // 3 of 10 seats taken inside the wait bound, then nobody else
        // arrives.  Nothing is left to wake the bus, so the policy is never
        // re-evaluated and it never leaves.
        assert!(sim.events.is_empty());
        assert!(sim.trips.is_empty());
        assert_eq!(sim.dispatchers[0].boarded_this_cycle().len(), 3);
        assert!(sim.dispatchers[0].is_boarding());
        assert_eq!(sim.passengers.waiting_getters(), 1);
        assert!(sim.ledger.iter().all(|p| p.boarding_time.is_some() && p.departure_time.is_none()));
        assert_eq!(sim.report().stranded(), 3);
    }

    #[test]
    fn no_passengers_means_buses_just_wait() {
        let sim = run(ShuttleConfig { max_passengers: 0, ..test_config() });
        assert!(sim.ledger.is_empty());
        assert!(sim.trips.is_empty());
        assert_eq!(sim.now(), SimTime::ZERO);
    }
}

// ── Registry bookkeeping ──────────────────────────────────────────────────────

#[cfg(test)]
mod registry {
    use super::*;

    #[test]
    fn every_registration_is_removed_once_per_cycle() {
        let mut tracker = RegistryTracker::default();
        let mut sim = SimBuilder::new(test_config()).build().unwrap();
        sim.run(&mut tracker).unwrap();

        // One registration per trip, plus the final open cycle of each bus
        // that is still parked in (or waiting for) the registry.
        assert_eq!(tracker.registrations, sim.trips.len() + 1);
        assert_eq!(tracker.peak_open, 1);
    }

    #[test]
    fn registry_never_exceeds_its_slots() {
        let config = ShuttleConfig { boarding_slots: Some(2), fleet_size: 4, ..test_config() };
        let mut sim = SimBuilder::new(config).build().unwrap();
        while sim.step(&mut NoopObserver).unwrap() {
            assert!(sim.registry.len() <= 2);
            for bus in sim.registry.items() {
                assert!(!sim.dispatchers[bus.index()].bus().traveling);
            }
        }
    }

    #[test]
    fn simultaneous_requests_resolve_in_bus_order() {
        let sim = run(ShuttleConfig { boarding_slots: None, ..test_config() });
        // All three buses queue for passengers at t=0 in id order, so the
        // first three participants go to buses 0, 1, 2.
        let first: Vec<Option<BusId>> = sim.ledger.iter().take(3).map(|p| p.bus).collect();
        assert_eq!(first, vec![Some(BusId(0)), Some(BusId(1)), Some(BusId(2))]);
    }
}

// ── Hybrid mode ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod hybrid {
    use super::*;

    #[test]
    fn buses_registering_after_switch_board_to_full() {
        let config = ShuttleConfig {
            smart_driver: true,
            hybrid: true,
            hybrid_switch_time: 125.0,
            ..test_config()
        };
        let mut tracker = RegistryTracker::default();
        let mut sim = SimBuilder::new(config).build().unwrap();
        sim.run(&mut tracker).unwrap();

        let switch = SimTime::new(125.0).unwrap();
        assert!(sim.trips.iter().any(|t| t.cycle_started >= switch));
        for trip in sim.trips.iter() {
            if trip.cycle_started >= switch {
                assert!(!trip.smart, "{:?}", trip);
                assert_eq!(trip.boarded, trip.capacity);
            } else {
                assert!(trip.smart);
            }
        }
        // Each bus downgrades at most once, never before the switch time.
        let mut buses: Vec<BusId> = tracker.smart_disabled.iter().map(|&(_, b)| b).collect();
        buses.sort();
        buses.dedup();
        assert_eq!(buses.len(), tracker.smart_disabled.len());
        assert!(tracker.smart_disabled.iter().all(|&(t, _)| t >= switch));
    }

    #[test]
    fn log_observer_runs_without_a_logger() {
        let config = ShuttleConfig { smart_driver: true, hybrid: true, max_passengers: 50, ..test_config() };
        let mut sim = SimBuilder::new(config).build().unwrap();
        sim.run(&mut crate::LogObserver).unwrap();
        assert_eq!(sim.ledger.len(), 50);
    }

    #[test]
    fn hybrid_without_smart_driver_is_naive() {
        let config = ShuttleConfig { hybrid: true, ..test_config() };
        let mut tracker = RegistryTracker::default();
        let mut sim = SimBuilder::new(config).build().unwrap();
        sim.run(&mut tracker).unwrap();
        assert!(tracker.smart_disabled.is_empty());
        assert!(sim.trips.iter().all(|t| t.boarded == t.capacity));
    }
}

// ── Determinism and stepping ──────────────────────────────────────────────────

#[cfg(test)]
mod determinism {
    use proptest::prelude::*;

    use super::*;

    fn fingerprint(report: &SimReport) -> Vec<(f64, Option<f64>, Option<f64>)> {
        report
            .ledger
            .iter()
            .map(|p| {
                (
                    p.arrival_time.as_f64(),
                    p.boarding_time.map(SimTime::as_f64),
                    p.departure_time.map(SimTime::as_f64),
                )
            })
            .collect()
    }

    #[test]
    fn same_seed_same_history() {
        let config = ShuttleConfig { smart_driver: true, ..test_config() };
        let a = run(config.clone()).into_report();
        let b = run(config).into_report();
        assert_eq!(fingerprint(&a), fingerprint(&b));
        assert_eq!(a.travels, b.travels);
    }

    #[test]
    fn different_seed_different_history() {
        let a = run(test_config()).into_report();
        let b = run(ShuttleConfig { seed: 7, ..test_config() }).into_report();
        assert_ne!(fingerprint(&a), fingerprint(&b));
    }

    #[test]
    fn pausing_at_a_deadline_does_not_change_the_run() {
        let config = ShuttleConfig { smart_driver: true, ..test_config() };
        let straight = run(config.clone()).into_report();

        let mut sim = SimBuilder::new(config).build().unwrap();
        let deadline = SimTime::new(50.0).unwrap();
        sim.run_until(deadline, &mut NoopObserver).unwrap();
        assert!(sim.now() <= deadline);
        assert!(!sim.events.is_empty());
        assert!(sim.events.peek_time().unwrap() > deadline);

        sim.run(&mut NoopObserver).unwrap();
        assert_eq!(fingerprint(&sim.into_report()), fingerprint(&straight));
    }

    #[test]
    fn run_while_stops_on_condition() {
        let mut sim = SimBuilder::new(test_config()).build().unwrap();
        sim.run_while(&mut NoopObserver, |s| s.ledger.len() < 25).unwrap();
        assert_eq!(sim.ledger.len(), 25);
    }

    #[test]
    fn travel_counts_match_trip_log() {
        let report = run(ShuttleConfig { smart_driver: true, ..test_config() }).into_report();
        for &(bus, travels) in &report.travels {
            let trips = report.trips.iter().filter(|t| t.bus == bus).count();
            assert_eq!(trips as u32, travels);
        }
        assert_eq!(report.total_travels() as usize, report.trips.len());
        assert_eq!(report.served() + report.stranded(), report.ledger.len());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn invariants_hold_for_any_seed(seed in any::<u64>(), smart in any::<bool>(), slots in 1usize..4) {
            let config = ShuttleConfig {
                seed,
                smart_driver: smart,
                boarding_slots: Some(slots),
                max_passengers: 120,
                ..test_config()
            };
            let sim = run(config);
            assert_timestamps_ordered(&sim.ledger);
            prop_assert_eq!(sim.ledger.len(), 120);
            for trip in sim.trips.iter() {
                prop_assert!(trip.boarded <= trip.capacity);
                if !smart {
                    prop_assert_eq!(trip.boarded, trip.capacity);
                }
            }
        }
    }
}
