//! Static run configuration.

use shuttle_core::ParticipantId;

use crate::{FleetError, FleetResult};

/// Every parameter of a run.  Immutable once the simulation is built; shared
/// by reference with every process.
///
/// Typically built from `ShuttleConfig::default()` with a few fields
/// overridden, or deserialized from JSON by the application (with the
/// `serde` feature).  [`validate`][Self::validate] is called by the
/// simulation builder, so an invalid value never reaches the run loop.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ShuttleConfig {
    /// Number of buses (one dispatcher process each).
    pub fleet_size: u32,

    /// Seats per bus, unless overridden per bus by the builder.
    pub bus_capacity: u32,

    /// Enable the early-departure heuristic.
    pub smart_driver: bool,

    /// How long a smart bus may wait after opening for boarding before it
    /// considers leaving early.
    pub smart_wait_time: f64,

    /// Fraction of capacity at or below which a smart bus still within
    /// `smart_wait_time` keeps waiting.  In `[0, 1]`.
    pub smart_fill_fraction: f64,

    /// Boarding gap below which a smart bus still within `smart_wait_time`
    /// keeps waiting even above the fill fraction.
    pub smart_last_boarding_gap: f64,

    /// Downgrade smart buses to naive once `hybrid_switch_time` is reached.
    pub hybrid: bool,

    /// Virtual time after which a registering bus stops being smart.
    pub hybrid_switch_time: f64,

    /// The arrival generator stops once the ledger holds this many
    /// participants.
    pub max_passengers: usize,

    /// Off-peak arrival rate (participants per time unit).
    pub base_lambda: f64,

    /// Extra arrival rate reached at `peak_hour`.
    pub peak_factor: f64,

    /// Time at which the quadratic ramp reaches its plateau.
    pub peak_hour: f64,

    pub travel_time_mean: f64,
    pub travel_time_std:  f64,

    /// The arrival generator stops after the first arrival past this time.
    pub max_sim_time: f64,

    /// How many buses may be open for boarding at once.  `None` = no limit.
    pub boarding_slots: Option<usize>,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,
}

impl Default for ShuttleConfig {
    fn default() -> Self {
        Self {
            fleet_size:              3,
            bus_capacity:            20,
            smart_driver:            false,
            smart_wait_time:         10.0,
            smart_fill_fraction:     0.5,
            smart_last_boarding_gap: 2.0,
            hybrid:                  false,
            hybrid_switch_time:      125.0,
            max_passengers:          1_000,
            base_lambda:             0.5,
            peak_factor:             2.0,
            peak_hour:               60.0,
            travel_time_mean:        30.0,
            travel_time_std:         5.0,
            max_sim_time:            500.0,
            boarding_slots:          Some(1),
            seed:                    42,
        }
    }
}

impl ShuttleConfig {
    /// Reject malformed parameters.
    ///
    /// # Errors
    /// `FleetError::Config` naming the first offending field.
    pub fn validate(&self) -> FleetResult<()> {
        if self.fleet_size == 0 {
            return Err(config_err("fleet_size must be at least 1"));
        }
        if self.bus_capacity == 0 {
            return Err(config_err("bus_capacity must be at least 1"));
        }
        if ParticipantId::try_from(self.max_passengers).is_err() {
            return Err(config_err(format!(
                "max_passengers must fit a participant id, got {}",
                self.max_passengers
            )));
        }
        non_negative("smart_wait_time", self.smart_wait_time)?;
        non_negative("smart_last_boarding_gap", self.smart_last_boarding_gap)?;
        non_negative("hybrid_switch_time", self.hybrid_switch_time)?;
        non_negative("peak_factor", self.peak_factor)?;
        non_negative("travel_time_std", self.travel_time_std)?;
        non_negative("max_sim_time", self.max_sim_time)?;
        if !(0.0..=1.0).contains(&self.smart_fill_fraction) {
            return Err(config_err(format!(
                "smart_fill_fraction must be within [0, 1], got {}",
                self.smart_fill_fraction
            )));
        }
        positive("base_lambda", self.base_lambda)?;
        positive("peak_hour", self.peak_hour)?;
        if !self.travel_time_mean.is_finite() {
            return Err(config_err(format!(
                "travel_time_mean must be finite, got {}",
                self.travel_time_mean
            )));
        }
        if self.boarding_slots == Some(0) {
            return Err(config_err("boarding_slots must be at least 1 when bounded"));
        }
        Ok(())
    }
}

fn config_err(msg: impl Into<String>) -> FleetError {
    FleetError::Config(msg.into())
}

fn non_negative(field: &str, value: f64) -> FleetResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(config_err(format!("{field} must be finite and >= 0, got {value}")))
    }
}

fn positive(field: &str, value: f64) -> FleetResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(config_err(format!("{field} must be finite and > 0, got {value}")))
    }
}
