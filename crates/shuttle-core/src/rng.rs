//! Deterministic simulation RNG.
//!
//! # Determinism strategy
//!
//! A run owns exactly one `SimRng`, seeded from the configuration.  The
//! simulation is single-threaded and processes are resumed in a fixed event
//! order, so the sequence of draws (and therefore every sampled gap and
//! travel time) is a pure function of the seed and the configuration.
//!
//! Distribution objects are built per draw because the arrival rate changes
//! on every sample.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Exp, Normal};

use crate::{CoreError, CoreResult};

/// Simulation-level RNG.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Draw from Exponential(`rate`), i.e. with mean `1 / rate`.
    ///
    /// # Errors
    /// `CoreError::InvalidRate` if `rate` is not finite and strictly positive.
    pub fn exponential(&mut self, rate: f64) -> CoreResult<f64> {
        if !(rate.is_finite() && rate > 0.0) {
            return Err(CoreError::InvalidRate(rate));
        }
        let dist = Exp::new(rate).map_err(|_| CoreError::InvalidRate(rate))?;
        Ok(dist.sample(&mut self.0))
    }

    /// Draw from Normal(`mean`, `std`).  The result may be negative; callers
    /// clamp where a negative duration makes no sense.
    ///
    /// # Errors
    /// `CoreError::InvalidGaussian` if either parameter is non-finite or
    /// `std` is negative.
    pub fn gaussian(&mut self, mean: f64, std: f64) -> CoreResult<f64> {
        let bad = CoreError::InvalidGaussian { mean, std };
        if !mean.is_finite() || !(std.is_finite() && std >= 0.0) {
            return Err(bad);
        }
        let dist = Normal::new(mean, std).map_err(|_| bad)?;
        Ok(dist.sample(&mut self.0))
    }
}
