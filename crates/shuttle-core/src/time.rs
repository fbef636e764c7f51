//! Simulation time model.
//!
//! # Design
//!
//! Time is virtual: a non-negative `f64` count of abstract time units since
//! the start of the run, with no mapping to wall-clock time.  Interarrival
//! gaps and travel times are continuous samples, so an integer tick would
//! force rounding every draw.
//!
//! `SimTime` is totally ordered (via `f64::total_cmp`) so it can key a
//! `BinaryHeap`.  Constructors reject NaN and infinities, which keeps the
//! total order consistent with the numeric one for every value that can
//! actually exist.

use std::cmp::Ordering;
use std::fmt;

use crate::{CoreError, CoreResult};

/// An absolute point on the virtual clock.
#[derive(Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    /// Wrap a finite time value.
    pub fn new(t: f64) -> CoreResult<Self> {
        if t.is_finite() {
            Ok(SimTime(t))
        } else {
            Err(CoreError::NonFiniteTime(t))
        }
    }

    /// Raw value in time units.
    #[inline]
    pub fn as_f64(self) -> f64 {
        self.0
    }

    /// Time units elapsed from `earlier` to `self`.  Negative if `earlier`
    /// is later than `self`.
    #[inline]
    pub fn since(self, earlier: SimTime) -> f64 {
        self.0 - earlier.0
    }

    /// The whole-unit floor of this time.
    #[inline]
    pub fn whole_units(self) -> f64 {
        self.0.floor()
    }
}

impl PartialEq for SimTime {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SimTime {}

impl PartialOrd for SimTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SimTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl std::ops::Add<f64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: f64) -> SimTime {
        SimTime(self.0 + rhs)
    }
}

impl std::ops::Sub for SimTime {
    type Output = f64;
    #[inline]
    fn sub(self, rhs: SimTime) -> f64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}
