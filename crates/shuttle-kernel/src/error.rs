use shuttle_core::SimTime;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SchedulingError {
    #[error("cannot schedule a negative delay ({0})")]
    NegativeDelay(f64),

    #[error("cannot schedule a non-finite delay ({0})")]
    NonFiniteDelay(f64),

    #[error("cannot schedule at {at}, clock is already at {now}")]
    InPast { at: SimTime, now: SimTime },
}

pub type SchedulingResult<T> = Result<T, SchedulingError>;
