use shuttle_core::ProcessId;
use shuttle_fleet::FleetError;
use shuttle_kernel::SchedulingError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("{got} bus capacities supplied for a fleet of {expected}")]
    FleetSizeMismatch { expected: usize, got: usize },

    #[error("no process registered as {0}")]
    UnknownProcess(ProcessId),

    #[error(transparent)]
    Fleet(#[from] FleetError),

    #[error("scheduling error: {0}")]
    Scheduling(#[from] SchedulingError),
}

pub type SimResult<T> = Result<T, SimError>;
