use shuttle_core::{CoreError, ParticipantId, ProcessId};
use thiserror::Error;

use crate::Resume;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum FleetError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("participant {0} not found in the history ledger")]
    UnknownParticipant(ParticipantId),

    #[error("history ledger is full at {0} participants")]
    LedgerFull(usize),

    #[error("participant {0} has already boarded")]
    AlreadyBoarded(ParticipantId),

    #[error("participant {0} departed without boarding or has already departed")]
    InvalidDeparture(ParticipantId),

    #[error("{process} resumed with {resume:?} while {stage}")]
    UnexpectedResume {
        process: ProcessId,
        stage:   &'static str,
        resume:  Resume,
    },

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type FleetResult<T> = Result<T, FleetError>;
