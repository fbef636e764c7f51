//! The arrival generator process.
//!
//! # Rate model
//!
//! ```text
//! t = floor(now)
//! λ(t) = base_lambda + peak_factor * (t / peak_hour)²   if t < peak_hour
//!      = base_lambda + peak_factor                       otherwise
//! ```
//!
//! The gap to the next arrival is drawn from Exponential(λ) with λ evaluated
//! once, at the moment the gap is sampled.  This only approximates a
//! non-homogeneous Poisson process (no thinning): during the ramp, gaps are
//! slightly too long because λ rises while the generator sleeps.  Changing
//! it would change arrival statistics, so it stays.

use shuttle_core::{ProcessId, SimTime};

use crate::{Command, FleetError, FleetResult, Process, ProcessContext, Resume, ShuttleConfig, Transition};

/// Instantaneous arrival rate at `now`.
pub fn arrival_rate(config: &ShuttleConfig, now: SimTime) -> f64 {
    let t = now.whole_units();
    if t < config.peak_hour {
        let ramp = t / config.peak_hour;
        config.base_lambda + config.peak_factor * ramp * ramp
    } else {
        config.base_lambda + config.peak_factor
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    NotStarted,
    /// Sleeping until the next arrival.
    Waiting,
    /// Handing the new participant to the passenger queue.
    Enqueueing,
    Finished,
}

impl Stage {
    fn describe(self) -> &'static str {
        match self {
            Stage::NotStarted => "not started",
            Stage::Waiting    => "waiting for the next arrival",
            Stage::Enqueueing => "enqueueing a participant",
            Stage::Finished   => "finished",
        }
    }
}

/// Produces participants until the ledger holds `max_passengers` of them or
/// an arrival lands past `max_sim_time`.
#[derive(Debug)]
pub struct ArrivalGenerator {
    arrivals: u32,
    stage:    Stage,
}

impl Default for ArrivalGenerator {
    fn default() -> Self {
        Self { arrivals: 0, stage: Stage::NotStarted }
    }
}

impl ArrivalGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Participants created so far.
    pub fn arrivals(&self) -> u32 {
        self.arrivals
    }

    pub fn is_finished(&self) -> bool {
        self.stage == Stage::Finished
    }

    /// Loop head: stop if the ledger is full, else sleep for one sampled gap.
    fn next_gap(&mut self, ctx: &mut ProcessContext<'_>) -> FleetResult<Command> {
        if ctx.ledger.len() >= ctx.config.max_passengers {
            self.stage = Stage::Finished;
            return Ok(Command::Finish);
        }
        let rate = arrival_rate(ctx.config, ctx.now);
        let gap = ctx.rng.exponential(rate)?;
        self.stage = Stage::Waiting;
        Ok(Command::Timeout(gap))
    }
}

impl Process for ArrivalGenerator {
    fn id(&self) -> ProcessId {
        ProcessId::Arrivals
    }

    fn resume(&mut self, resume: Resume, ctx: &mut ProcessContext<'_>) -> FleetResult<Command> {
        match (self.stage, resume) {
            (Stage::NotStarted, Resume::Start) => self.next_gap(ctx),

            (Stage::Waiting, Resume::TimeoutElapsed) => {
                self.arrivals += 1;
                let participant = ctx.ledger.append(ctx.now)?;
                ctx.record(Transition::Arrived { participant });
                self.stage = Stage::Enqueueing;
                Ok(Command::Enqueue(participant))
            }

            (Stage::Enqueueing, Resume::Enqueued) => {
                // Checked after the arrival is already recorded, so the last
                // admitted participant may land past the bound.
                if ctx.now.as_f64() > ctx.config.max_sim_time {
                    self.stage = Stage::Finished;
                    return Ok(Command::Finish);
                }
                self.next_gap(ctx)
            }

            (stage, resume) => Err(FleetError::UnexpectedResume {
                process: ProcessId::Arrivals,
                stage: stage.describe(),
                resume,
            }),
        }
    }
}
