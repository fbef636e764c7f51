//! `shuttle-fleet`: the simulated actors and their records.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                      |
//! |-----------------|---------------------------------------------------------------|
//! | [`config`]      | `ShuttleConfig` and its validation                            |
//! | [`bus`]         | `Bus`: per-bus state owned by its dispatcher                 |
//! | [`participant`] | `Participant`, `HistoryLedger`, `Trip`, `TripLog`             |
//! | [`command`]     | `Command` (what a process waits for), `Resume`, `Transition`  |
//! | [`context`]     | `ProcessContext<'a>`: run state lent to a resumed process    |
//! | [`process`]     | `Process` trait                                               |
//! | [`arrivals`]    | `ArrivalGenerator` and the time-varying `arrival_rate`        |
//! | [`dispatcher`]  | `BusDispatcher`: boarding, smart departure, travel           |
//! | [`error`]       | `FleetError`, `FleetResult<T>`                                |
//!
//! # Design notes
//!
//! Processes are plain state machines.  Each `resume` runs until the process
//! needs to wait and returns a [`Command`] naming what it waits for; the
//! simulation loop (shuttle-sim) performs the wait against the kernel and
//! later calls `resume` again with the matching [`Resume`].  No process ever
//! touches the event queue or the stores directly.

pub mod arrivals;
pub mod bus;
pub mod command;
pub mod config;
pub mod context;
pub mod dispatcher;
pub mod error;
pub mod participant;
pub mod process;


pub use arrivals::{ArrivalGenerator, arrival_rate};
pub use bus::Bus;
pub use command::{Command, Resume, Transition};
pub use config::ShuttleConfig;
pub use context::ProcessContext;
pub use dispatcher::BusDispatcher;
pub use error::{FleetError, FleetResult};
pub use participant::{HistoryLedger, Participant, Trip, TripLog};
pub use process::Process;
