//! `shuttle-core`: primitives shared by every `shuttle-*` crate.
//!
//! - [`time`]: `SimTime`, a finite, totally ordered point on the virtual clock.
//! - [`ids`]: `BusId` and `ParticipantId` (dense indices) and `ProcessId`
//!   (the target of a scheduled wake-up).
//! - [`rng`]: `SimRng`, the seeded source of interarrival and travel samples.
//! - [`error`]: `CoreError`.
//!
//! The optional `serde` feature derives `Serialize`/`Deserialize` on the ids
//! and on `SimTime`.

pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


pub use error::{CoreError, CoreResult};
pub use ids::{BusId, ParticipantId, ProcessId};
pub use rng::SimRng;
pub use time::SimTime;
