//! `shuttle-sim`: event loop orchestrator for the shuttle bus-stop simulation.
//!
//! # Event loop
//!
//! ```text
//! while let Some((now, (process, resume))) = events.pop():
//!   ① Resume  : run `process` until it yields its next Command.
//!   ② Notify  : forward the recorded transitions to the observer.
//!   ③ Execute : Timeout        → schedule TimeoutElapsed at now + d
//!               Enqueue/Await  → put/get on the passenger queue
//!               Register/Dereg → put/take on the boarding registry
//!               Finish         → nothing
//!               Completed store operations are scheduled at `now`.
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use shuttle_fleet::ShuttleConfig;
//! use shuttle_sim::{LogObserver, SimBuilder};
//!
//! let config = ShuttleConfig { smart_driver: true, ..ShuttleConfig::default() };
//! let mut sim = SimBuilder::new(config).build()?;
//! sim.run(&mut LogObserver)?;
//! println!("served {}", sim.report().served());
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod report;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{LogObserver, NoopObserver, SimObserver};
pub use report::SimReport;
pub use sim::{Sim, Wakeup};
