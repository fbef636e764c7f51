//! `shuttle-kernel`: the discrete-event scheduling kernel.
//!
//! # Crate layout
//!
//! | Module            | Contents                                                  |
//! |-------------------|-----------------------------------------------------------|
//! | [`event_queue`]   | `EventQueue<E>`: virtual clock + (time, seq) ordered heap |
//! | [`store`]         | `Store<T, W>`: blocking put/get container                 |
//! | [`error`]         | `SchedulingError`, `SchedulingResult<T>`                  |
//!
//! # Design notes
//!
//! The kernel knows nothing about buses or passengers.  Events are opaque
//! payloads and store waiters are opaque tokens; the simulation layer decides
//! what "resume waiter `w`" means.  Store operations never suspend anything
//! themselves: they report which waiters became runnable, and the caller
//! schedules those resumptions at the current time so that the event
//! queue's tie-break order governs who runs first.

pub mod error;
pub mod event_queue;
pub mod store;


pub use error::{SchedulingError, SchedulingResult};
pub use event_queue::EventQueue;
pub use store::{Resumption, Store};
