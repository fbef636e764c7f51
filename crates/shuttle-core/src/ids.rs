//! Typed identifiers.
//!
//! Buses and participants are both numbered densely from 0, so an id doubles
//! as the index of its record (`dispatchers[bus.index()]`,
//! `ledger[participant.index()]`).  Wrapping the integer keeps the two
//! numbering schemes from being mixed up.

use std::fmt;

macro_rules! dense_id {
    ($(#[$attr:meta])* $name:ident) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(pub u32);

        impl $name {
            /// Position of the record this id names.
            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "#{}", self.0)
            }
        }

        /// Fails only past `u32::MAX` records.
        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;

            fn try_from(index: usize) -> Result<Self, Self::Error> {
                u32::try_from(index).map($name)
            }
        }
    };
}

dense_id! {
    /// A bus, numbered in creation order.
    BusId
}

dense_id! {
    /// A participant, numbered in arrival order.
    ParticipantId
}

/// Identity of a suspendable process in the simulation.
///
/// Used as the waiter token in kernel stores and as the target of every
/// scheduled event.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProcessId {
    /// The single arrival generator.
    Arrivals,
    /// The dispatcher driving one bus.
    Bus(BusId),
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessId::Arrivals => f.write_str("arrivals"),
            ProcessId::Bus(bus) => write!(f, "dispatcher[{}]", bus.0),
        }
    }
}
