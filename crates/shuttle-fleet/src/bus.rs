//! Per-bus state.

use shuttle_core::BusId;

/// One bus of the fleet.  Owned and mutated only by its
/// [`BusDispatcher`][crate::BusDispatcher].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bus {
    pub id: BusId,

    /// Seats.  Fixed at creation, always at least 1.
    pub capacity: u32,

    /// `0 <= passengers_on_board <= capacity`.  Reset when a boarding cycle
    /// opens and again after unloading.
    pub passengers_on_board: u32,

    /// Completed departures.  Never decreases.
    pub travels: u32,

    /// `true` only between departure and arrival back at the stop.
    pub traveling: bool,

    /// This bus's own copy of the smart-driver flag.  Hybrid mode clears it
    /// once and it is never set again.
    pub smart_driver: bool,
}

impl Bus {
    pub fn new(id: BusId, capacity: u32, smart_driver: bool) -> Self {
        Self {
            id,
            capacity,
            passengers_on_board: 0,
            travels: 0,
            traveling: false,
            smart_driver,
        }
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.passengers_on_board >= self.capacity
    }
}
