//! Destinations reachable from a station and the vehicles queued for them.

use super::{Money, StationId};

/// A destination reachable from a departure station.
///
/// An aggregate the central server recomputes on every request; it is
/// never persisted or mutated on our side.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteDestination {
    pub destination_id: StationId,
    pub destination_name: String,
    /// Vehicles currently queued for this destination
    pub total_vehicles: u32,
    /// Seats available across all queued vehicles
    pub available_seats: u32,
    /// Fare per seat
    pub base_price: Money,
    /// Estimated departure, as displayed. "Soon" when unknown.
    pub estimated_departure: String,
}

/// A vehicle waiting in a station queue.
///
/// A snapshot of its queue position at fetch time. Seat counts can change
/// between fetches; we do not reconcile or lock them.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleInfo {
    pub license_plate: String,
    pub queue_position: u32,
    pub driver_name: Option<String>,
    pub driver_phone: Option<String>,
    pub available_seats: u32,
    pub total_seats: u32,
    pub base_price: Money,
    pub status: Option<String>,
}

impl VehicleInfo {
    /// Seats already taken on this vehicle.
    pub fn occupied_seats(&self) -> u32 {
        self.total_seats.saturating_sub(self.available_seats)
    }
}

/// A route destination enriched with the live vehicle queue.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteDetail {
    pub destination: RouteDestination,
    pub vehicles: Vec<VehicleInfo>,
}

impl RouteDetail {
    /// Seats available on this route.
    pub fn available_seats(&self) -> u32 {
        self.destination.available_seats
    }

    /// Fare per seat.
    pub fn base_price(&self) -> Money {
        self.destination.base_price
    }
}

/// Why a seat count was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvalidSeatCount {
    #[error("Please select at least one seat")]
    Zero,

    #[error("Only {available} seat(s) available, cannot book {requested}")]
    TooMany { requested: u32, available: u32 },
}

/// A number of seats validated against what a route has available.
///
/// Holds `1 <= seats <= available` at the time it was checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SeatCount(u32);

impl SeatCount {
    /// Validate a requested seat count against the available seats.
    pub fn new(requested: u32, available: u32) -> Result<Self, InvalidSeatCount> {
        if requested == 0 {
            return Err(InvalidSeatCount::Zero);
        }
        if requested > available {
            return Err(InvalidSeatCount::TooMany {
                requested,
                available,
            });
        }
        Ok(SeatCount(requested))
    }

    /// The number of seats.
    pub fn get(&self) -> u32 {
        self.0
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// A seat count is accepted exactly when 1 <= s <= available
        #[test]
        fn accepted_iff_in_range(s in 0u32..64, available in 0u32..64) {
            let result = SeatCount::new(s, available);
            prop_assert_eq!(result.is_ok(), s >= 1 && s <= available);
            if let Ok(count) = result {
                prop_assert_eq!(count.get(), s);
            }
        }
    }
}
