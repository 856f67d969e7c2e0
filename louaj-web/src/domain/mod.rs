//! Domain types for the Louaj booking front end.
//!
//! These are the validated shapes the rest of the crate works with. Raw
//! upstream JSON never leaves the `central` module; it is converted into
//! these types first, so code that receives them can trust their invariants.

mod account;
mod booking;
mod error;
mod identity;
mod money;
mod partner;
mod route;
mod station;

pub use account::{AuthToken, Profile, StaffProfile, UserProfile};
pub use booking::{BookingReceipt, BookingRecord, BookingRequest, BookingStatus};
pub use error::DomainError;
pub use identity::{Cin, InvalidCin, InvalidPhone, PhoneNumber};
pub use money::Money;
pub use partner::{PartnershipApplication, QueueSummary, StationDashboard};
pub use route::{InvalidSeatCount, RouteDestination, RouteDetail, SeatCount, VehicleInfo};
pub use station::{InvalidStationId, Station, StationId};
