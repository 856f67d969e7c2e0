//! The calls the wizard needs from the central server.

use std::future::Future;

use crate::central::{CentralClient, CentralError};
use crate::domain::{
    AuthToken, BookingReceipt, BookingRequest, RouteDestination, RouteDetail, StationId,
};

/// Data source for the booking wizard.
///
/// Implemented by [`CentralClient`]; tests substitute an in-memory backend.
pub trait BookingBackend: Send + Sync {
    /// Destinations reachable from `departure`.
    fn list_destinations(
        &self,
        departure: &StationId,
    ) -> impl Future<Output = Result<Vec<RouteDestination>, CentralError>> + Send;

    /// Live queue detail for the pair.
    fn route_detail(
        &self,
        departure: &StationId,
        destination: &StationId,
    ) -> impl Future<Output = Result<RouteDetail, CentralError>> + Send;

    /// Create the booking and return where to pay.
    fn create_booking(
        &self,
        token: &AuthToken,
        request: &BookingRequest,
    ) -> impl Future<Output = Result<BookingReceipt, CentralError>> + Send;
}

impl BookingBackend for CentralClient {
    fn list_destinations(
        &self,
        departure: &StationId,
    ) -> impl Future<Output = Result<Vec<RouteDestination>, CentralError>> + Send {
        CentralClient::list_destinations(self, departure)
    }

    fn route_detail(
        &self,
        departure: &StationId,
        destination: &StationId,
    ) -> impl Future<Output = Result<RouteDetail, CentralError>> + Send {
        CentralClient::route_detail(self, departure, destination)
    }

    fn create_booking(
        &self,
        token: &AuthToken,
        request: &BookingRequest,
    ) -> impl Future<Output = Result<BookingReceipt, CentralError>> + Send {
        CentralClient::create_booking(self, token, request)
    }
}
