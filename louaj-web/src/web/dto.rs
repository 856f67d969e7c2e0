//! Data transfer objects for web requests and responses.

use std::num::ParseFloatError;

use serde::{Deserialize, Serialize};

use crate::domain::Station;

// ============================================================================
// Booking wizard forms
// ============================================================================

/// Departure selection.
#[derive(Debug, Deserialize)]
pub struct DepartureForm {
    pub station_id: String,
}

/// Destination selection.
#[derive(Debug, Deserialize)]
pub struct DestinationForm {
    pub destination_id: String,
}

/// Seat count. Kept as text so a non-number gets a readable error.
#[derive(Debug, Deserialize)]
pub struct SeatsForm {
    pub seats: String,
}

// ============================================================================
// Account forms
// ============================================================================

/// Passenger sign-in.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub phone: String,
    pub password: String,

    /// Local path to return to after signing in
    #[serde(default)]
    pub next: Option<String>,
}

/// Passenger registration.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
}

/// `?next=` on the sign-in page.
#[derive(Debug, Default, Deserialize)]
pub struct NextQuery {
    pub next: Option<String>,
}

/// First staff sign-in step.
#[derive(Debug, Deserialize)]
pub struct StaffLoginForm {
    pub cin: String,
}

/// Second staff sign-in step.
#[derive(Debug, Deserialize)]
pub struct StaffVerifyForm {
    pub code: String,
}

/// Partnership request, as typed into the form.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct PartnershipForm {
    pub first_name: String,
    pub last_name: String,
    pub cin: String,
    pub phone: String,
    pub email: String,
    pub station_name: String,
    pub governorate: String,
    pub delegation: String,
    #[serde(default)]
    pub latitude: String,
    #[serde(default)]
    pub longitude: String,
}

// ============================================================================
// Bookings
// ============================================================================

/// Query the payment gateway appends when it sends the passenger back.
#[derive(Debug, Deserialize)]
pub struct PaymentReturnQuery {
    pub payment_ref: Option<String>,
}

// ============================================================================
// JSON responses
// ============================================================================

/// A station in the JSON listing.
#[derive(Debug, Serialize)]
pub struct StationResult {
    pub id: String,
    pub name: String,
    pub name_ar: Option<String>,
    pub governorate: Option<String>,
    pub delegation: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub is_online: bool,
}

impl From<&Station> for StationResult {
    fn from(station: &Station) -> Self {
        Self {
            id: station.id.to_string(),
            name: station.name.clone(),
            name_ar: station.name_ar.clone(),
            governorate: station.governorate.clone(),
            delegation: station.delegation.clone(),
            latitude: station.latitude,
            longitude: station.longitude,
            is_online: station.is_online,
        }
    }
}

/// Response for `GET /api/stations`.
#[derive(Debug, Serialize)]
pub struct StationsResponse {
    pub stations: Vec<StationResult>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Parse an optional coordinate field. Blank means not given.
pub fn parse_coordinate(value: &str) -> Result<Option<f64>, ParseFloatError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value.replace(',', ".").parse::<f64>().map(Some)
}

/// Keep `next` only if it is a local path, so sign-in cannot be used as an
/// open redirect.
pub fn safe_next(next: Option<&str>) -> Option<&str> {
    next.filter(|n| n.starts_with('/') && !n.starts_with("//") && !n.contains('\\'))
}
