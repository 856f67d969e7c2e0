//! Central server request and response DTOs.
//!
//! These map directly to the JSON the central server speaks. Response types
//! use `Option` for nearly everything because the upstream omits fields,
//! sends numbers as strings, and nests the same data differently between
//! endpoints. `convert` turns them into domain types with defaults.

use serde::{Deserialize, Deserializer, Serialize};

/// The `{success, message, data}` envelope every endpoint wraps its payload in.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub success: Option<bool>,
    pub message: Option<String>,
    pub error: Option<String>,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// The upstream's explanation, preferring `message` over `error`.
    pub fn reason(&self) -> Option<&str> {
        non_blank(self.message.as_deref()).or_else(|| non_blank(self.error.as_deref()))
    }
}

/// `text` unless it is missing or only whitespace.
pub fn non_blank(text: Option<&str>) -> Option<&str> {
    text.filter(|t| !t.trim().is_empty())
}

/// Envelope used only to dig a message out of an error body.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub message: Option<String>,
    pub error: Option<String>,
}

/// Accept a number, a numeric string, or null.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        String(String),
    }

    Ok(
        match Option::<NumberOrString>::deserialize(deserializer)? {
            Some(NumberOrString::Number(n)) => Some(n),
            Some(NumberOrString::String(s)) => s.trim().parse().ok(),
            None => None,
        },
    )
}

/// Accept a non-negative integer, a float, a numeric string, or null.
pub fn lenient_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_f64(deserializer)?
        .filter(|n| n.is_finite() && *n >= 0.0)
        .map(|n| n.min(u32::MAX as f64) as u32))
}

/// Accept a string id or a numeric id.
pub fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        String(String),
        Number(i64),
    }

    Ok(match Option::<Id>::deserialize(deserializer)? {
        Some(Id::String(s)) => Some(s),
        Some(Id::Number(n)) => Some(n.to_string()),
        None => None,
    })
}

// ============================================================================
// Stations
// ============================================================================

/// A station as listed by `GET /api/v1/stations`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StationDto {
    #[serde(deserialize_with = "lenient_id")]
    pub id: Option<String>,
    pub name: Option<String>,
    pub name_ar: Option<String>,
    pub governorate: Option<String>,
    pub delegation: Option<String>,
    #[serde(deserialize_with = "lenient_f64")]
    pub latitude: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub longitude: Option<f64>,
    pub is_online: Option<bool>,
    pub is_active: Option<bool>,
}

/// Station list payload: either a bare array or `{stations: [...]}`.
///
/// Entries are kept as raw JSON so that one malformed station does not
/// fail the whole listing.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum StationsPayload {
    List(Vec<serde_json::Value>),
    Wrapped { stations: Vec<serde_json::Value> },
}

// ============================================================================
// Routes
// ============================================================================

/// One reachable destination, as returned by the destinations endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DestinationDto {
    #[serde(deserialize_with = "lenient_id")]
    pub destination_id: Option<String>,
    pub destination_name: Option<String>,
    #[serde(deserialize_with = "lenient_u32")]
    pub total_vehicles: Option<u32>,
    #[serde(deserialize_with = "lenient_u32")]
    pub available_seats: Option<u32>,
    #[serde(deserialize_with = "lenient_f64")]
    pub base_price: Option<f64>,
    pub estimated_departure: Option<String>,
}

/// Destinations payload: either a bare array or `{destinations: [...]}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum DestinationsPayload {
    List(Vec<serde_json::Value>),
    Wrapped { destinations: Vec<serde_json::Value> },
}

/// A route with its vehicle queue.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RouteDetailDto {
    #[serde(deserialize_with = "lenient_id")]
    pub destination_id: Option<String>,
    pub destination_name: Option<String>,
    #[serde(deserialize_with = "lenient_u32")]
    pub total_vehicles: Option<u32>,
    #[serde(deserialize_with = "lenient_u32")]
    pub available_seats: Option<u32>,
    #[serde(deserialize_with = "lenient_f64")]
    pub base_price: Option<f64>,
    pub estimated_departure: Option<String>,
    pub vehicles: Option<Vec<serde_json::Value>>,
}

/// Route detail payload: either the route itself or `{route: {...}}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RouteDetailPayload {
    Wrapped { route: RouteDetailDto },
    Flat(RouteDetailDto),
}

/// A queued vehicle.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VehicleDto {
    pub license_plate: Option<String>,
    #[serde(deserialize_with = "lenient_u32")]
    pub queue_position: Option<u32>,
    pub driver_name: Option<String>,
    pub driver_phone: Option<String>,
    pub driver: Option<DriverDto>,
    #[serde(deserialize_with = "lenient_u32")]
    pub available_seats: Option<u32>,
    #[serde(deserialize_with = "lenient_u32")]
    pub total_seats: Option<u32>,
    #[serde(deserialize_with = "lenient_f64")]
    pub base_price: Option<f64>,
    pub status: Option<String>,
}

/// Driver details, when nested inside a vehicle.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DriverDto {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
}

// ============================================================================
// Bookings
// ============================================================================

/// Body of `POST /api/v1/bookings`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingBody {
    pub departure_station_id: String,
    pub destination_station_id: String,
    pub seats_booked: u32,
    /// RFC 3339 timestamp
    pub journey_date: String,
}

/// Payload of a booking creation response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateBookingData {
    pub booking: Option<BookingDto>,
    pub payment_url: Option<String>,
    pub payment_reference: Option<String>,
    pub payment: Option<PaymentDto>,
}

/// Payment gateway details attached to a new booking.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentDto {
    pub payment_url: Option<String>,
    pub pay_url: Option<String>,
    pub payment_ref: Option<String>,
    pub payment_reference: Option<String>,
}

/// A booking as the central server describes it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingDto {
    #[serde(deserialize_with = "lenient_id")]
    pub id: Option<String>,
    pub status: Option<String>,
    pub departure_station_name: Option<String>,
    pub destination_station_name: Option<String>,
    pub departure_station: Option<NamedDto>,
    pub destination_station: Option<NamedDto>,
    #[serde(deserialize_with = "lenient_u32")]
    pub seats_booked: Option<u32>,
    #[serde(deserialize_with = "lenient_f64")]
    pub total_amount: Option<f64>,
    pub journey_date: Option<String>,
    pub created_at: Option<String>,
    pub payment_reference: Option<String>,
    pub payment_url: Option<String>,
    pub verification_code: Option<String>,
    pub vehicle_license_plate: Option<String>,
    pub vehicle: Option<NamedDto>,
}

/// Anything nested that we only need a display name from.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NamedDto {
    pub name: Option<String>,
    pub license_plate: Option<String>,
}

/// Single-booking payload: either the booking or `{booking: {...}}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum BookingPayload {
    Wrapped { booking: serde_json::Value },
    Flat(serde_json::Value),
}

/// Booking history payload: either a bare array or `{bookings: [...]}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum BookingsPayload {
    List(Vec<serde_json::Value>),
    Wrapped { bookings: Vec<serde_json::Value> },
}

// ============================================================================
// Accounts
// ============================================================================

/// Body of `POST /api/v1/auth/login`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginBody {
    pub phone_number: String,
    pub password: String,
}

/// Body of `POST /api/v1/auth/register`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterBody {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub password: String,
}

/// Body of `POST /api/v1/auth/staff/login`.
#[derive(Debug, Clone, Serialize)]
pub struct StaffLoginBody {
    pub cin: String,
}

/// Body of `POST /api/v1/auth/staff/verify`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffVerifyBody {
    pub cin: String,
    pub verification_code: String,
}

/// Payload of a successful sign-in.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthData {
    pub token: Option<String>,
    pub user: Option<UserDto>,
    pub staff: Option<StaffDto>,
}

/// A passenger account.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserDto {
    #[serde(deserialize_with = "lenient_id")]
    pub id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
}

/// A station staff account.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StaffDto {
    #[serde(deserialize_with = "lenient_id")]
    pub id: Option<String>,
    pub cin: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<String>,
    #[serde(deserialize_with = "lenient_id")]
    pub station_id: Option<String>,
    pub station: Option<NamedDto>,
}

// ============================================================================
// Station partners
// ============================================================================

/// Body of `POST /api/v1/partnership-requests`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnershipBody {
    pub first_name: String,
    pub last_name: String,
    pub cin: String,
    pub phone_number: String,
    pub email: String,
    pub station_name: String,
    pub governorate: String,
    pub delegation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

/// Payload of a partnership request submission.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartnershipData {
    pub request_number: Option<String>,
    #[serde(deserialize_with = "lenient_id")]
    pub id: Option<String>,
}

/// Payload of `GET /api/v1/staff/dashboard`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardDto {
    pub station: Option<serde_json::Value>,
    pub queues: Option<Vec<QueueDto>>,
    pub statistics: Option<StatisticsDto>,
}

/// One destination queue on the dashboard.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueueDto {
    pub destination_name: Option<String>,
    #[serde(deserialize_with = "lenient_u32")]
    pub vehicle_count: Option<u32>,
    #[serde(deserialize_with = "lenient_u32")]
    pub available_seats: Option<u32>,
    #[serde(deserialize_with = "lenient_f64")]
    pub base_price: Option<f64>,
}

/// Today's numbers on the dashboard.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatisticsDto {
    #[serde(deserialize_with = "lenient_u32")]
    pub today_bookings: Option<u32>,
    #[serde(deserialize_with = "lenient_f64")]
    pub today_revenue: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_reason_prefers_message() {
        let env: Envelope<()> =
            serde_json::from_str(r#"{"success": false, "message": "Seats gone", "error": "E1"}"#)
                .unwrap();
        assert_eq!(env.reason(), Some("Seats gone"));

        let env: Envelope<()> =
            serde_json::from_str(r#"{"success": false, "message": "  ", "error": "E1"}"#).unwrap();
        assert_eq!(env.reason(), Some("E1"));
    }

    #[test]
    fn lenient_numbers() {
        let dto: DestinationDto = serde_json::from_str(
            r#"{"destinationId": 7, "availableSeats": "4", "basePrice": "10.5", "totalVehicles": null}"#,
        )
        .unwrap();
        assert_eq!(dto.destination_id.as_deref(), Some("7"));
        assert_eq!(dto.available_seats, Some(4));
        assert_eq!(dto.base_price, Some(10.5));
        assert_eq!(dto.total_vehicles, None);
    }

    #[test]
    fn lenient_u32_rejects_negative() {
        let dto: DestinationDto = serde_json::from_str(r#"{"availableSeats": -2}"#).unwrap();
        assert_eq!(dto.available_seats, None);
    }

    #[test]
    fn destinations_payload_shapes() {
        let bare: DestinationsPayload = serde_json::from_str(r#"[{"destinationId": "a"}]"#).unwrap();
        assert!(matches!(bare, DestinationsPayload::List(v) if v.len() == 1));

        let wrapped: DestinationsPayload =
            serde_json::from_str(r#"{"destinations": []}"#).unwrap();
        assert!(matches!(wrapped, DestinationsPayload::Wrapped { destinations } if destinations.is_empty()));
    }

    #[test]
    fn route_detail_payload_shapes() {
        let wrapped: RouteDetailPayload =
            serde_json::from_str(r#"{"route": {"destinationName": "Sousse"}}"#).unwrap();
        assert!(matches!(wrapped, RouteDetailPayload::Wrapped { .. }));

        let flat: RouteDetailPayload =
            serde_json::from_str(r#"{"destinationName": "Sousse", "vehicles": []}"#).unwrap();
        assert!(matches!(flat, RouteDetailPayload::Flat(_)));
    }

    #[test]
    fn booking_body_is_camel_case() {
        let body = CreateBookingBody {
            departure_station_id: "a".into(),
            destination_station_id: "b".into(),
            seats_booked: 2,
            journey_date: "2026-10-19T08:00:00Z".into(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["departureStationId"], "a");
        assert_eq!(json["destinationStationId"], "b");
        assert_eq!(json["seatsBooked"], 2);
        assert_eq!(json["journeyDate"], "2026-10-19T08:00:00Z");
    }
}
