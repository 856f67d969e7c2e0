//! Conversion from central server DTOs to domain types.
//!
//! Each conversion either produces a domain value with defaults for the
//! fields the upstream left out, or drops the record when an identifying
//! field is missing. Dropped records are logged, never fabricated.

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::domain::{
    AuthToken, BookingRecord, BookingStatus, Cin, Money, PhoneNumber, Profile, QueueSummary,
    RouteDestination, RouteDetail, StaffProfile, Station, StationDashboard, StationId,
    UserProfile, VehicleInfo,
};

use super::types::{
    AuthData, BookingDto, DashboardDto, DestinationDto, RouteDetailDto, StaffDto, StationDto,
    UserDto, VehicleDto,
};

/// Shown when the upstream gives no departure estimate.
pub const UNKNOWN_DEPARTURE: &str = "Soon";

/// Errors converting a payload that cannot be salvaged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("invalid {field}: {message}")]
    InvalidField {
        field: &'static str,
        message: String,
    },
}

/// Deserialize each raw entry, skipping the ones that do not fit `T`.
pub fn decode_each<T: DeserializeOwned>(values: Vec<serde_json::Value>, what: &str) -> Vec<T> {
    values
        .into_iter()
        .filter_map(|v| match serde_json::from_value(v) {
            Ok(dto) => Some(dto),
            Err(e) => {
                warn!(what, error = %e, "skipping malformed entry");
                None
            }
        })
        .collect()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Convert a station, or `None` if it lacks an id or a name.
pub fn convert_station(dto: StationDto) -> Option<Station> {
    let id = dto.id.as_deref().and_then(|id| StationId::parse(id).ok())?;
    let name = non_blank(dto.name)?;

    Some(Station {
        id,
        name,
        name_ar: non_blank(dto.name_ar),
        governorate: non_blank(dto.governorate),
        delegation: non_blank(dto.delegation),
        latitude: dto.latitude,
        longitude: dto.longitude,
        // Some deployments only send isActive
        is_online: dto.is_online.or(dto.is_active).unwrap_or(false),
    })
}

/// Convert a destination, or `None` if it lacks an id.
pub fn convert_destination(dto: DestinationDto) -> Option<RouteDestination> {
    let destination_id = dto
        .destination_id
        .as_deref()
        .and_then(|id| StationId::parse(id).ok())?;

    let destination_name =
        non_blank(dto.destination_name).unwrap_or_else(|| destination_id.to_string());

    Some(RouteDestination {
        destination_id,
        destination_name,
        total_vehicles: dto.total_vehicles.unwrap_or(0),
        available_seats: dto.available_seats.unwrap_or(0),
        base_price: Money::from_dinars(dto.base_price.unwrap_or(0.0)),
        estimated_departure: non_blank(dto.estimated_departure)
            .unwrap_or_else(|| UNKNOWN_DEPARTURE.to_string()),
    })
}

/// Convert a vehicle. Never fails; a vehicle without a plate shows as "-".
pub fn convert_vehicle(dto: VehicleDto, index: usize) -> VehicleInfo {
    let driver = dto.driver.unwrap_or_default();
    let nested_name = match (non_blank(driver.first_name), non_blank(driver.last_name)) {
        (Some(f), Some(l)) => Some(format!("{f} {l}")),
        (Some(n), None) | (None, Some(n)) => Some(n),
        (None, None) => None,
    };

    VehicleInfo {
        license_plate: non_blank(dto.license_plate).unwrap_or_else(|| "-".to_string()),
        queue_position: dto.queue_position.unwrap_or(index as u32 + 1),
        driver_name: non_blank(dto.driver_name).or(nested_name),
        driver_phone: non_blank(dto.driver_phone).or(non_blank(driver.phone_number)),
        available_seats: dto.available_seats.unwrap_or(0),
        total_seats: dto.total_seats.unwrap_or(0),
        base_price: Money::from_dinars(dto.base_price.unwrap_or(0.0)),
        status: non_blank(dto.status),
    }
}

/// Convert a route detail for the pair we asked about.
///
/// The destination is always the one we requested; an id echoed back in the
/// payload is not trusted to pick what gets booked. When the aggregate seat
/// count is missing it is summed from the vehicles, and when the price is
/// missing the first vehicle's price is used.
pub fn convert_route_detail(dto: RouteDetailDto, requested: &StationId) -> RouteDetail {
    let vehicles: Vec<VehicleInfo> = decode_each::<VehicleDto>(
        dto.vehicles.unwrap_or_default(),
        "vehicle",
    )
    .into_iter()
    .enumerate()
    .map(|(i, v)| convert_vehicle(v, i))
    .collect();

    if let Some(echoed) = dto.destination_id.as_deref()
        && echoed.trim() != requested.as_str()
    {
        warn!(
            requested = %requested,
            echoed,
            "route detail names a different destination; keeping the requested one"
        );
    }
    let destination_id = requested.clone();

    let available_seats = dto.available_seats.unwrap_or_else(|| {
        vehicles
            .iter()
            .fold(0u32, |total, v| total.saturating_add(v.available_seats))
    });

    let base_price = dto
        .base_price
        .map(Money::from_dinars)
        .or_else(|| vehicles.first().map(|v| v.base_price))
        .unwrap_or(Money::ZERO);

    let destination = RouteDestination {
        destination_name: non_blank(dto.destination_name)
            .unwrap_or_else(|| destination_id.to_string()),
        destination_id,
        total_vehicles: dto.total_vehicles.unwrap_or(vehicles.len() as u32),
        available_seats,
        base_price,
        estimated_departure: non_blank(dto.estimated_departure)
            .unwrap_or_else(|| UNKNOWN_DEPARTURE.to_string()),
    };

    RouteDetail {
        destination,
        vehicles,
    }
}

/// Parse an upstream timestamp: RFC 3339, or a bare `YYYY-MM-DD` date.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Convert a booking. Fails only when the booking has no id.
pub fn convert_booking(dto: BookingDto) -> Result<BookingRecord, ConversionError> {
    let id = non_blank(dto.id).ok_or(ConversionError::MissingField("booking.id"))?;

    let departure_name = non_blank(dto.departure_station_name)
        .or_else(|| dto.departure_station.and_then(|s| non_blank(s.name)))
        .unwrap_or_default();
    let destination_name = non_blank(dto.destination_station_name)
        .or_else(|| dto.destination_station.and_then(|s| non_blank(s.name)))
        .unwrap_or_default();

    Ok(BookingRecord {
        id,
        status: dto
            .status
            .as_deref()
            .map(BookingStatus::parse)
            .unwrap_or(BookingStatus::Pending),
        departure_name,
        destination_name,
        seats: dto.seats_booked.unwrap_or(0),
        total_amount: Money::from_dinars(dto.total_amount.unwrap_or(0.0)),
        journey_date: dto.journey_date.as_deref().and_then(parse_timestamp),
        created_at: dto.created_at.as_deref().and_then(parse_timestamp),
        payment_reference: non_blank(dto.payment_reference),
        verification_code: non_blank(dto.verification_code),
        vehicle_plate: non_blank(dto.vehicle_license_plate)
            .or_else(|| dto.vehicle.and_then(|v| non_blank(v.license_plate))),
    })
}

fn convert_user(dto: UserDto) -> Result<UserProfile, ConversionError> {
    Ok(UserProfile {
        id: non_blank(dto.id).ok_or(ConversionError::MissingField("user.id"))?,
        first_name: non_blank(dto.first_name).unwrap_or_default(),
        last_name: non_blank(dto.last_name).unwrap_or_default(),
        phone: dto
            .phone_number
            .as_deref()
            .and_then(|p| PhoneNumber::parse(p).ok()),
    })
}

fn convert_staff(dto: StaffDto, fallback_cin: Option<Cin>) -> Result<StaffProfile, ConversionError> {
    let cin = match dto.cin.as_deref() {
        Some(raw) => Cin::parse(raw).map_err(|e| ConversionError::InvalidField {
            field: "staff.cin",
            message: e.to_string(),
        })?,
        None => fallback_cin.ok_or(ConversionError::MissingField("staff.cin"))?,
    };

    Ok(StaffProfile {
        id: non_blank(dto.id).ok_or(ConversionError::MissingField("staff.id"))?,
        cin,
        first_name: non_blank(dto.first_name).unwrap_or_default(),
        last_name: non_blank(dto.last_name).unwrap_or_default(),
        role: non_blank(dto.role).unwrap_or_else(|| "WORKER".to_string()),
        station_id: dto
            .station_id
            .as_deref()
            .and_then(|id| StationId::parse(id).ok()),
        station_name: dto.station.and_then(|s| non_blank(s.name)),
    })
}

/// Convert a sign-in payload into a token and profile.
///
/// `cin` is the CIN the staff member logged in with, used when the upstream
/// omits it from the staff record.
pub fn convert_auth(
    data: AuthData,
    cin: Option<Cin>,
) -> Result<(AuthToken, Profile), ConversionError> {
    let token = data
        .token
        .and_then(AuthToken::new)
        .ok_or(ConversionError::MissingField("token"))?;

    let profile = match (data.staff, data.user) {
        (Some(staff), _) => Profile::Staff(convert_staff(staff, cin)?),
        (None, Some(user)) => Profile::Passenger(convert_user(user)?),
        (None, None) => return Err(ConversionError::MissingField("user")),
    };

    Ok((token, profile))
}

/// Convert the partner dashboard. Missing numbers default to zero.
pub fn convert_dashboard(dto: DashboardDto) -> StationDashboard {
    let station = dto
        .station
        .and_then(|v| serde_json::from_value::<StationDto>(v).ok())
        .and_then(convert_station);

    let queues = dto
        .queues
        .unwrap_or_default()
        .into_iter()
        .map(|q| QueueSummary {
            destination_name: non_blank(q.destination_name).unwrap_or_else(|| "-".to_string()),
            vehicle_count: q.vehicle_count.unwrap_or(0),
            available_seats: q.available_seats.unwrap_or(0),
            base_price: Money::from_dinars(q.base_price.unwrap_or(0.0)),
        })
        .collect();

    let stats = dto.statistics.unwrap_or_default();

    StationDashboard {
        station,
        queues,
        todays_bookings: stats.today_bookings.unwrap_or(0),
        todays_revenue: Money::from_dinars(stats.today_revenue.unwrap_or(0.0)),
    }
}
