//! Station partner onboarding and dashboard data.

use super::{Cin, DomainError, Money, PhoneNumber, Station};

/// A validated request to join the network as a station partner.
#[derive(Debug, Clone, PartialEq)]
pub struct PartnershipApplication {
    pub first_name: String,
    pub last_name: String,
    pub cin: Cin,
    pub phone: PhoneNumber,
    pub email: String,
    pub station_name: String,
    pub governorate: String,
    pub delegation: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl PartnershipApplication {
    /// Validate raw form input.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        first_name: &str,
        last_name: &str,
        cin: &str,
        phone: &str,
        email: &str,
        station_name: &str,
        governorate: &str,
        delegation: &str,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Result<Self, DomainError> {
        let first_name = required(first_name, "first name")?;
        let last_name = required(last_name, "last name")?;
        let cin = Cin::parse(cin)?;
        let phone = PhoneNumber::parse(phone)?;
        let email = required(email, "email")?;
        if !email.contains('@') || email.starts_with('@') || email.ends_with('@') {
            return Err(DomainError::InvalidField {
                field: "email",
                reason: "must look like name@example.com",
            });
        }
        let station_name = required(station_name, "station name")?;
        let governorate = required(governorate, "governorate")?;
        let delegation = required(delegation, "delegation")?;

        if let Some(lat) = latitude
            && !(-90.0..=90.0).contains(&lat)
        {
            return Err(DomainError::InvalidField {
                field: "latitude",
                reason: "must be between -90 and 90",
            });
        }
        if let Some(lon) = longitude
            && !(-180.0..=180.0).contains(&lon)
        {
            return Err(DomainError::InvalidField {
                field: "longitude",
                reason: "must be between -180 and 180",
            });
        }

        Ok(Self {
            first_name,
            last_name,
            cin,
            phone,
            email,
            station_name,
            governorate,
            delegation,
            latitude,
            longitude,
        })
    }
}

fn required(value: &str, field: &'static str) -> Result<String, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(DomainError::MissingField(field))
    } else {
        Ok(trimmed.to_string())
    }
}

/// Queue status for one destination served by a station.
#[derive(Debug, Clone, PartialEq)]
pub struct QueueSummary {
    pub destination_name: String,
    pub vehicle_count: u32,
    pub available_seats: u32,
    pub base_price: Money,
}

/// What a station partner sees on their dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct StationDashboard {
    pub station: Option<Station>,
    pub queues: Vec<QueueSummary>,
    pub todays_bookings: u32,
    pub todays_revenue: Money,
}

impl StationDashboard {
    /// Vehicles queued across all destinations.
    pub fn total_vehicles(&self) -> u32 {
        self.queues.iter().map(|q| q.vehicle_count).sum()
    }

    /// Seats available across all destinations.
    pub fn total_available_seats(&self) -> u32 {
        self.queues.iter().map(|q| q.available_seats).sum()
    }
}
