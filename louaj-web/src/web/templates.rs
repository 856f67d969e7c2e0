//! Askama templates for the web frontend.

use askama::Template;
use chrono::{DateTime, FixedOffset, Utc};

use crate::domain::{
    BookingRecord, RouteDestination, RouteDetail, Station, StationDashboard, VehicleInfo,
};
use crate::session::SessionState;
use crate::wizard::{BookingWizard, Step, WizardState};

use super::dto::PartnershipForm;

/// Tunisia is UTC+1 all year.
const TUNIS_OFFSET_SECS: i32 = 3600;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Home page with the online station list.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub nav: Nav,
    pub flash: Option<String>,
    pub stations: Vec<StationView>,
    pub error: Option<String>,
}

/// The booking wizard at its current step.
#[derive(Template)]
#[template(path = "book.html")]
pub struct BookTemplate {
    pub nav: Nav,
    pub flash: Option<String>,
    pub wizard: WizardView,
    /// Stations to choose from; only loaded on the departure step
    pub stations: Vec<StationView>,
}

/// Passenger sign-in.
#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub nav: Nav,
    pub flash: Option<String>,
    pub error: Option<String>,
    pub phone: String,
    pub next: String,
}

/// Passenger registration.
#[derive(Template)]
#[template(path = "register.html")]
pub struct RegisterTemplate {
    pub nav: Nav,
    pub flash: Option<String>,
    pub error: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
}

/// Station partner sign-in: CIN first, then the SMS code.
#[derive(Template)]
#[template(path = "partner_login.html")]
pub struct PartnerLoginTemplate {
    pub nav: Nav,
    pub flash: Option<String>,
    pub error: Option<String>,
    /// Masked CIN once a code has been sent
    pub awaiting_code_for: Option<String>,
    pub cin: String,
}

/// Station partner onboarding form, or its confirmation.
#[derive(Template)]
#[template(path = "partner_apply.html")]
pub struct PartnerApplyTemplate {
    pub nav: Nav,
    pub flash: Option<String>,
    pub error: Option<String>,
    pub form: PartnershipForm,
    pub request_number: Option<String>,
}

/// Station partner dashboard.
#[derive(Template)]
#[template(path = "partner_dashboard.html")]
pub struct PartnerDashboardTemplate {
    pub nav: Nav,
    pub flash: Option<String>,
    pub dashboard: DashboardView,
}

/// Booking history.
#[derive(Template)]
#[template(path = "bookings.html")]
pub struct BookingsTemplate {
    pub nav: Nav,
    pub flash: Option<String>,
    pub bookings: Vec<BookingView>,
}

/// One booking.
#[derive(Template)]
#[template(path = "booking_detail.html")]
pub struct BookingDetailTemplate {
    pub nav: Nav,
    pub flash: Option<String>,
    pub booking: BookingView,
}

/// Where the payment gateway sends the passenger back.
#[derive(Template)]
#[template(path = "payment_return.html")]
pub struct PaymentReturnTemplate {
    pub nav: Nav,
    pub flash: Option<String>,
    pub booking: BookingView,
}

/// Error page.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub nav: Nav,
    pub flash: Option<String>,
    pub title: String,
    pub message: String,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// Header state shared by every page.
#[derive(Debug, Clone, Default)]
pub struct Nav {
    pub user_name: Option<String>,
    pub is_staff: bool,
}

impl Nav {
    pub fn from_session(session: &SessionState) -> Self {
        match session.profile() {
            Some(profile) => Self {
                user_name: Some(profile.display_name()),
                is_staff: profile.is_staff(),
            },
            None => Self::default(),
        }
    }

    pub fn signed_in(&self) -> bool {
        self.user_name.is_some()
    }

    pub fn name(&self) -> &str {
        self.user_name.as_deref().unwrap_or_default()
    }
}

/// Station view model.
#[derive(Debug, Clone)]
pub struct StationView {
    pub id: String,
    pub name: String,
    pub name_ar: String,
    pub location: String,
    pub is_online: bool,
}

impl StationView {
    pub fn from_station(station: &Station) -> Self {
        Self {
            id: station.id.to_string(),
            name: station.name.clone(),
            name_ar: station.name_ar.clone().unwrap_or_default(),
            location: station.location_label(),
            is_online: station.is_online,
        }
    }
}

/// Destination view model.
#[derive(Debug, Clone)]
pub struct DestinationView {
    pub id: String,
    pub name: String,
    pub total_vehicles: u32,
    pub available_seats: u32,
    pub base_price: String,
    pub estimated_departure: String,
}

impl DestinationView {
    pub fn from_destination(destination: &RouteDestination) -> Self {
        Self {
            id: destination.destination_id.to_string(),
            name: destination.destination_name.clone(),
            total_vehicles: destination.total_vehicles,
            available_seats: destination.available_seats,
            base_price: destination.base_price.to_string(),
            estimated_departure: destination.estimated_departure.clone(),
        }
    }

    /// Nothing left to book on this destination.
    pub fn is_full(&self) -> bool {
        self.available_seats == 0
    }
}

/// Vehicle view model.
#[derive(Debug, Clone)]
pub struct VehicleView {
    pub license_plate: String,
    pub queue_position: u32,
    pub driver: String,
    pub available_seats: u32,
    pub total_seats: u32,
    pub occupied_seats: u32,
}

impl VehicleView {
    pub fn from_vehicle(vehicle: &VehicleInfo) -> Self {
        Self {
            license_plate: vehicle.license_plate.clone(),
            queue_position: vehicle.queue_position,
            driver: vehicle.driver_name.clone().unwrap_or_default(),
            available_seats: vehicle.available_seats,
            total_seats: vehicle.total_seats,
            occupied_seats: vehicle.occupied_seats(),
        }
    }
}

/// Route detail view model.
#[derive(Debug, Clone)]
pub struct RouteView {
    pub destination: DestinationView,
    pub vehicles: Vec<VehicleView>,
}

impl RouteView {
    pub fn from_route(route: &RouteDetail) -> Self {
        Self {
            destination: DestinationView::from_destination(&route.destination),
            vehicles: route.vehicles.iter().map(VehicleView::from_vehicle).collect(),
        }
    }
}

/// One entry in the step indicator.
#[derive(Debug, Clone)]
pub struct StepView {
    pub number: usize,
    pub title: &'static str,
    pub current: bool,
    pub done: bool,
}

/// Everything the booking page shows about the wizard.
#[derive(Debug, Clone)]
pub struct WizardView {
    pub step: Step,
    pub steps: Vec<StepView>,
    pub error: Option<String>,
    pub departure: Option<StationView>,
    pub destinations: Vec<DestinationView>,
    pub route: Option<RouteView>,
    /// Confirmed seat count, on the confirm step
    pub seats: u32,
    pub total_price: String,
    pub signed_in: bool,
}

impl WizardView {
    pub fn from_wizard(wizard: &BookingWizard, signed_in: bool) -> Self {
        let step = wizard.step();
        let steps = Step::ALL
            .iter()
            .map(|s| StepView {
                number: s.number(),
                title: step_title(*s),
                current: *s == step,
                done: *s < step,
            })
            .collect();

        let destinations = match wizard.state() {
            WizardState::Departure => Vec::new(),
            WizardState::Destination { destinations, .. }
            | WizardState::Seats { destinations, .. }
            | WizardState::Confirm { destinations, .. } => destinations
                .iter()
                .map(DestinationView::from_destination)
                .collect(),
        };

        let seats = match wizard.state() {
            WizardState::Confirm { seats, .. } => seats.get(),
            _ => 0,
        };

        Self {
            step,
            steps,
            error: wizard.error().map(str::to_string),
            departure: wizard.state().departure().map(StationView::from_station),
            destinations,
            route: wizard.state().route().map(RouteView::from_route),
            seats,
            total_price: wizard
                .total_price()
                .map(|m| m.to_string())
                .unwrap_or_default(),
            signed_in,
        }
    }

    /// Whether the wizard is on the step with this label.
    pub fn is_step(&self, label: &str) -> bool {
        self.step.label() == label
    }

    pub fn step_number(&self) -> usize {
        self.step.number()
    }

    pub fn can_go_back(&self) -> bool {
        self.step != Step::Departure
    }
}

fn step_title(step: Step) -> &'static str {
    match step {
        Step::Departure => "Departure",
        Step::Destination => "Destination",
        Step::Seats => "Seats",
        Step::Confirm => "Confirm",
    }
}

/// Booking view model.
#[derive(Debug, Clone)]
pub struct BookingView {
    pub id: String,
    pub status: String,
    pub awaits_payment: bool,
    pub departure_name: String,
    pub destination_name: String,
    pub seats: u32,
    pub total: String,
    pub journey_date: String,
    pub created_at: String,
    pub payment_reference: Option<String>,
    pub verification_code: Option<String>,
    pub vehicle_plate: Option<String>,
}

impl BookingView {
    pub fn from_record(record: &BookingRecord) -> Self {
        Self {
            id: record.id.clone(),
            status: record.status.label().to_string(),
            awaits_payment: record.status.awaits_payment(),
            departure_name: record.departure_name.clone(),
            destination_name: record.destination_name.clone(),
            seats: record.seats,
            total: record.total_amount.to_string(),
            journey_date: format_local(record.journey_date),
            created_at: format_local(record.created_at),
            payment_reference: record.payment_reference.clone(),
            verification_code: record.verification_code.clone(),
            vehicle_plate: record.vehicle_plate.clone(),
        }
    }
}

/// Queue summary view model.
#[derive(Debug, Clone)]
pub struct QueueView {
    pub destination_name: String,
    pub vehicle_count: u32,
    pub available_seats: u32,
    pub base_price: String,
}

/// Dashboard view model.
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub staff_name: String,
    pub role: String,
    pub station: Option<StationView>,
    pub queues: Vec<QueueView>,
    pub total_vehicles: u32,
    pub total_available_seats: u32,
    pub todays_bookings: u32,
    pub todays_revenue: String,
}

impl DashboardView {
    pub fn new(staff_name: String, role: String, dashboard: &StationDashboard) -> Self {
        Self {
            staff_name,
            role,
            station: dashboard.station.as_ref().map(StationView::from_station),
            queues: dashboard
                .queues
                .iter()
                .map(|q| QueueView {
                    destination_name: q.destination_name.clone(),
                    vehicle_count: q.vehicle_count,
                    available_seats: q.available_seats,
                    base_price: q.base_price.to_string(),
                })
                .collect(),
            total_vehicles: dashboard.total_vehicles(),
            total_available_seats: dashboard.total_available_seats(),
            todays_bookings: dashboard.todays_bookings,
            todays_revenue: dashboard.todays_revenue.to_string(),
        }
    }
}

/// Format a timestamp in Tunisian local time, or "-" when unknown.
pub fn format_local(at: Option<DateTime<Utc>>) -> String {
    let Some(at) = at else {
        return "-".to_string();
    };
    match FixedOffset::east_opt(TUNIS_OFFSET_SECS) {
        Some(tz) => at.with_timezone(&tz).format("%Y-%m-%d %H:%M").to_string(),
        None => at.format("%Y-%m-%d %H:%M UTC").to_string(),
    }
}
