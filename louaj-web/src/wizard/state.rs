//! Wizard state and transitions.

use std::fmt;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::domain::{
    AuthToken, BookingReceipt, BookingRequest, Money, RouteDestination, RouteDetail, SeatCount,
    Station, StationId,
};

use super::backend::BookingBackend;
use super::error::WizardError;

/// The four booking steps, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Step {
    Departure,
    Destination,
    Seats,
    Confirm,
}

impl Step {
    /// All steps in order.
    pub const ALL: [Step; 4] = [Step::Departure, Step::Destination, Step::Seats, Step::Confirm];

    /// 1-based position, for "Step 2 of 4".
    pub fn number(&self) -> usize {
        match self {
            Step::Departure => 1,
            Step::Destination => 2,
            Step::Seats => 3,
            Step::Confirm => 4,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Step::Departure => "departure",
            Step::Destination => "destination",
            Step::Seats => "seats",
            Step::Confirm => "confirm",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What the wizard holds at each step.
///
/// Each variant carries exactly the selections that are valid at that
/// point, so a destination without a departure, or seats without a loaded
/// route, cannot be represented.
#[derive(Debug, Clone, Default)]
pub enum WizardState {
    #[default]
    Departure,
    Destination {
        departure: Station,
        destinations: Vec<RouteDestination>,
    },
    Seats {
        departure: Station,
        destinations: Vec<RouteDestination>,
        route: RouteDetail,
    },
    Confirm {
        departure: Station,
        destinations: Vec<RouteDestination>,
        route: RouteDetail,
        seats: SeatCount,
    },
}

impl WizardState {
    pub fn step(&self) -> Step {
        match self {
            WizardState::Departure => Step::Departure,
            WizardState::Destination { .. } => Step::Destination,
            WizardState::Seats { .. } => Step::Seats,
            WizardState::Confirm { .. } => Step::Confirm,
        }
    }

    /// The selected departure station, from the destination step on.
    pub fn departure(&self) -> Option<&Station> {
        match self {
            WizardState::Departure => None,
            WizardState::Destination { departure, .. }
            | WizardState::Seats { departure, .. }
            | WizardState::Confirm { departure, .. } => Some(departure),
        }
    }

    /// The loaded route detail, from the seats step on.
    pub fn route(&self) -> Option<&RouteDetail> {
        match self {
            WizardState::Seats { route, .. } | WizardState::Confirm { route, .. } => Some(route),
            _ => None,
        }
    }
}

/// The booking wizard for one browser session.
#[derive(Debug, Clone, Default)]
pub struct BookingWizard {
    pub(super) state: WizardState,
    pub(super) error: Option<String>,
}

impl BookingWizard {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) fn from_state(state: WizardState) -> Self {
        Self { state, error: None }
    }

    pub fn step(&self) -> Step {
        self.state.step()
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    /// The message from the last failed transition, if the last transition failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Take the last error, leaving none. Pages show it once.
    pub fn take_error(&mut self) -> Option<String> {
        self.error.take()
    }

    /// Start over from the departure step.
    pub fn reset(&mut self) {
        self.state = WizardState::Departure;
        self.error = None;
    }

    fn fail<T>(&mut self, err: WizardError) -> Result<T, WizardError> {
        if err.is_upstream() {
            warn!(step = %self.step(), error = %err, "booking step failed upstream");
        }
        self.error = Some(err.user_message());
        Err(err)
    }

    fn wrong_step<T>(&mut self, action: &'static str) -> Result<T, WizardError> {
        let current = self.step();
        self.fail(WizardError::WrongStep { action, current })
    }

    /// `departure -> destination`: choose where to leave from and load the
    /// destinations served from there.
    ///
    /// An empty destination list still advances; it means nothing is queued
    /// at the station right now.
    pub async fn select_departure<B: BookingBackend>(
        &mut self,
        backend: &B,
        station: Station,
    ) -> Result<(), WizardError> {
        if !matches!(self.state, WizardState::Departure) {
            return self.wrong_step("choose a departure station");
        }
        if !station.is_online {
            return self.fail(WizardError::StationOffline(station.name));
        }

        let destinations = match backend.list_destinations(&station.id).await {
            Ok(d) => d,
            Err(e) => return self.fail(e.into()),
        };

        info!(
            departure = %station.id,
            destinations = destinations.len(),
            "departure selected"
        );

        self.state = WizardState::Destination {
            departure: station,
            destinations,
        };
        self.error = None;
        Ok(())
    }

    /// `destination -> seats`: choose one of the offered destinations and
    /// load its live vehicle queue.
    pub async fn select_destination<B: BookingBackend>(
        &mut self,
        backend: &B,
        destination_id: &StationId,
    ) -> Result<(), WizardError> {
        let (departure, destinations) = match &self.state {
            WizardState::Destination {
                departure,
                destinations,
            } => (departure.clone(), destinations.clone()),
            _ => return self.wrong_step("choose a destination"),
        };

        if !destinations
            .iter()
            .any(|d| &d.destination_id == destination_id)
        {
            return self.fail(WizardError::UnknownDestination(destination_id.clone()));
        }

        let route = match backend.route_detail(&departure.id, destination_id).await {
            Ok(r) => r,
            Err(e) => return self.fail(e.into()),
        };

        info!(
            departure = %departure.id,
            destination = %destination_id,
            available_seats = route.available_seats(),
            vehicles = route.vehicles.len(),
            "destination selected"
        );

        self.state = WizardState::Seats {
            departure,
            destinations,
            route,
        };
        self.error = None;
        Ok(())
    }

    /// `seats -> confirm`: accept a seat count if `1 <= seats <= available`.
    /// Local only.
    pub fn confirm_seats(&mut self, requested: u32) -> Result<(), WizardError> {
        let WizardState::Seats { route, .. } = &self.state else {
            return self.wrong_step("choose seats");
        };

        let seats = match SeatCount::new(requested, route.available_seats()) {
            Ok(s) => s,
            Err(e) => return self.fail(e.into()),
        };

        if let WizardState::Seats {
            departure,
            destinations,
            route,
        } = std::mem::take(&mut self.state)
        {
            self.state = WizardState::Confirm {
                departure,
                destinations,
                route,
                seats,
            };
        }
        self.error = None;
        Ok(())
    }

    /// Return to the previous step, discarding what the current one loaded.
    pub fn back(&mut self) -> Result<Step, WizardError> {
        self.state = match std::mem::take(&mut self.state) {
            WizardState::Departure => return self.fail(WizardError::AtFirstStep),
            WizardState::Destination { .. } => WizardState::Departure,
            WizardState::Seats {
                departure,
                destinations,
                ..
            } => WizardState::Destination {
                departure,
                destinations,
            },
            WizardState::Confirm {
                departure,
                destinations,
                route,
                ..
            } => WizardState::Seats {
                departure,
                destinations,
                route,
            },
        };
        self.error = None;
        Ok(self.step())
    }

    /// `confirm -> payment`: create the booking.
    ///
    /// Without a token nothing is sent. On success the wizard starts over and
    /// the caller redirects to the receipt's payment URL; on failure the
    /// wizard stays on the confirm step.
    pub async fn submit<B: BookingBackend>(
        &mut self,
        backend: &B,
        token: Option<&AuthToken>,
        journey_date: DateTime<Utc>,
    ) -> Result<BookingReceipt, WizardError> {
        let request = match &self.state {
            WizardState::Confirm {
                departure,
                route,
                seats,
                ..
            } => BookingRequest {
                departure_station_id: departure.id.clone(),
                destination_station_id: route.destination.destination_id.clone(),
                seats: *seats,
                journey_date,
            },
            _ => return self.wrong_step("confirm the booking"),
        };

        let Some(token) = token else {
            return self.fail(WizardError::NotSignedIn);
        };

        match backend.create_booking(token, &request).await {
            Ok(receipt) => {
                info!(
                    booking_id = %receipt.booking_id,
                    seats = request.seats.get(),
                    "booking created"
                );
                self.reset();
                Ok(receipt)
            }
            Err(e) => self.fail(e.into()),
        }
    }

    /// Total price of the confirmed selection.
    pub fn total_price(&self) -> Option<Money> {
        match &self.state {
            WizardState::Confirm { route, seats, .. } => Some(route.base_price() * seats.get()),
            _ => None,
        }
    }
}
