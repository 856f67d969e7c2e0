//! Booking wizard pages.
//!
//! Every transition is a form POST that locks the session, runs the wizard
//! transition (including its upstream call) under that lock, and redirects
//! back to `GET /book`, which renders whatever step the wizard is on along
//! with the error from a failed transition.

use axum::{Extension, Form, extract::State, response::Response};
use chrono::Utc;
use tracing::{debug, warn};

use crate::central::CentralError;
use crate::domain::StationId;
use crate::session::Session;
use crate::wizard::{Step, WizardError};

use super::dto::{DepartureForm, DestinationForm, SeatsForm};
use super::routes::{AppError, render, see_other};
use super::state::AppState;
use super::templates::{BookTemplate, Nav, StationView, WizardView};

const BOOK_PATH: &str = "/book";
const LOGIN_FOR_BOOKING: &str = "/login?next=/book";

/// `GET /book`: the current step.
pub(super) async fn show(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Response, AppError> {
    let (nav, flash, mut wizard) = {
        let mut guard = session.lock().await;
        let nav = Nav::from_session(&guard);
        let flash = guard.take_flash();
        let view = WizardView::from_wizard(&guard.wizard, guard.token().is_some());
        guard.wizard.take_error();
        (nav, flash, view)
    };

    let mut stations = Vec::new();
    if wizard.step == Step::Departure {
        match state.central.list_online_stations().await {
            Ok(list) => stations = list.iter().map(StationView::from_station).collect(),
            Err(e) => {
                warn!(error = %e, "could not load departure stations");
                if wizard.error.is_none() {
                    wizard.error = Some(e.user_message());
                }
            }
        }
    }

    render(&BookTemplate {
        nav,
        flash,
        wizard,
        stations,
    })
}

/// `POST /book/departure`
pub(super) async fn select_departure(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Form(form): Form<DepartureForm>,
) -> Result<Response, AppError> {
    let id = parse_station_id(&form.station_id)?;

    let mut guard = session.lock().await;
    let station = state
        .central
        .list_stations()
        .await?
        .into_iter()
        .find(|s| s.id == id)
        .ok_or_else(|| AppError::NotFound {
            message: format!("Unknown station {id}"),
        })?;

    if let Err(e) = guard
        .wizard
        .select_departure(state.central.as_ref(), station)
        .await
    {
        debug!(error = %e, "departure not selected");
    }
    Ok(see_other(BOOK_PATH))
}

/// `POST /book/destination`
pub(super) async fn select_destination(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Form(form): Form<DestinationForm>,
) -> Result<Response, AppError> {
    let id = parse_station_id(&form.destination_id)?;

    let mut guard = session.lock().await;
    if let Err(e) = guard
        .wizard
        .select_destination(state.central.as_ref(), &id)
        .await
    {
        debug!(error = %e, "destination not selected");
    }
    Ok(see_other(BOOK_PATH))
}

/// `POST /book/seats`
pub(super) async fn confirm_seats(
    Extension(session): Extension<Session>,
    Form(form): Form<SeatsForm>,
) -> Result<Response, AppError> {
    let seats: u32 = form
        .seats
        .trim()
        .parse()
        .map_err(|_| AppError::BadRequest {
            message: format!("{:?} is not a number of seats", form.seats),
        })?;

    let mut guard = session.lock().await;
    if let Err(e) = guard.wizard.confirm_seats(seats) {
        debug!(error = %e, "seats not confirmed");
    }
    Ok(see_other(BOOK_PATH))
}

/// `POST /book/back`
pub(super) async fn back(Extension(session): Extension<Session>) -> Response {
    let mut guard = session.lock().await;
    match guard.wizard.back() {
        Ok(step) => debug!(%step, "wizard went back"),
        Err(e) => debug!(error = %e, "wizard did not go back"),
    }
    see_other(BOOK_PATH)
}

/// `POST /book/confirm`: create the booking and send the browser to pay.
pub(super) async fn submit(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Response {
    let mut guard = session.lock().await;
    let token = guard.token().cloned();

    match guard
        .wizard
        .submit(state.central.as_ref(), token.as_ref(), Utc::now())
        .await
    {
        Ok(receipt) => see_other(&receipt.payment_url),
        Err(WizardError::NotSignedIn) => {
            guard.flash = guard.wizard.take_error();
            see_other(LOGIN_FOR_BOOKING)
        }
        Err(WizardError::Central(CentralError::Unauthorized)) => {
            // Keep the selections so the passenger can confirm again after signing in
            guard.auth = None;
            guard.flash = guard.wizard.take_error();
            see_other(LOGIN_FOR_BOOKING)
        }
        Err(e) => {
            debug!(error = %e, "booking not submitted");
            see_other(BOOK_PATH)
        }
    }
}

fn parse_station_id(raw: &str) -> Result<StationId, AppError> {
    StationId::parse(raw).map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })
}
