//! Booking history, booking detail and the payment return page.

use axum::{
    Extension,
    extract::{Path, Query, State},
    response::Response,
};
use tracing::{info, warn};

use crate::central::CentralError;
use crate::session::Session;

use super::dto::PaymentReturnQuery;
use super::routes::{AppError, expire_session, page_chrome, render, see_other};
use super::state::AppState;
use super::templates::{
    BookingDetailTemplate, BookingView, BookingsTemplate, PaymentReturnTemplate,
};

const LOGIN_FOR_HISTORY: &str = "/login?next=/bookings";

/// `GET /bookings`
pub(super) async fn history(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Response, AppError> {
    let Some(token) = session.lock().await.token().cloned() else {
        return Ok(see_other(LOGIN_FOR_HISTORY));
    };

    let records = match state.central.booking_history(&token).await {
        Ok(records) => records,
        Err(CentralError::Unauthorized) => {
            return Ok(expire_session(&session, LOGIN_FOR_HISTORY).await);
        }
        Err(e) => return Err(e.into()),
    };

    let (nav, flash) = page_chrome(&session).await;
    render(&BookingsTemplate {
        nav,
        flash,
        bookings: records.iter().map(BookingView::from_record).collect(),
    })
}

/// `GET /bookings/:id`
pub(super) async fn detail(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let Some(token) = session.lock().await.token().cloned() else {
        return Ok(see_other(LOGIN_FOR_HISTORY));
    };

    let record = match state.central.booking_detail(&token, &id).await {
        Ok(record) => record,
        Err(CentralError::Unauthorized) => {
            return Ok(expire_session(&session, LOGIN_FOR_HISTORY).await);
        }
        Err(CentralError::NotFound) => {
            return Err(AppError::NotFound {
                message: format!("No booking {id}"),
            });
        }
        Err(e) => return Err(e.into()),
    };

    let (nav, flash) = page_chrome(&session).await;
    render(&BookingDetailTemplate {
        nav,
        flash,
        booking: BookingView::from_record(&record),
    })
}

/// `GET /payment/return?payment_ref=`: where the payment gateway sends the
/// passenger back. Works without a session token; the reference alone
/// identifies the booking. A token the central server no longer accepts
/// signs the session out and the lookup is repeated without it.
pub(super) async fn payment_return(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Query(query): Query<PaymentReturnQuery>,
) -> Result<Response, AppError> {
    let payment_ref = query
        .payment_ref
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .ok_or_else(|| AppError::BadRequest {
            message: "Missing payment reference".to_string(),
        })?;

    let token = session.lock().await.token().cloned();
    let mut lookup = state
        .central
        .booking_by_payment_ref(payment_ref, token.as_ref())
        .await;

    if token.is_some() && matches!(lookup, Err(CentralError::Unauthorized)) {
        info!(payment_ref, "stale token on payment return, signing out");
        {
            let mut guard = session.lock().await;
            guard.sign_out();
            guard.flash = Some(CentralError::Unauthorized.user_message());
        }
        lookup = state.central.booking_by_payment_ref(payment_ref, None).await;
    }

    let record = match lookup {
        Ok(record) => record,
        Err(CentralError::NotFound) => {
            return Err(AppError::NotFound {
                message: format!("No booking for payment {payment_ref}"),
            });
        }
        Err(e) => {
            warn!(payment_ref, error = %e, "payment lookup failed");
            return Err(e.into());
        }
    };

    let (nav, flash) = page_chrome(&session).await;
    render(&PaymentReturnTemplate {
        nav,
        flash,
        booking: BookingView::from_record(&record),
    })
}
