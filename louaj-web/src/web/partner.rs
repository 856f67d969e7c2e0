//! Station partner pages: two-step staff sign-in, onboarding and the
//! station dashboard.

use axum::{Extension, Form, extract::State, http::StatusCode, response::Response};
use futures::future::try_join;
use tracing::{info, warn};

use crate::central::CentralError;
use crate::domain::{Cin, PartnershipApplication};
use crate::session::Session;

use super::dto::{PartnershipForm, StaffLoginForm, StaffVerifyForm, parse_coordinate};
use super::routes::{
    AppError, expire_session, page_chrome, render, render_with_status, see_other,
    upstream_status,
};
use super::state::AppState;
use super::templates::{
    DashboardView, PartnerApplyTemplate, PartnerDashboardTemplate, PartnerLoginTemplate,
};

const LOGIN_PATH: &str = "/partner/login";
const DASHBOARD_PATH: &str = "/partner/dashboard";

const CODE_SENT: &str = "A verification code has been sent to your phone.";

/// `GET /partner/login`
pub(super) async fn login_page(
    Extension(session): Extension<Session>,
) -> Result<Response, AppError> {
    let pending = {
        let guard = session.lock().await;
        if guard.staff().is_some() {
            return Ok(see_other(DASHBOARD_PATH));
        }
        guard.pending_cin
    };

    login_form(&session, pending, None, String::new(), StatusCode::OK).await
}

/// `POST /partner/login`: validate the CIN and ask for an SMS code.
pub(super) async fn start_login(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Form(form): Form<StaffLoginForm>,
) -> Result<Response, AppError> {
    let cin = match Cin::parse(&form.cin) {
        Ok(cin) => cin,
        Err(e) => {
            return login_form(
                &session,
                None,
                Some(e.to_string()),
                form.cin,
                StatusCode::BAD_REQUEST,
            )
            .await;
        }
    };

    match state.central.staff_login_start(&cin).await {
        Ok(message) => {
            info!(cin = ?cin, "verification code requested");
            {
                let mut guard = session.lock().await;
                guard.pending_cin = Some(cin);
                guard.flash = Some(message.unwrap_or_else(|| CODE_SENT.to_string()));
            }
            login_form(&session, Some(cin), None, String::new(), StatusCode::OK).await
        }
        Err(e) => {
            warn!(cin = ?cin, error = %e, "staff sign-in refused");
            login_form(
                &session,
                None,
                Some(e.user_message()),
                form.cin,
                upstream_status(&e),
            )
            .await
        }
    }
}

/// `POST /partner/verify`: exchange the SMS code for a staff session.
pub(super) async fn verify(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Form(form): Form<StaffVerifyForm>,
) -> Result<Response, AppError> {
    let pending = session.lock().await.pending_cin;
    let Some(cin) = pending else {
        session.lock().await.flash = Some("Enter your CIN first.".to_string());
        return Ok(see_other(LOGIN_PATH));
    };

    let code = form.code.trim();
    if code.is_empty() || !code.chars().all(|c| c.is_ascii_digit()) {
        return login_form(
            &session,
            Some(cin),
            Some("Enter the numeric code from the SMS".to_string()),
            String::new(),
            StatusCode::BAD_REQUEST,
        )
        .await;
    }

    match state.central.staff_verify(&cin, code).await {
        Ok((token, profile)) => {
            let mut guard = session.lock().await;
            info!(cin = ?cin, "staff signed in");
            guard.sign_in(token, profile);
            Ok(see_other(DASHBOARD_PATH))
        }
        Err(e) => {
            warn!(cin = ?cin, error = %e, "staff verification failed");
            login_form(
                &session,
                Some(cin),
                Some(e.user_message()),
                String::new(),
                upstream_status(&e),
            )
            .await
        }
    }
}

async fn login_form(
    session: &Session,
    pending: Option<Cin>,
    error: Option<String>,
    cin: String,
    status: StatusCode,
) -> Result<Response, AppError> {
    let (nav, flash) = page_chrome(session).await;
    render_with_status(
        &PartnerLoginTemplate {
            nav,
            flash,
            error,
            awaiting_code_for: pending.map(|c| c.masked()),
            cin,
        },
        status,
    )
}

/// `GET /partner/apply`
pub(super) async fn apply_page(
    Extension(session): Extension<Session>,
) -> Result<Response, AppError> {
    let (nav, flash) = page_chrome(&session).await;
    render(&PartnerApplyTemplate {
        nav,
        flash,
        error: None,
        form: PartnershipForm::default(),
        request_number: None,
    })
}

/// `POST /partner/apply`: validate locally, then submit.
pub(super) async fn apply(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Form(form): Form<PartnershipForm>,
) -> Result<Response, AppError> {
    let application = match application_from(&form) {
        Ok(application) => application,
        Err(error) => {
            return apply_form(&session, form, Some(error), None, StatusCode::BAD_REQUEST).await;
        }
    };

    match state.central.submit_partnership(&application).await {
        Ok(request_number) => {
            info!(%request_number, station = %application.station_name, "partnership requested");
            apply_form(
                &session,
                PartnershipForm::default(),
                None,
                Some(request_number),
                StatusCode::OK,
            )
            .await
        }
        Err(e) => {
            warn!(error = %e, "partnership request failed");
            let status = upstream_status(&e);
            apply_form(&session, form, Some(e.user_message()), None, status).await
        }
    }
}

fn application_from(form: &PartnershipForm) -> Result<PartnershipApplication, String> {
    let latitude =
        parse_coordinate(&form.latitude).map_err(|_| "Latitude must be a number".to_string())?;
    let longitude =
        parse_coordinate(&form.longitude).map_err(|_| "Longitude must be a number".to_string())?;

    PartnershipApplication::new(
        &form.first_name,
        &form.last_name,
        &form.cin,
        &form.phone,
        &form.email,
        &form.station_name,
        &form.governorate,
        &form.delegation,
        latitude,
        longitude,
    )
    .map_err(|e| e.to_string())
}

async fn apply_form(
    session: &Session,
    form: PartnershipForm,
    error: Option<String>,
    request_number: Option<String>,
    status: StatusCode,
) -> Result<Response, AppError> {
    let (nav, flash) = page_chrome(session).await;
    render_with_status(
        &PartnerApplyTemplate {
            nav,
            flash,
            error,
            form,
            request_number,
        },
        status,
    )
}

/// `GET /partner/dashboard`
///
/// Loads the dashboard and the station directory concurrently; the
/// directory fills in the station when the dashboard omits it.
pub(super) async fn dashboard(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Response, AppError> {
    let (token, staff) = {
        let guard = session.lock().await;
        match (guard.token(), guard.staff()) {
            (Some(token), Some(staff)) => (token.clone(), staff.clone()),
            _ => return Ok(see_other(LOGIN_PATH)),
        }
    };

    let (mut dashboard, stations) = match try_join(
        state.central.staff_dashboard(&token),
        state.central.list_stations(),
    )
    .await
    {
        Ok(loaded) => loaded,
        Err(CentralError::Unauthorized) => return Ok(expire_session(&session, LOGIN_PATH).await),
        Err(e) => return Err(e.into()),
    };

    if dashboard.station.is_none()
        && let Some(id) = &staff.station_id
    {
        dashboard.station = stations.into_iter().find(|s| &s.id == id);
    }

    let (nav, flash) = page_chrome(&session).await;
    let staff_name = format!("{} {}", staff.first_name, staff.last_name)
        .trim()
        .to_string();
    render(&PartnerDashboardTemplate {
        nav,
        flash,
        dashboard: DashboardView::new(staff_name, staff.role.clone(), &dashboard),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> PartnershipForm {
        PartnershipForm {
            first_name: "Sami".into(),
            last_name: "Trabelsi".into(),
            cin: "12345678".into(),
            phone: "98765432".into(),
            email: "sami@example.tn".into(),
            station_name: "Station Nabeul".into(),
            governorate: "Nabeul".into(),
            delegation: "Nabeul".into(),
            latitude: "36,45".into(),
            longitude: "".into(),
        }
    }

    #[test]
    fn application_from_valid_form() {
        let application = application_from(&form()).unwrap();
        assert_eq!(application.latitude, Some(36.45));
        assert_eq!(application.longitude, None);
        assert_eq!(application.cin.as_str(), "12345678");
    }

    #[test]
    fn application_reports_first_problem() {
        let mut bad = form();
        bad.latitude = "north".into();
        assert_eq!(application_from(&bad).unwrap_err(), "Latitude must be a number");

        let mut bad = form();
        bad.cin = "1234".into();
        assert!(application_from(&bad).is_err());
    }
}
