//! Passenger sign-in, registration and sign-out.

use axum::{
    Extension, Form,
    extract::{Query, State},
    http::StatusCode,
    response::Response,
};
use tracing::{info, warn};

use crate::domain::PhoneNumber;
use crate::session::Session;

use super::dto::{LoginForm, NextQuery, RegisterForm, safe_next};
use super::routes::{AppError, page_chrome, render, render_with_status, see_other, upstream_status};
use super::state::AppState;
use super::templates::{LoginTemplate, RegisterTemplate};

/// Where passengers land after signing in, unless told otherwise.
const AFTER_SIGN_IN: &str = "/book";

const MIN_PASSWORD_LEN: usize = 6;

/// `GET /login`
pub(super) async fn login_page(
    Extension(session): Extension<Session>,
    Query(query): Query<NextQuery>,
) -> Result<Response, AppError> {
    let (nav, flash) = page_chrome(&session).await;
    render(&LoginTemplate {
        nav,
        flash,
        error: None,
        phone: String::new(),
        next: safe_next(query.next.as_deref()).unwrap_or_default().to_string(),
    })
}

/// `POST /login`
pub(super) async fn login(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let next = safe_next(form.next.as_deref()).unwrap_or(AFTER_SIGN_IN).to_string();

    let phone = match PhoneNumber::parse(&form.phone) {
        Ok(phone) => phone,
        Err(e) => {
            return login_failed(&session, &form, e.to_string(), StatusCode::BAD_REQUEST).await;
        }
    };
    if form.password.is_empty() {
        return login_failed(
            &session,
            &form,
            "Password is required".to_string(),
            StatusCode::BAD_REQUEST,
        )
        .await;
    }

    match state.central.login(&phone, &form.password).await {
        Ok((token, profile)) => {
            let mut guard = session.lock().await;
            info!(session = %session.id(), "passenger signed in");
            guard.flash = Some(format!("Welcome back, {}.", profile.display_name()));
            guard.sign_in(token, profile);
            Ok(see_other(&next))
        }
        Err(e) => {
            warn!(error = %e, "passenger sign-in failed");
            login_failed(&session, &form, e.user_message(), upstream_status(&e)).await
        }
    }
}

async fn login_failed(
    session: &Session,
    form: &LoginForm,
    error: String,
    status: StatusCode,
) -> Result<Response, AppError> {
    let (nav, flash) = page_chrome(session).await;
    render_with_status(
        &LoginTemplate {
            nav,
            flash,
            error: Some(error),
            phone: form.phone.clone(),
            next: safe_next(form.next.as_deref()).unwrap_or_default().to_string(),
        },
        status,
    )
}

/// `GET /register`
pub(super) async fn register_page(
    Extension(session): Extension<Session>,
) -> Result<Response, AppError> {
    let (nav, flash) = page_chrome(&session).await;
    render(&RegisterTemplate {
        nav,
        flash,
        error: None,
        first_name: String::new(),
        last_name: String::new(),
        phone: String::new(),
    })
}

/// `POST /register`
pub(super) async fn register(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Form(form): Form<RegisterForm>,
) -> Result<Response, AppError> {
    let phone = match validate_registration(&form) {
        Ok(phone) => phone,
        Err(error) => {
            return register_failed(&session, &form, error, StatusCode::BAD_REQUEST).await;
        }
    };

    match state
        .central
        .register(
            form.first_name.trim(),
            form.last_name.trim(),
            &phone,
            &form.password,
        )
        .await
    {
        Ok((token, profile)) => {
            let mut guard = session.lock().await;
            info!(session = %session.id(), "passenger registered");
            guard.flash = Some(format!("Welcome, {}.", profile.display_name()));
            guard.sign_in(token, profile);
            Ok(see_other(AFTER_SIGN_IN))
        }
        Err(e) => {
            warn!(error = %e, "registration failed");
            register_failed(&session, &form, e.user_message(), upstream_status(&e)).await
        }
    }
}

/// Check a registration form locally. Returns the parsed phone number.
fn validate_registration(form: &RegisterForm) -> Result<PhoneNumber, String> {
    if form.first_name.trim().is_empty() {
        return Err("First name is required".to_string());
    }
    if form.last_name.trim().is_empty() {
        return Err("Last name is required".to_string());
    }
    let phone = PhoneNumber::parse(&form.phone).map_err(|e| e.to_string())?;
    if form.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(format!("Password must be at least {MIN_PASSWORD_LEN} characters"));
    }
    if form.password != form.confirm_password {
        return Err("Passwords do not match".to_string());
    }
    Ok(phone)
}

async fn register_failed(
    session: &Session,
    form: &RegisterForm,
    error: String,
    status: StatusCode,
) -> Result<Response, AppError> {
    let (nav, flash) = page_chrome(session).await;
    render_with_status(
        &RegisterTemplate {
            nav,
            flash,
            error: Some(error),
            first_name: form.first_name.clone(),
            last_name: form.last_name.clone(),
            phone: form.phone.clone(),
        },
        status,
    )
}

/// `POST /logout`: forget the account and the wizard.
pub(super) async fn logout(Extension(session): Extension<Session>) -> Response {
    let mut guard = session.lock().await;
    guard.sign_out();
    guard.flash = Some("You have been signed out.".to_string());
    info!(session = %session.id(), "signed out");
    see_other("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(password: &str, confirm: &str) -> RegisterForm {
        RegisterForm {
            first_name: "Amal".into(),
            last_name: "Ben Ali".into(),
            phone: "98 765 432".into(),
            password: password.into(),
            confirm_password: confirm.into(),
        }
    }

    #[test]
    fn valid_registration() {
        let phone = validate_registration(&form("secret1", "secret1")).unwrap();
        assert_eq!(phone.as_str(), "98765432");
    }

    #[test]
    fn registration_checks() {
        assert_eq!(
            validate_registration(&form("abc", "abc")).unwrap_err(),
            "Password must be at least 6 characters"
        );
        assert_eq!(
            validate_registration(&form("secret1", "secret2")).unwrap_err(),
            "Passwords do not match"
        );

        let mut missing_name = form("secret1", "secret1");
        missing_name.first_name = "  ".into();
        assert_eq!(
            validate_registration(&missing_name).unwrap_err(),
            "First name is required"
        );

        let mut bad_phone = form("secret1", "secret1");
        bad_phone.phone = "12".into();
        assert!(validate_registration(&bad_phone).is_err());
    }
}
