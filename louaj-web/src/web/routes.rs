//! HTTP router, shared handlers and the web error type.

use askama::Template;
use axum::{
    Extension, Json, Router,
    extract::State,
    http::{HeaderValue, StatusCode, header},
    middleware,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::central::{CentralError, TRY_AGAIN};
use crate::session::{Session, session_middleware};

use super::dto::*;
use super::state::AppState;
use super::templates::*;
use super::{account, book, bookings, partner};

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    let pages = Router::new()
        .route("/", get(index_page))
        .route("/api/stations", get(list_stations))
        .route("/book", get(book::show))
        .route("/book/departure", post(book::select_departure))
        .route("/book/destination", post(book::select_destination))
        .route("/book/seats", post(book::confirm_seats))
        .route("/book/back", post(book::back))
        .route("/book/confirm", post(book::submit))
        .route("/login", get(account::login_page).post(account::login))
        .route("/register", get(account::register_page).post(account::register))
        .route("/logout", post(account::logout))
        .route(
            "/partner/login",
            get(partner::login_page).post(partner::start_login),
        )
        .route("/partner/verify", post(partner::verify))
        .route("/partner/apply", get(partner::apply_page).post(partner::apply))
        .route("/partner/dashboard", get(partner::dashboard))
        .route("/bookings", get(bookings::history))
        .route("/bookings/:id", get(bookings::detail))
        .route("/payment/return", get(bookings::payment_return))
        .layer(middleware::from_fn_with_state(
            state.sessions.clone(),
            session_middleware,
        ));

    Router::new()
        .merge(pages)
        .route("/health", get(health))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Home page with the online station list.
async fn index_page(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Response, AppError> {
    let (nav, flash) = page_chrome(&session).await;

    let (stations, error) = match state.central.list_online_stations().await {
        Ok(stations) => (stations.iter().map(StationView::from_station).collect(), None),
        Err(e) => {
            warn!(error = %e, "could not load stations for home page");
            (Vec::new(), Some(e.user_message()))
        }
    };

    render(&IndexTemplate {
        nav,
        flash,
        stations,
        error,
    })
}

/// All well-formed stations, with their online status.
async fn list_stations(State(state): State<AppState>) -> Response {
    match state.central.list_stations().await {
        Ok(stations) => Json(StationsResponse {
            stations: stations.iter().map(StationResult::from).collect(),
        })
        .into_response(),
        Err(e) => {
            warn!(error = %e, "station listing failed");
            (
                upstream_status(&e),
                Json(ErrorResponse {
                    error: e.user_message(),
                }),
            )
                .into_response()
        }
    }
}

// ============================================================================
// Helpers shared by the page handlers
// ============================================================================

/// Header and one-shot notice for a page. Consumes the notice.
pub(super) async fn page_chrome(session: &Session) -> (Nav, Option<String>) {
    let mut state = session.lock().await;
    (Nav::from_session(&state), state.take_flash())
}

/// Render a template as an HTML response.
pub(super) fn render<T: Template>(template: &T) -> Result<Response, AppError> {
    render_with_status(template, StatusCode::OK)
}

pub(super) fn render_with_status<T: Template>(
    template: &T,
    status: StatusCode,
) -> Result<Response, AppError> {
    let html = template.render().map_err(|e| AppError::Internal {
        message: format!("Template error: {e}"),
    })?;
    Ok((status, Html(html)).into_response())
}

/// `303 See Other` to `location`, or to the home page if `location`
/// cannot be sent as a header.
pub(super) fn see_other(location: &str) -> Response {
    let location = HeaderValue::from_str(location).unwrap_or_else(|_| {
        warn!(location, "refusing redirect to invalid location");
        HeaderValue::from_static("/")
    });
    (StatusCode::SEE_OTHER, [(header::LOCATION, location)]).into_response()
}

/// The token was refused upstream: sign the session out and send it to
/// `login`.
pub(super) async fn expire_session(session: &Session, login: &str) -> Response {
    let mut state = session.lock().await;
    state.sign_out();
    state.flash = Some(CentralError::Unauthorized.user_message());
    see_other(login)
}

/// HTTP status for a page that failed because of the central server.
pub(super) fn upstream_status(e: &CentralError) -> StatusCode {
    match e {
        CentralError::Unauthorized => StatusCode::UNAUTHORIZED,
        CentralError::NotFound => StatusCode::NOT_FOUND,
        CentralError::Api { status, .. } if (400..500).contains(status) => {
            StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_REQUEST)
        }
        CentralError::Rejected { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::BAD_GATEWAY,
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Upstream(CentralError),
    Internal { message: String },
}

impl From<CentralError> for AppError {
    fn from(e: CentralError) -> Self {
        AppError::Upstream(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, title, message) = match &self {
            AppError::BadRequest { message } => {
                (StatusCode::BAD_REQUEST, "Bad request", message.clone())
            }
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, "Not found", message.clone()),
            AppError::Upstream(e) => {
                let status = upstream_status(e);
                let title = if status == StatusCode::NOT_FOUND {
                    "Not found"
                } else {
                    "Request failed"
                };
                (status, title, e.user_message())
            }
            AppError::Internal { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Something went wrong",
                TRY_AGAIN.to_string(),
            ),
        };

        if status.is_server_error() {
            error!(%status, error = ?self, "request failed");
        } else {
            warn!(%status, error = ?self, "request refused");
        }

        let page = ErrorTemplate {
            nav: Nav::default(),
            flash: None,
            title: title.to_string(),
            message,
        };
        match page.render() {
            Ok(html) => (status, Html(html)).into_response(),
            Err(_) => (status, TRY_AGAIN).into_response(),
        }
    }
}
