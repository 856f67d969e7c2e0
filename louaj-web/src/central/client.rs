//! Central server HTTP client.
//!
//! Async methods for every `/api/v1` endpoint the front end uses. Each
//! response is unwrapped from its `{success, message, data}` envelope and
//! converted into domain types before it is returned.

use chrono::SecondsFormat;
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::domain::{
    AuthToken, BookingReceipt, BookingRecord, BookingRequest, Cin, PartnershipApplication,
    PhoneNumber, Profile, RouteDestination, RouteDetail, Station, StationDashboard, StationId,
};

use super::convert::{
    ConversionError, convert_auth, convert_booking, convert_dashboard, convert_destination,
    convert_route_detail, convert_station, decode_each,
};
use super::error::CentralError;
use super::types::{
    AuthData, BookingDto, BookingPayload, BookingsPayload, CreateBookingBody, CreateBookingData,
    DashboardDto, DestinationDto, DestinationsPayload, Envelope, ErrorBody, LoginBody,
    PartnershipBody, PartnershipData, RegisterBody, RouteDetailPayload, StaffLoginBody,
    StaffVerifyBody, StationDto, StationsPayload, non_blank,
};

/// Default base URL for the central server.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// How much of an unparseable body to keep for diagnostics.
const BODY_SNIPPET_CHARS: usize = 500;

/// Configuration for the central server client.
#[derive(Debug, Clone)]
pub struct CentralConfig {
    /// Base URL, without the `/api/v1` suffix
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl CentralConfig {
    /// Create a config pointing at the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout_secs: 30,
        }
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for CentralConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Client for the central booking server.
#[derive(Debug, Clone)]
pub struct CentralClient {
    http: reqwest::Client,
    base_url: String,
}

impl CentralClient {
    /// Create a new client with the given configuration.
    pub fn new(config: CentralConfig) -> Result<Self, CentralError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// The base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base_url, path)
    }

    /// Send a request and unwrap the envelope, without requiring `data`.
    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        token: Option<&AuthToken>,
    ) -> Result<Envelope<T>, CentralError> {
        let request = match token {
            Some(token) => request.bearer_auth(token.expose()),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status();
        let url = response.url().path().to_string();
        let body = response.text().await?;

        debug!(%status, path = %url, "central server response");

        if !status.is_success() {
            let message = error_message(&body);

            if token.is_some()
                && (status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN)
            {
                return Err(CentralError::Unauthorized);
            }
            if status == StatusCode::NOT_FOUND && message.is_empty() {
                return Err(CentralError::NotFound);
            }
            return Err(CentralError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: Envelope<T> =
            serde_json::from_str(&body).map_err(|e| CentralError::Json {
                message: e.to_string(),
                body: Some(body.chars().take(BODY_SNIPPET_CHARS).collect()),
            })?;

        if envelope.success == Some(false) {
            return Err(CentralError::Rejected {
                message: envelope.reason().unwrap_or_default().to_string(),
            });
        }

        Ok(envelope)
    }

    /// Send a request and return the envelope's `data`.
    async fn fetch<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        token: Option<&AuthToken>,
    ) -> Result<T, CentralError> {
        self.send(request, token)
            .await?
            .data
            .ok_or(CentralError::Incomplete(ConversionError::MissingField("data")))
    }

    // ------------------------------------------------------------------
    // Station directory
    // ------------------------------------------------------------------

    /// Fetch every well-formed station, online or not.
    ///
    /// Stations missing an id or name are dropped rather than failing the
    /// listing.
    pub async fn list_stations(&self) -> Result<Vec<Station>, CentralError> {
        let payload: StationsPayload = self
            .fetch(self.http.get(self.url("/stations")), None)
            .await?;

        let raw = match payload {
            StationsPayload::List(v) | StationsPayload::Wrapped { stations: v } => v,
        };
        let total = raw.len();

        let stations: Vec<Station> = decode_each::<StationDto>(raw, "station")
            .into_iter()
            .filter_map(convert_station)
            .collect();

        if stations.len() < total {
            warn!(
                dropped = total - stations.len(),
                "dropped stations with missing fields"
            );
        }

        Ok(stations)
    }

    /// Fetch the stations currently dispatching vehicles.
    pub async fn list_online_stations(&self) -> Result<Vec<Station>, CentralError> {
        let mut stations = self.list_stations().await?;
        stations.retain(|s| s.is_online);
        Ok(stations)
    }

    // ------------------------------------------------------------------
    // Routes
    // ------------------------------------------------------------------

    /// Destinations reachable from a station. An empty list is a valid
    /// answer: nothing is queued there right now.
    pub async fn list_destinations(
        &self,
        departure: &StationId,
    ) -> Result<Vec<RouteDestination>, CentralError> {
        let url = self.url(&format!("/stations/{}/destinations", departure.as_str()));
        let payload: DestinationsPayload = self.fetch(self.http.get(url), None).await?;

        let raw = match payload {
            DestinationsPayload::List(v) | DestinationsPayload::Wrapped { destinations: v } => v,
        };

        Ok(decode_each::<DestinationDto>(raw, "destination")
            .into_iter()
            .filter_map(convert_destination)
            .collect())
    }

    /// Live queue detail for a departure/destination pair.
    pub async fn route_detail(
        &self,
        departure: &StationId,
        destination: &StationId,
    ) -> Result<RouteDetail, CentralError> {
        let url = self.url(&format!(
            "/routes/{}/{}",
            departure.as_str(),
            destination.as_str()
        ));
        let payload: RouteDetailPayload = self.fetch(self.http.get(url), None).await?;

        let dto = match payload {
            RouteDetailPayload::Wrapped { route } => route,
            RouteDetailPayload::Flat(route) => route,
        };

        Ok(convert_route_detail(dto, destination))
    }

    // ------------------------------------------------------------------
    // Bookings
    // ------------------------------------------------------------------

    /// Create a booking and return where to pay for it.
    pub async fn create_booking(
        &self,
        token: &AuthToken,
        request: &BookingRequest,
    ) -> Result<BookingReceipt, CentralError> {
        let body = CreateBookingBody {
            departure_station_id: request.departure_station_id.to_string(),
            destination_station_id: request.destination_station_id.to_string(),
            seats_booked: request.seats.get(),
            journey_date: request
                .journey_date
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        };

        let data: CreateBookingData = self
            .fetch(self.http.post(self.url("/bookings")).json(&body), Some(token))
            .await?;

        receipt_from(data)
    }

    /// The booking behind a payment gateway reference.
    pub async fn booking_by_payment_ref(
        &self,
        payment_ref: &str,
        token: Option<&AuthToken>,
    ) -> Result<BookingRecord, CentralError> {
        let url = self.url(&format!("/bookings/payment/{}", encode_segment(payment_ref)));
        let payload: BookingPayload = self.fetch(self.http.get(url), token).await?;
        single_booking(payload)
    }

    /// The signed-in passenger's bookings, newest first as the server sends them.
    pub async fn booking_history(
        &self,
        token: &AuthToken,
    ) -> Result<Vec<BookingRecord>, CentralError> {
        let payload: BookingsPayload = self
            .fetch(self.http.get(self.url("/bookings/history")), Some(token))
            .await?;

        let raw = match payload {
            BookingsPayload::List(v) | BookingsPayload::Wrapped { bookings: v } => v,
        };

        Ok(decode_each::<BookingDto>(raw, "booking")
            .into_iter()
            .filter_map(|dto| match convert_booking(dto) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(error = %e, "skipping booking in history");
                    None
                }
            })
            .collect())
    }

    /// One booking by id.
    pub async fn booking_detail(
        &self,
        token: &AuthToken,
        booking_id: &str,
    ) -> Result<BookingRecord, CentralError> {
        let url = self.url(&format!("/bookings/{}", encode_segment(booking_id)));
        let payload: BookingPayload = self.fetch(self.http.get(url), Some(token)).await?;
        single_booking(payload)
    }

    // ------------------------------------------------------------------
    // Accounts
    // ------------------------------------------------------------------

    /// Passenger sign-in with phone and password.
    pub async fn login(
        &self,
        phone: &PhoneNumber,
        password: &str,
    ) -> Result<(AuthToken, Profile), CentralError> {
        let body = LoginBody {
            phone_number: phone.to_string(),
            password: password.to_string(),
        };
        let data: AuthData = self
            .fetch(self.http.post(self.url("/auth/login")).json(&body), None)
            .await?;
        Ok(convert_auth(data, None)?)
    }

    /// Passenger registration. Signs the new passenger in.
    pub async fn register(
        &self,
        first_name: &str,
        last_name: &str,
        phone: &PhoneNumber,
        password: &str,
    ) -> Result<(AuthToken, Profile), CentralError> {
        let body = RegisterBody {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            phone_number: phone.to_string(),
            password: password.to_string(),
        };
        let data: AuthData = self
            .fetch(self.http.post(self.url("/auth/register")).json(&body), None)
            .await?;
        Ok(convert_auth(data, None)?)
    }

    /// First staff sign-in step: ask the server to text a code to the
    /// phone registered for this CIN. Returns the server's message, if any.
    pub async fn staff_login_start(&self, cin: &Cin) -> Result<Option<String>, CentralError> {
        let body = StaffLoginBody {
            cin: cin.to_string(),
        };
        let envelope: Envelope<serde_json::Value> = self
            .send(
                self.http.post(self.url("/auth/staff/login")).json(&body),
                None,
            )
            .await?;
        Ok(envelope.reason().map(str::to_string))
    }

    /// Second staff sign-in step: exchange the SMS code for a token.
    pub async fn staff_verify(
        &self,
        cin: &Cin,
        code: &str,
    ) -> Result<(AuthToken, Profile), CentralError> {
        let body = StaffVerifyBody {
            cin: cin.to_string(),
            verification_code: code.trim().to_string(),
        };
        let data: AuthData = self
            .fetch(
                self.http.post(self.url("/auth/staff/verify")).json(&body),
                None,
            )
            .await?;
        Ok(convert_auth(data, Some(*cin))?)
    }

    // ------------------------------------------------------------------
    // Station partners
    // ------------------------------------------------------------------

    /// Submit a partnership request. Returns the request number to quote.
    pub async fn submit_partnership(
        &self,
        application: &PartnershipApplication,
    ) -> Result<String, CentralError> {
        let body = PartnershipBody {
            first_name: application.first_name.clone(),
            last_name: application.last_name.clone(),
            cin: application.cin.to_string(),
            phone_number: application.phone.to_string(),
            email: application.email.clone(),
            station_name: application.station_name.clone(),
            governorate: application.governorate.clone(),
            delegation: application.delegation.clone(),
            latitude: application.latitude,
            longitude: application.longitude,
        };
        let data: PartnershipData = self
            .fetch(
                self.http
                    .post(self.url("/partnership-requests"))
                    .json(&body),
                None,
            )
            .await?;

        data.request_number
            .or(data.id)
            .ok_or(CentralError::Incomplete(ConversionError::MissingField(
                "requestNumber",
            )))
    }

    /// The signed-in staff member's station dashboard.
    pub async fn staff_dashboard(
        &self,
        token: &AuthToken,
    ) -> Result<StationDashboard, CentralError> {
        let dto: DashboardDto = self
            .fetch(self.http.get(self.url("/staff/dashboard")), Some(token))
            .await?;
        Ok(convert_dashboard(dto))
    }
}

/// Pull the user-facing message out of an error body.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(err) => non_blank(err.message.as_deref())
            .or_else(|| non_blank(err.error.as_deref()))
            .unwrap_or_default()
            .trim()
            .to_string(),
        // Not JSON: an HTML error page or a proxy message. Too noisy to show.
        Err(_) => String::new(),
    }
}

/// Percent-encode a value used as a single URL path segment.
fn encode_segment(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for b in value.bytes() {
        if b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.' | b'~') {
            out.push(b as char);
        } else {
            out.push_str(&format!("%{b:02X}"));
        }
    }
    out
}

fn single_booking(payload: BookingPayload) -> Result<BookingRecord, CentralError> {
    let raw = match payload {
        BookingPayload::Wrapped { booking } => booking,
        BookingPayload::Flat(booking) => booking,
    };
    let dto: BookingDto = serde_json::from_value(raw).map_err(|e| CentralError::Json {
        message: e.to_string(),
        body: None,
    })?;
    Ok(convert_booking(dto)?)
}

/// Extract the receipt from a booking creation payload.
///
/// The payment URL may sit at the top level, inside `payment`, or on the
/// booking itself. A response without one is a failure even if the upstream
/// said `success: true`: there is nowhere to send the passenger.
fn receipt_from(data: CreateBookingData) -> Result<BookingReceipt, CentralError> {
    let payment = data.payment.unwrap_or_default();
    let booking = data.booking.unwrap_or_default();

    let payment_url = data
        .payment_url
        .or(payment.payment_url)
        .or(payment.pay_url)
        .or(booking.payment_url)
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty())
        .ok_or(CentralError::MissingPaymentUrl)?;

    if !(payment_url.starts_with("https://") || payment_url.starts_with("http://")) {
        warn!(%payment_url, "refusing non-http payment URL");
        return Err(CentralError::MissingPaymentUrl);
    }

    let booking_id = booking
        .id
        .filter(|id| !id.trim().is_empty())
        .ok_or(CentralError::Incomplete(ConversionError::MissingField(
            "booking.id",
        )))?;

    Ok(BookingReceipt {
        booking_id,
        payment_reference: data
            .payment_reference
            .or(payment.payment_reference)
            .or(payment.payment_ref)
            .or(booking.payment_reference),
        payment_url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::central::fake::FakeCentral;
    use crate::domain::SeatCount;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn sid(s: &str) -> StationId {
        StationId::parse(s).unwrap()
    }

    fn token() -> AuthToken {
        AuthToken::new("tok-123").unwrap()
    }

    async fn client_for(fake: &FakeCentral) -> CentralClient {
        CentralClient::new(CentralConfig::new(fake.base_url())).unwrap()
    }

    fn data(value: serde_json::Value) -> CreateBookingData {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn config_defaults() {
        let config = CentralConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn config_trims_trailing_slash() {
        let config = CentralConfig::new("http://central:5000/").with_timeout(5);
        assert_eq!(config.base_url, "http://central:5000");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn receipt_requires_payment_url() {
        let err = receipt_from(data(json!({"booking": {"id": "b1"}}))).unwrap_err();
        assert!(matches!(err, CentralError::MissingPaymentUrl));
        assert_eq!(err.to_string(), "No payment URL received.");
    }

    #[test]
    fn receipt_finds_nested_payment_url() {
        let receipt = receipt_from(data(json!({
            "booking": {"id": "b1"},
            "payment": {"payUrl": "https://pay/xyz", "paymentRef": "ref-9"}
        })))
        .unwrap();
        assert_eq!(receipt.payment_url, "https://pay/xyz");
        assert_eq!(receipt.payment_reference.as_deref(), Some("ref-9"));
    }

    #[test]
    fn receipt_rejects_non_http_url() {
        let err = receipt_from(data(json!({
            "booking": {"id": "b1"},
            "paymentUrl": "javascript:alert(1)"
        })))
        .unwrap_err();
        assert!(matches!(err, CentralError::MissingPaymentUrl));
    }

    #[test]
    fn encode_segment_escapes_reserved() {
        assert_eq!(encode_segment("abc-123"), "abc-123");
        assert_eq!(encode_segment("a/b?c"), "a%2Fb%3Fc");
    }

    #[test]
    fn error_message_reads_json_only() {
        assert_eq!(error_message(r#"{"message": " Bad CIN "}"#), "Bad CIN");
        assert_eq!(error_message(r#"{"error": "Nope"}"#), "Nope");
        assert_eq!(error_message(r#"{"message": " ", "error": "E1"}"#), "E1");
        assert_eq!(error_message("<html>502</html>"), "");
    }

    #[tokio::test]
    async fn lists_only_well_formed_online_stations() {
        let fake = FakeCentral::start().await;
        fake.respond(
            "GET",
            "/api/v1/stations",
            200,
            json!({"success": true, "data": [
                {"id": "x", "name": "StationX", "isOnline": true},
                {"id": "z", "name": "StationZ", "isOnline": false},
                {"name": "No id"},
                42
            ]}),
        );

        let client = client_for(&fake).await;
        let all = client.list_stations().await.unwrap();
        assert_eq!(all.len(), 2);

        let online = client.list_online_stations().await.unwrap();
        assert_eq!(online.len(), 1);
        assert_eq!(online[0].name, "StationX");
    }

    #[tokio::test]
    async fn empty_destinations_is_ok() {
        let fake = FakeCentral::start().await;
        fake.respond(
            "GET",
            "/api/v1/stations/A/destinations",
            200,
            json!({"success": true, "data": {"destinations": []}}),
        );

        let client = client_for(&fake).await;
        let destinations = client.list_destinations(&sid("A")).await.unwrap();
        assert!(destinations.is_empty());
    }

    #[tokio::test]
    async fn http_error_surfaces_upstream_message() {
        let fake = FakeCentral::start().await;
        fake.respond(
            "GET",
            "/api/v1/stations/A/destinations",
            400,
            json!({"success": false, "message": "Station is closed"}),
        );

        let client = client_for(&fake).await;
        let err = client.list_destinations(&sid("A")).await.unwrap_err();
        assert!(matches!(err, CentralError::Api { status: 400, .. }));
        assert_eq!(err.user_message(), "Station is closed");
    }

    #[tokio::test]
    async fn success_false_is_rejected() {
        let fake = FakeCentral::start().await;
        fake.respond(
            "GET",
            "/api/v1/routes/A/B",
            200,
            json!({"success": false, "message": "No route"}),
        );

        let client = client_for(&fake).await;
        let err = client.route_detail(&sid("A"), &sid("B")).await.unwrap_err();
        assert!(matches!(err, CentralError::Rejected { ref message } if message == "No route"));
    }

    #[tokio::test]
    async fn garbage_body_is_json_error() {
        let fake = FakeCentral::start().await;
        fake.respond_raw("GET", "/api/v1/stations", 200, "<html>oops</html>");

        let client = client_for(&fake).await;
        let err = client.list_stations().await.unwrap_err();
        assert!(matches!(err, CentralError::Json { .. }));
    }

    #[tokio::test]
    async fn create_booking_sends_bearer_and_body() {
        let fake = FakeCentral::start().await;
        fake.respond(
            "POST",
            "/api/v1/bookings",
            201,
            json!({"success": true, "data": {
                "booking": {"id": "b-1", "paymentReference": "pr-1"},
                "paymentUrl": "https://pay/abc"
            }}),
        );

        let client = client_for(&fake).await;
        let request = BookingRequest {
            departure_station_id: sid("X"),
            destination_station_id: sid("Y"),
            seats: SeatCount::new(3, 4).unwrap(),
            journey_date: Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap(),
        };

        let receipt = client.create_booking(&token(), &request).await.unwrap();
        assert_eq!(receipt.booking_id, "b-1");
        assert_eq!(receipt.payment_url, "https://pay/abc");
        assert_eq!(receipt.payment_reference.as_deref(), Some("pr-1"));

        let recorded = fake.requests();
        let last = recorded.last().unwrap();
        assert_eq!(last.authorization.as_deref(), Some("Bearer tok-123"));
        assert_eq!(last.body["seatsBooked"], 3);
        assert_eq!(last.body["departureStationId"], "X");
        assert_eq!(last.body["journeyDate"], "2026-10-19T09:00:00.000Z");
    }

    #[tokio::test]
    async fn expired_token_is_unauthorized() {
        let fake = FakeCentral::start().await;
        fake.respond(
            "GET",
            "/api/v1/bookings/history",
            401,
            json!({"message": "jwt expired"}),
        );

        let client = client_for(&fake).await;
        let err = client.booking_history(&token()).await.unwrap_err();
        assert!(matches!(err, CentralError::Unauthorized));
    }

    #[tokio::test]
    async fn failed_login_keeps_upstream_message() {
        let fake = FakeCentral::start().await;
        fake.respond(
            "POST",
            "/api/v1/auth/login",
            401,
            json!({"success": false, "message": "Invalid phone number or password"}),
        );

        let client = client_for(&fake).await;
        let phone = PhoneNumber::parse("20123456").unwrap();
        let err = client.login(&phone, "wrong").await.unwrap_err();
        assert_eq!(err.user_message(), "Invalid phone number or password");
    }

    #[tokio::test]
    async fn history_skips_bookings_without_id() {
        let fake = FakeCentral::start().await;
        fake.respond(
            "GET",
            "/api/v1/bookings/history",
            200,
            json!({"success": true, "data": {"bookings": [
                {"id": "b1", "status": "PAID", "seatsBooked": 1},
                {"status": "PENDING"}
            ]}}),
        );

        let client = client_for(&fake).await;
        let history = client.booking_history(&token()).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id, "b1");
    }

    #[tokio::test]
    async fn missing_booking_is_not_found() {
        let fake = FakeCentral::start().await;
        let client = client_for(&fake).await;
        let err = client.booking_detail(&token(), "nope").await.unwrap_err();
        assert!(matches!(err, CentralError::NotFound));
    }

    #[tokio::test]
    async fn staff_login_start_returns_message() {
        let fake = FakeCentral::start().await;
        fake.respond(
            "POST",
            "/api/v1/auth/staff/login",
            200,
            json!({"success": true, "message": "Code sent to ***456"}),
        );

        let client = client_for(&fake).await;
        let cin = Cin::parse("12345678").unwrap();
        let message = client.staff_login_start(&cin).await.unwrap();
        assert_eq!(message.as_deref(), Some("Code sent to ***456"));
        assert_eq!(fake.requests().last().unwrap().body["cin"], "12345678");
    }

    #[tokio::test]
    async fn partnership_returns_request_number() {
        let fake = FakeCentral::start().await;
        fake.respond(
            "POST",
            "/api/v1/partnership-requests",
            201,
            json!({"success": true, "data": {"requestNumber": "PR-2026-0042"}}),
        );

        let client = client_for(&fake).await;
        let application = PartnershipApplication::new(
            "Sami", "Trabelsi", "12345678", "98765432", "sami@example.tn", "Station Nabeul",
            "Nabeul", "Nabeul", None, None,
        )
        .unwrap();
        let number = client.submit_partnership(&application).await.unwrap();
        assert_eq!(number, "PR-2026-0042");

        let recorded = fake.requests();
        let body = &recorded.last().unwrap().body;
        assert_eq!(body["phoneNumber"], "98765432");
        assert!(body.get("latitude").is_none());
    }
}
