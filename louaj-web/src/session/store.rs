//! Session storage.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tokio::sync::{Mutex, MutexGuard};
use uuid::Uuid;

use crate::domain::{AuthToken, Cin, Profile, StaffProfile};
use crate::wizard::BookingWizard;

/// Configuration for the session store.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Sessions idle for longer than this are dropped.
    pub idle_ttl: Duration,

    /// Maximum number of live sessions.
    pub max_capacity: u64,

    /// Mark the session cookie `Secure`.
    pub secure_cookies: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_ttl: Duration::from_secs(120 * 60),
            max_capacity: 10_000,
            secure_cookies: false,
        }
    }
}

/// A signed-in account: the bearer token and who it belongs to.
#[derive(Debug, Clone)]
pub struct Authenticated {
    pub token: AuthToken,
    pub profile: Profile,
}

/// Everything one browser session owns.
#[derive(Debug, Default)]
pub struct SessionState {
    pub auth: Option<Authenticated>,
    pub wizard: BookingWizard,
    /// One-shot notice shown on the next rendered page
    pub flash: Option<String>,
    /// CIN waiting for its SMS code during staff sign-in
    pub pending_cin: Option<Cin>,
}

impl SessionState {
    /// The bearer token, if signed in.
    pub fn token(&self) -> Option<&AuthToken> {
        self.auth.as_ref().map(|a| &a.token)
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.auth.as_ref().map(|a| &a.profile)
    }

    /// The staff profile, if signed in as a station partner.
    pub fn staff(&self) -> Option<&StaffProfile> {
        self.profile().and_then(Profile::as_staff)
    }

    pub fn sign_in(&mut self, token: AuthToken, profile: Profile) {
        self.auth = Some(Authenticated { token, profile });
        self.pending_cin = None;
    }

    /// Forget the account and start the wizard over.
    pub fn sign_out(&mut self) {
        self.auth = None;
        self.pending_cin = None;
        self.wizard.reset();
    }

    /// Take the pending notice, leaving none.
    pub fn take_flash(&mut self) -> Option<String> {
        self.flash.take()
    }
}

/// Handle to one session.
///
/// Cheap to clone. All access goes through an async mutex, so a handler
/// that holds the lock across an upstream call serializes the session's
/// booking flow.
#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    state: Arc<Mutex<SessionState>>,
}

impl Session {
    fn new(id: Uuid) -> Self {
        Self {
            id,
            state: Arc::new(Mutex::new(SessionState::default())),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub async fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().await
    }
}

/// In-memory session store.
#[derive(Clone)]
pub struct SessionStore {
    sessions: MokaCache<Uuid, Session>,
    secure_cookies: bool,
}

impl SessionStore {
    /// Create a new store with the given configuration.
    pub fn new(config: &SessionConfig) -> Self {
        let sessions = MokaCache::builder()
            .time_to_idle(config.idle_ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self {
            sessions,
            secure_cookies: config.secure_cookies,
        }
    }

    /// Whether session cookies should carry the `Secure` attribute.
    pub fn secure_cookies(&self) -> bool {
        self.secure_cookies
    }

    /// Look up a live session.
    pub async fn get(&self, id: &Uuid) -> Option<Session> {
        self.sessions.get(id).await
    }

    /// Start a fresh session.
    pub async fn create(&self) -> Session {
        let session = Session::new(Uuid::new_v4());
        self.sessions.insert(session.id, session.clone()).await;
        session
    }

    /// Resume the session named by a cookie value, or start a new one if
    /// the value is missing, malformed or expired. The flag is true when a
    /// new session was created.
    pub async fn resume(&self, cookie: Option<&str>) -> (Session, bool) {
        let existing = match cookie.and_then(|v| Uuid::parse_str(v).ok()) {
            Some(id) => self.get(&id).await,
            None => None,
        };

        match existing {
            Some(session) => (session, false),
            None => (self.create().await, true),
        }
    }

    /// Drop a session.
    pub async fn remove(&self, id: &Uuid) {
        self.sessions.invalidate(id).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> SessionStore {
        SessionStore::new(&SessionConfig::default())
    }

    #[tokio::test]
    async fn created_session_can_be_resumed() {
        let store = store();
        let session = store.create().await;
        session.lock().await.flash = Some("hello".into());

        let (resumed, created) = store.resume(Some(&session.id().to_string())).await;

        assert!(!created);
        assert_eq!(resumed.id(), session.id());
        assert_eq!(resumed.lock().await.take_flash().as_deref(), Some("hello"));
        assert!(session.lock().await.flash.is_none());
    }

    #[tokio::test]
    async fn garbage_cookie_starts_new_session() {
        let store = store();
        let (_, created) = store.resume(Some("not-a-uuid")).await;
        assert!(created);
    }

    #[tokio::test]
    async fn unknown_id_starts_new_session() {
        let store = store();
        let stale = Uuid::new_v4();

        let (session, created) = store.resume(Some(&stale.to_string())).await;

        assert!(created);
        assert_ne!(session.id(), stale);
    }

    #[tokio::test]
    async fn removed_session_is_gone() {
        let store = store();
        let session = store.create().await;

        store.remove(&session.id()).await;

        assert!(store.get(&session.id()).await.is_none());
    }

    #[tokio::test]
    async fn sign_out_clears_auth_and_wizard() {
        let store = store();
        let session = store.create().await;
        let mut state = session.lock().await;
        state.sign_in(
            AuthToken::new("tok").unwrap(),
            Profile::Passenger(crate::domain::UserProfile {
                id: "u1".into(),
                first_name: "Amal".into(),
                last_name: "Ben Ali".into(),
                phone: None,
            }),
        );
        assert!(state.token().is_some());
        assert!(state.staff().is_none());

        state.sign_out();

        assert!(state.token().is_none());
        assert!(state.profile().is_none());
    }
}
