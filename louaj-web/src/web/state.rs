//! Application state for the web layer.

use std::sync::Arc;

use crate::central::CentralClient;
use crate::session::SessionStore;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Central server client
    pub central: Arc<CentralClient>,

    /// Browser sessions
    pub sessions: SessionStore,
}

impl AppState {
    /// Create a new app state.
    pub fn new(central: CentralClient, sessions: SessionStore) -> Self {
        Self {
            central: Arc::new(central),
            sessions,
        }
    }
}
