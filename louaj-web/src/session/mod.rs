//! Server-side browser sessions.
//!
//! The browser holds only an opaque id in the `louaj_session` cookie. The
//! token, profile and booking wizard live here, keyed by that id, and are
//! handed to handlers as a request extension.

mod middleware;
mod store;

pub use middleware::{SESSION_COOKIE, session_middleware};
pub use store::{Authenticated, Session, SessionConfig, SessionState, SessionStore};
