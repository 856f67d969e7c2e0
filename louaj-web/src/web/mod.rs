//! Web layer for the Louaj booking front end.
//!
//! Server-rendered pages for booking a seat, passenger and partner
//! accounts, and booking history.

mod account;
mod book;
mod bookings;
mod dto;
mod partner;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;
