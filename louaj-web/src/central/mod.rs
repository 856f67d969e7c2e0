//! Central server client.
//!
//! The central server owns stations, vehicle queues, bookings, payments
//! and accounts. This module is the only place that speaks its JSON:
//!
//! - every response arrives in a `{success, message, data}` envelope, and
//!   `success: false` is an error even on HTTP 200
//! - payload shapes vary between deployments (bare arrays vs. wrapped
//!   objects, numbers as strings), so DTOs are lenient and `convert`
//!   applies defaults

mod client;
mod convert;
mod error;
#[cfg(test)]
pub(crate) mod fake;
mod types;

pub use client::{CentralClient, CentralConfig, DEFAULT_BASE_URL};
pub use convert::{ConversionError, UNKNOWN_DEPARTURE};
pub use error::{CentralError, TRY_AGAIN};
