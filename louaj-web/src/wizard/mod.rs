//! The booking wizard.
//!
//! A strictly linear state machine over the four booking steps:
//!
//! ```text
//! departure -> destination -> seats -> confirm -> (payment redirect)
//! ```
//!
//! Each forward step that needs data makes exactly one call to the
//! [`BookingBackend`]; a failed call leaves the wizard where it was with an
//! error message. Going back discards whatever the abandoned step loaded.

mod backend;
mod error;
mod state;

pub use backend::BookingBackend;
pub use error::WizardError;
pub use state::{BookingWizard, Step, WizardState};
