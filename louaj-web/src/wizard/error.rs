//! Booking wizard errors.

use crate::central::CentralError;
use crate::domain::{InvalidSeatCount, StationId};

use super::Step;

/// Why a wizard transition did not happen.
#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    /// Booking needs a signed-in passenger
    #[error("Please sign in to book a trip.")]
    NotSignedIn,

    /// The action does not apply to the current step
    #[error("Cannot {action} from the {current} step.")]
    WrongStep { action: &'static str, current: Step },

    /// `back` from the first step
    #[error("Already at the first step.")]
    AtFirstStep,

    /// The chosen departure station is not dispatching vehicles
    #[error("{0} is offline and not dispatching vehicles.")]
    StationOffline(String),

    /// The chosen destination is not one of those offered
    #[error("{0} is not a destination from this station.")]
    UnknownDestination(StationId),

    #[error(transparent)]
    Seats(#[from] InvalidSeatCount),

    #[error(transparent)]
    Central(#[from] CentralError),
}

impl WizardError {
    /// The message to show on the current step.
    pub fn user_message(&self) -> String {
        match self {
            WizardError::Central(e) => e.user_message(),
            other => other.to_string(),
        }
    }

    /// Whether the error came from the central server rather than a local check.
    pub fn is_upstream(&self) -> bool {
        matches!(self, WizardError::Central(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = WizardError::WrongStep {
            action: "choose a destination",
            current: Step::Departure,
        };
        assert_eq!(
            err.to_string(),
            "Cannot choose a destination from the departure step."
        );

        let err = WizardError::StationOffline("Station Kef".into());
        assert_eq!(
            err.to_string(),
            "Station Kef is offline and not dispatching vehicles."
        );
    }

    #[test]
    fn central_errors_use_their_user_message() {
        let err = WizardError::from(CentralError::MissingPaymentUrl);
        assert_eq!(err.user_message(), "No payment URL received.");
        assert!(err.is_upstream());

        let err = WizardError::from(InvalidSeatCount::Zero);
        assert_eq!(err.user_message(), "Please select at least one seat");
        assert!(!err.is_upstream());
    }
}
