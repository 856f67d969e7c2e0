//! Domain error types.
//!
//! Validation failures for user-supplied input. These are distinct from
//! errors talking to the central server.

use super::{InvalidCin, InvalidPhone, InvalidSeatCount, InvalidStationId};

/// Domain-level validation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    #[error(transparent)]
    Cin(#[from] InvalidCin),

    #[error(transparent)]
    Phone(#[from] InvalidPhone),

    #[error(transparent)]
    StationId(#[from] InvalidStationId),

    #[error(transparent)]
    Seats(#[from] InvalidSeatCount),

    /// A required form field was left empty
    #[error("{0} is required")]
    MissingField(&'static str),

    /// A form field had a value we could not accept
    #[error("invalid {field}: {reason}")]
    InvalidField {
        field: &'static str,
        reason: &'static str,
    },
}
