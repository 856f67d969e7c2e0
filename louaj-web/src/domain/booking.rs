//! Bookings: what we submit and what we show afterwards.

use std::fmt;

use chrono::{DateTime, Utc};

use super::{Money, SeatCount, StationId};

/// A booking request as submitted to the central server.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingRequest {
    pub departure_station_id: StationId,
    pub destination_station_id: StationId,
    pub seats: SeatCount,
    pub journey_date: DateTime<Utc>,
}

/// What the central server hands back for a new booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingReceipt {
    pub booking_id: String,
    pub payment_reference: Option<String>,
    /// Where to send the browser to pay
    pub payment_url: String,
}

/// Lifecycle status of a booking.
///
/// Statuses we do not know are preserved verbatim so a new upstream status
/// still shows up in history instead of failing the whole page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingStatus {
    Pending,
    Paid,
    Confirmed,
    Cancelled,
    Completed,
    Other(String),
}

impl BookingStatus {
    /// Parse an upstream status string (case-insensitive).
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => BookingStatus::Pending,
            "paid" => BookingStatus::Paid,
            "confirmed" => BookingStatus::Confirmed,
            "cancelled" | "canceled" => BookingStatus::Cancelled,
            "completed" => BookingStatus::Completed,
            _ => BookingStatus::Other(s.trim().to_string()),
        }
    }

    /// Short label used in templates and as a CSS class suffix.
    pub fn label(&self) -> &str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Paid => "paid",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
            BookingStatus::Other(s) => s,
        }
    }

    /// Whether the passenger still has to pay.
    pub fn awaits_payment(&self) -> bool {
        matches!(self, BookingStatus::Pending)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A booking as shown in history and detail pages.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingRecord {
    pub id: String,
    pub status: BookingStatus,
    pub departure_name: String,
    pub destination_name: String,
    pub seats: u32,
    pub total_amount: Money,
    pub journey_date: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub payment_reference: Option<String>,
    /// Code the passenger shows when boarding
    pub verification_code: Option<String>,
    pub vehicle_plate: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_statuses() {
        assert_eq!(BookingStatus::parse("PENDING"), BookingStatus::Pending);
        assert_eq!(BookingStatus::parse("paid"), BookingStatus::Paid);
        assert_eq!(BookingStatus::parse("Confirmed"), BookingStatus::Confirmed);
        assert_eq!(BookingStatus::parse("canceled"), BookingStatus::Cancelled);
        assert_eq!(BookingStatus::parse(" completed "), BookingStatus::Completed);
    }

    #[test]
    fn unknown_status_is_preserved() {
        let status = BookingStatus::parse("REFUNDED");
        assert_eq!(status, BookingStatus::Other("REFUNDED".into()));
        assert_eq!(status.label(), "REFUNDED");
        assert!(!status.awaits_payment());
    }

    #[test]
    fn only_pending_awaits_payment() {
        assert!(BookingStatus::Pending.awaits_payment());
        assert!(!BookingStatus::Paid.awaits_payment());
        assert!(!BookingStatus::Cancelled.awaits_payment());
    }
}
