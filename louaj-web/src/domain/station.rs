//! Station identity and directory entries.

use std::fmt;

/// Error returned when parsing an invalid station id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station id: {reason}")]
pub struct InvalidStationId {
    reason: &'static str,
}

/// Identifier of a station on the central server.
///
/// The central server hands out opaque string ids. We only require them to
/// be non-empty and free of characters that would break a URL path segment,
/// since they are interpolated into `/api/v1/stations/{id}/...`.
///
/// # Examples
///
/// ```
/// use louaj_web::domain::StationId;
///
/// let id = StationId::parse("  st-tunis-01 ").unwrap();
/// assert_eq!(id.as_str(), "st-tunis-01");
///
/// assert!(StationId::parse("").is_err());
/// assert!(StationId::parse("a/b").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct StationId(String);

impl StationId {
    /// Parse a station id, trimming surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidStationId> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(InvalidStationId {
                reason: "must not be empty",
            });
        }

        if !trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(InvalidStationId {
                reason: "must contain only letters, digits, '-' or '_'",
            });
        }

        Ok(StationId(trimmed.to_string()))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A station as listed in the station directory.
///
/// A read-only snapshot: the central server owns station lifecycle and we
/// re-fetch on every page that needs it.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub id: StationId,
    pub name: String,
    /// Arabic name, when the upstream has one
    pub name_ar: Option<String>,
    pub governorate: Option<String>,
    pub delegation: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Whether the station is currently dispatching vehicles
    pub is_online: bool,
}

impl Station {
    /// A short "Governorate, Delegation" location label for display.
    pub fn location_label(&self) -> String {
        match (&self.governorate, &self.delegation) {
            (Some(g), Some(d)) if g != d => format!("{g}, {d}"),
            (Some(g), _) => g.clone(),
            (None, Some(d)) => d.clone(),
            (None, None) => String::new(),
        }
    }
}
