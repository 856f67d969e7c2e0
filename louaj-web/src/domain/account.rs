//! Authenticated identities.

use std::fmt;

use super::{Cin, PhoneNumber, StationId};

/// An opaque bearer token issued by the central server.
///
/// Never printed: `Debug` is redacted so tokens do not end up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    /// Wrap a token. Returns `None` for an empty or blank token.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            None
        } else {
            Some(AuthToken(token))
        }
    }

    /// The raw token, for the `Authorization` header.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}

/// A passenger account.
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<PhoneNumber>,
}

/// A station staff account.
#[derive(Debug, Clone, PartialEq)]
pub struct StaffProfile {
    pub id: String,
    pub cin: Cin,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub station_id: Option<StationId>,
    pub station_name: Option<String>,
}

/// Who is signed in.
#[derive(Debug, Clone, PartialEq)]
pub enum Profile {
    Passenger(UserProfile),
    Staff(StaffProfile),
}

impl Profile {
    /// Name shown in the page header.
    pub fn display_name(&self) -> String {
        let (first, last) = match self {
            Profile::Passenger(u) => (&u.first_name, &u.last_name),
            Profile::Staff(s) => (&s.first_name, &s.last_name),
        };
        format!("{first} {last}").trim().to_string()
    }

    /// The staff profile, if this is a station partner.
    pub fn as_staff(&self) -> Option<&StaffProfile> {
        match self {
            Profile::Staff(s) => Some(s),
            Profile::Passenger(_) => None,
        }
    }

    pub fn is_staff(&self) -> bool {
        self.as_staff().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_rejects_blank() {
        assert!(AuthToken::new("").is_none());
        assert!(AuthToken::new("   ").is_none());
        assert_eq!(AuthToken::new("abc").unwrap().expose(), "abc");
    }

    #[test]
    fn token_debug_is_redacted() {
        let token = AuthToken::new("super-secret").unwrap();
        let debug = format!("{:?}", token);
        assert!(!debug.contains("super-secret"));
    }

    #[test]
    fn display_name_trims_missing_parts() {
        let passenger = Profile::Passenger(UserProfile {
            id: "u1".into(),
            first_name: "Amira".into(),
            last_name: String::new(),
            phone: None,
        });
        assert_eq!(passenger.display_name(), "Amira");
        assert!(!passenger.is_staff());

        let staff = Profile::Staff(StaffProfile {
            id: "s1".into(),
            cin: Cin::parse("12345678").unwrap(),
            first_name: "Karim".into(),
            last_name: "Ben Ali".into(),
            role: "SUPERVISOR".into(),
            station_id: None,
            station_name: None,
        });
        assert_eq!(staff.display_name(), "Karim Ben Ali");
        assert!(staff.is_staff());
    }
}
