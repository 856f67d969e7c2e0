//! Identity numbers: national ID card (CIN) and phone numbers.

use std::fmt;

/// Error returned when parsing an invalid CIN.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid CIN: {reason}")]
pub struct InvalidCin {
    reason: &'static str,
}

/// A Tunisian national identity card number.
///
/// Always exactly 8 ASCII digits. Station staff log in with their CIN, so
/// this is the only shape the login form accepts; any other input is
/// rejected before reaching the central server.
///
/// # Examples
///
/// ```
/// use louaj_web::domain::Cin;
///
/// let cin = Cin::parse("01234567").unwrap();
/// assert_eq!(cin.as_str(), "01234567");
///
/// assert!(Cin::parse("1234567").is_err());
/// assert!(Cin::parse("USSR1234").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cin([u8; 8]);

impl Cin {
    /// Parse a CIN, ignoring surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidCin> {
        let bytes = s.trim().as_bytes();

        if bytes.len() != 8 {
            return Err(InvalidCin {
                reason: "must be exactly 8 digits",
            });
        }

        if !bytes.iter().all(u8::is_ascii_digit) {
            return Err(InvalidCin {
                reason: "must contain only digits",
            });
        }

        let mut digits = [0u8; 8];
        digits.copy_from_slice(bytes);
        Ok(Cin(digits))
    }

    /// Returns the CIN as a string slice.
    pub fn as_str(&self) -> &str {
        // Only ASCII digits are ever stored
        std::str::from_utf8(&self.0).unwrap_or_default()
    }

    /// The CIN with all but the last three digits hidden, for display.
    pub fn masked(&self) -> String {
        format!("*****{}", &self.as_str()[5..])
    }
}

impl fmt::Debug for Cin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cin({})", self.masked())
    }
}

impl fmt::Display for Cin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an invalid phone number.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid phone number: {reason}")]
pub struct InvalidPhone {
    reason: &'static str,
}

/// A Tunisian phone number in its 8-digit national form.
///
/// Accepts the `+216` and `00216` international prefixes and ignores spaces,
/// dashes and dots, so `"+216 20 123 456"` and `"20123456"` are the same
/// number.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Parse and normalize a phone number.
    pub fn parse(s: &str) -> Result<Self, InvalidPhone> {
        let compact: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '.'))
            .collect();

        let national = compact
            .strip_prefix("+216")
            .or_else(|| compact.strip_prefix("00216"))
            .unwrap_or(&compact);

        if national.len() != 8 {
            return Err(InvalidPhone {
                reason: "must have 8 digits",
            });
        }

        if !national.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidPhone {
                reason: "must contain only digits",
            });
        }

        if national.starts_with('0') {
            return Err(InvalidPhone {
                reason: "must not start with 0",
            });
        }

        Ok(PhoneNumber(national.to_string()))
    }

    /// The 8-digit national form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The international form, e.g. `+21620123456`.
    pub fn international(&self) -> String {
        format!("+216{}", self.0)
    }
}

impl fmt::Debug for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PhoneNumber({})", self.0)
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_cin() {
        assert!(Cin::parse("12345678").is_ok());
        assert!(Cin::parse("00000001").is_ok());
        assert_eq!(Cin::parse(" 09876543 ").unwrap().as_str(), "09876543");
    }

    #[test]
    fn reject_cin_wrong_length() {
        assert!(Cin::parse("").is_err());
        assert!(Cin::parse("1234567").is_err());
        assert!(Cin::parse("123456789").is_err());
    }

    #[test]
    fn reject_cin_letters() {
        assert!(Cin::parse("1234567A").is_err());
        assert!(Cin::parse("USSR1234").is_err());
        assert!(Cin::parse("1234 678").is_err());
    }

    #[test]
    fn cin_debug_is_masked() {
        let cin = Cin::parse("12345678").unwrap();
        assert_eq!(cin.masked(), "*****678");
        assert_eq!(format!("{:?}", cin), "Cin(*****678)");
        assert_eq!(cin.to_string(), "12345678");
    }

    #[test]
    fn parse_phone_forms() {
        let plain = PhoneNumber::parse("20123456").unwrap();
        let spaced = PhoneNumber::parse("20 123 456").unwrap();
        let plus = PhoneNumber::parse("+216 20-123-456").unwrap();
        let zeros = PhoneNumber::parse("0021620123456").unwrap();

        assert_eq!(plain, spaced);
        assert_eq!(plain, plus);
        assert_eq!(plain, zeros);
        assert_eq!(plain.as_str(), "20123456");
        assert_eq!(plain.international(), "+21620123456");
    }

    #[test]
    fn reject_bad_phones() {
        assert!(PhoneNumber::parse("").is_err());
        assert!(PhoneNumber::parse("2012345").is_err());
        assert!(PhoneNumber::parse("201234567").is_err());
        assert!(PhoneNumber::parse("2012345a").is_err());
        assert!(PhoneNumber::parse("02012345").is_err());
        assert!(PhoneNumber::parse("+33612345678").is_err());
    }
}
