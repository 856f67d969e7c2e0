//! Tunisian dinar amounts.

use std::fmt;
use std::ops::{Add, Mul};

/// An amount of money in Tunisian dinars, held as integer millimes.
///
/// One dinar is 1000 millimes. The central server sends prices as JSON
/// numbers in dinars; `from_dinars` rounds them to the nearest millime so
/// arithmetic on seat totals stays exact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money {
    millimes: u64,
}

impl Money {
    /// Zero dinars.
    pub const ZERO: Money = Money { millimes: 0 };

    /// Create from a count of millimes.
    pub fn from_millimes(millimes: u64) -> Self {
        Self { millimes }
    }

    /// Create from a dinar amount as sent by the upstream.
    ///
    /// Negative, NaN or infinite inputs become zero.
    pub fn from_dinars(dinars: f64) -> Self {
        if !dinars.is_finite() || dinars <= 0.0 {
            return Self::ZERO;
        }
        Self {
            millimes: (dinars * 1000.0).round() as u64,
        }
    }

    /// The amount in millimes.
    pub fn millimes(&self) -> u64 {
        self.millimes
    }

    /// Whether this amount is zero.
    pub fn is_zero(&self) -> bool {
        self.millimes == 0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money {
            millimes: self.millimes.saturating_add(rhs.millimes),
        }
    }
}

impl Mul<u32> for Money {
    type Output = Money;

    fn mul(self, rhs: u32) -> Money {
        Money {
            millimes: self.millimes.saturating_mul(u64::from(rhs)),
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:03} TND", self.millimes / 1000, self.millimes % 1000)
    }
}
