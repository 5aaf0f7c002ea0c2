//! Signed offsets between dates.

use core::{
    fmt,
    ops::{Mul, Neg},
};

use crate::{DayDiff, Error, Result};

/// A signed number of years and days.
///
/// Produced by [`crate::CalendarDate::distance`] and by subtracting dates, or given to the
/// arithmetic operations. Any pair of integers is a valid delta; the days are not folded into years
/// since year lengths differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DateDelta {
    pub years: DayDiff,
    pub days: DayDiff,
}

impl DateDelta {
    /// No offset at all.
    pub const ZERO: Self = Self::new(0, 0);

    pub const fn new(years: DayDiff, days: DayDiff) -> Self {
        Self { years, days }
    }

    /// An offset of only days.
    pub const fn days(days: DayDiff) -> Self {
        Self::new(0, days)
    }

    /// An offset of only years.
    pub const fn years(years: DayDiff) -> Self {
        Self::new(years, 0)
    }

    pub const fn is_zero(&self) -> bool {
        self.years == 0 && self.days == 0
    }

    /// Negate both components, failing instead of overflowing.
    pub fn checked_neg(self) -> Result<Self> {
        match (self.years.checked_neg(), self.days.checked_neg()) {
            (Some(years), Some(days)) => Ok(Self::new(years, days)),
            _ => Err(Error::Overflow),
        }
    }

    /// Scale both components, failing instead of overflowing.
    pub fn checked_mul(self, rhs: DayDiff) -> Result<Self> {
        match (self.years.checked_mul(rhs), self.days.checked_mul(rhs)) {
            (Some(years), Some(days)) => Ok(Self::new(years, days)),
            _ => Err(Error::Overflow),
        }
    }
}

/// A bare number is a count of days.
impl From<DayDiff> for DateDelta {
    fn from(value: DayDiff) -> Self {
        Self::days(value)
    }
}

impl From<(DayDiff, DayDiff)> for DateDelta {
    fn from((years, days): (DayDiff, DayDiff)) -> Self {
        Self::new(years, days)
    }
}

/// Wraps around on overflow, see [`DateDelta::checked_neg`] to catch it.
impl Neg for DateDelta {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(self.years.wrapping_neg(), self.days.wrapping_neg())
    }
}

/// Wraps around on overflow, see [`DateDelta::checked_mul`] to catch it.
impl Mul<DayDiff> for DateDelta {
    type Output = Self;

    fn mul(self, rhs: DayDiff) -> Self::Output {
        Self::new(self.years.wrapping_mul(rhs), self.days.wrapping_mul(rhs))
    }
}

impl fmt::Display for DateDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} years, {} days", self.years, self.days)
    }
}
