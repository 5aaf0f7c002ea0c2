//! Integer aliases for the date fields and the table of months.

use core::{fmt, str::FromStr};

use crate::{Error, Field, Result};

/// Counts grand cycles (periods of 23 cycles), starting from 1.
pub type GrandCycle = u32;

/// Counts cycles (periods of 13 years) within a grand cycle, 1 to 23.
pub type Cycle = u8;

/// Counts years within a cycle, 1 to 13.
pub type Year = u8;

/// Counts days of a month, 1 to 34.
pub type Dom = u8;

/// Counts days of a year, 1 to 313.
pub type Doy = u16;

/// Counts years since the epoch regardless of cycles (`1:1:1` is year 1).
///
/// Signed so arithmetic can step outside the calendar before the result is checked.
pub type AbsYear = i64;

/// Counts consecutive days or years for addition and subtraction operations.
pub type DayDiff = i64;

/// The ten months of a year, the last one being the short intercalary month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Month {
    Sirelle = 1,
    Tiri = 2,
    Enna = 3,
    Fis = 4,
    Klesni = 5,
    Pelio = 6,
    Kria = 7,
    Sui = 8,
    Brilia = 9,
    Neyu = 10,
}

impl Month {
    /// The first month of the year.
    pub const MIN: Self = Self::Sirelle;

    /// The last month of the year, which is also the intercalary one.
    pub const MAX: Self = Self::Neyu;

    /// Every month in order.
    pub const ALL: [Self; 10] = [
        Self::Sirelle,
        Self::Tiri,
        Self::Enna,
        Self::Fis,
        Self::Klesni,
        Self::Pelio,
        Self::Kria,
        Self::Sui,
        Self::Brilia,
        Self::Neyu,
    ];

    /// Return the number of this month (1 to 10).
    pub const fn get(&self) -> u8 {
        *self as u8
    }

    /// The month with the given number if it is on 1 to 10.
    pub const fn from_number(value: u8) -> Option<Self> {
        match value {
            1..=10 => Some(Self::ALL[value as usize - 1]),
            _ => None,
        }
    }

    /// Full name of the month.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Sirelle => "Sirelle",
            Self::Tiri => "Tiri",
            Self::Enna => "Enna",
            Self::Fis => "Fis",
            Self::Klesni => "Klesni",
            Self::Pelio => "Pelio",
            Self::Kria => "Kria",
            Self::Sui => "Sui",
            Self::Brilia => "Brilia",
            Self::Neyu => "Neyu",
        }
    }

    /// Abbreviated name, the first three characters of [`Self::name`].
    pub fn abbrev(&self) -> &'static str {
        // all names are ASCII and at least three characters long
        &self.name()[..3]
    }

    /// Look a month up by its full name (case sensitive).
    pub fn from_name(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.name() == name)
            .ok_or_else(|| Error::UnknownMonth(name.to_string()))
    }

    /// Look a month up by its three letter abbreviation (case sensitive).
    pub fn from_abbrev(abbrev: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.abbrev() == abbrev)
    }
}

impl TryFrom<i64> for Month {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        u8::try_from(value)
            .ok()
            .and_then(Self::from_number)
            .ok_or(Error::Validation {
                field: Field::Month,
                min: Self::MIN.get() as i64,
                max: Self::MAX.get() as i64,
                value,
            })
    }
}

impl TryFrom<u8> for Month {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        Self::try_from(value as i64)
    }
}

impl From<Month> for u8 {
    fn from(value: Month) -> Self {
        value.get()
    }
}

impl FromStr for Month {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
