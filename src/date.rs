//! The hierarchical date type and its validation.

use core::cmp::Ordering;

use crate::{
    CYCLES_PER_GRAND_CYCLE, Cycle, Dom, Doy, Error, Field, GrandCycle, IntoMonth, Month, Result,
    YEARS_PER_CYCLE, Year,
};

/// A Clerèssian date: `grand_cycle:cycle:year month day`.
///
/// Every instance is valid; all constructors check the complete set of fields at once since the
/// range of the day depends on the month and on whether the year is leap. Equality is field-wise
/// while ordering goes through the absolute projection ([`Self::to_absolute`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CalendarDate {
    grand_cycle: GrandCycle,
    cycle: Cycle,
    year: Year,
    month: Month,
    day: Dom,
}

/// Check `value` is on `min..=max` or name the field in the error.
fn check(field: Field, value: i64, min: i64, max: i64) -> Result<i64> {
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(Error::Validation {
            field,
            min,
            max,
            value,
        })
    }
}

impl CalendarDate {
    /// The first day of the calendar, `1:1:1 Sirelle 1`.
    pub const MIN: Self = Self {
        grand_cycle: 1,
        cycle: 1,
        year: 1,
        month: Month::MIN,
        day: 1,
    };

    /// Create a new date, checking the grand cycle, cycle, year, month and day in that order.
    ///
    /// The month may be given as a number, a [`Month`] or a full month name (see [`IntoMonth`]).
    /// The day must be on 1 to 34, except for the intercalary month [`Month::Neyu`] which has 6
    /// days, or 7 in leap years.
    pub fn new(
        grand_cycle: GrandCycle,
        cycle: Cycle,
        year: Year,
        month: impl IntoMonth,
        day: Dom,
    ) -> Result<Self> {
        Self::from_raw(
            grand_cycle as i64,
            cycle as i64,
            year as i64,
            month,
            day as i64,
        )
    }

    /// Same as [`Self::new`] but with unchecked wide integers, as produced by parsing.
    pub(crate) fn from_raw(
        grand_cycle: i64,
        cycle: i64,
        year: i64,
        month: impl IntoMonth,
        day: i64,
    ) -> Result<Self> {
        let grand_cycle = check(Field::GrandCycle, grand_cycle, 1, GrandCycle::MAX as i64)?;
        let cycle = check(Field::Cycle, cycle, 1, CYCLES_PER_GRAND_CYCLE as i64)? as Cycle;
        let year = check(Field::Year, year, 1, YEARS_PER_CYCLE as i64)? as Year;
        let month = month.into_month()?;
        let day = check(Field::Day, day, 1, crate::days_in_month(cycle, year, month) as i64)?;

        Ok(Self {
            grand_cycle: grand_cycle as GrandCycle,
            cycle,
            year,
            month,
            day: day as Dom,
        })
    }

    /// Create a copy of this date with some of the fields replaced.
    ///
    /// The result is checked as a whole, so fields that depend on each other (a leap day and its
    /// year for instance) can be changed together.
    pub fn replace(&self, overrides: Overrides) -> Result<Self> {
        let Overrides {
            grand_cycle,
            cycle,
            year,
            month,
            day,
        } = overrides;

        Self::new(
            grand_cycle.unwrap_or(self.grand_cycle),
            cycle.unwrap_or(self.cycle),
            year.unwrap_or(self.year),
            month.unwrap_or(Ok(self.month)),
            day.unwrap_or(self.day),
        )
    }

    // getters

    /// Getter for the grand cycle (period of 23 cycles).
    pub const fn grand_cycle(&self) -> GrandCycle {
        self.grand_cycle
    }

    /// Getter for the cycle within the grand cycle (period of 13 years).
    pub const fn cycle(&self) -> Cycle {
        self.cycle
    }

    /// Getter for the year within the cycle.
    pub const fn year(&self) -> Year {
        self.year
    }

    /// Getter for the month.
    pub const fn month(&self) -> Month {
        self.month
    }

    /// Getter for the day of the month.
    pub const fn day(&self) -> Dom {
        self.day
    }

    /// Full name of the month.
    pub const fn month_name(&self) -> &'static str {
        self.month.name()
    }

    /// First three characters of the month name.
    pub fn month_abbrev(&self) -> &'static str {
        self.month.abbrev()
    }

    /// Is the year of this date leap (see [`crate::is_leap_year`]).
    pub const fn is_leap_year(&self) -> bool {
        crate::is_leap_year(self.cycle, self.year)
    }

    /// The number of days in the month of this date.
    pub const fn days_in_month(&self) -> Dom {
        crate::days_in_month(self.cycle, self.year, self.month)
    }

    /// The number of days in the year of this date.
    pub const fn days_in_year(&self) -> Doy {
        crate::days_in_year(self.cycle, self.year)
    }
}

impl Default for CalendarDate {
    fn default() -> Self {
        Self::MIN
    }
}

impl PartialOrd for CalendarDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CalendarDate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_absolute().cmp(&other.to_absolute())
    }
}

/// Fields to substitute in [`CalendarDate::replace`]; the rest are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    grand_cycle: Option<GrandCycle>,
    cycle: Option<Cycle>,
    year: Option<Year>,
    month: Option<Result<Month>>,
    day: Option<Dom>,
}

impl Overrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grand_cycle(mut self, grand_cycle: GrandCycle) -> Self {
        self.grand_cycle = Some(grand_cycle);
        self
    }

    pub fn cycle(mut self, cycle: Cycle) -> Self {
        self.cycle = Some(cycle);
        self
    }

    pub fn year(mut self, year: Year) -> Self {
        self.year = Some(year);
        self
    }

    /// Replace the month by number, [`Month`] or name; an unknown month fails on replace.
    pub fn month(mut self, month: impl IntoMonth) -> Self {
        self.month = Some(month.into_month());
        self
    }

    pub fn day(mut self, day: Dom) -> Self {
        self.day = Some(day);
        self
    }
}
